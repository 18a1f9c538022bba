//! JavaScript Error types implementation
//!
//! This module provides comprehensive Error support including:
//! - Base Error constructor
//! - All standard error subtypes (TypeError, ReferenceError, etc.)
//! - Stack trace generation and formatting
//! - Error.prototype methods

use std::fmt;
use std::rc::Rc;

/// The kind of JavaScript error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic Error
    Error,
    /// TypeError - type mismatch errors
    TypeError,
    /// ReferenceError - undefined variable access
    ReferenceError,
    /// SyntaxError - parse/syntax errors
    SyntaxError,
    /// RangeError - numeric range violations
    RangeError,
    /// URIError - malformed URI
    URIError,
    /// EvalError - eval failures (legacy)
    EvalError,
    /// AggregateError - multiple errors combined
    AggregateError,
}

impl ErrorKind {
    /// Returns true if this is an error type
    pub fn is_error_type(&self) -> bool {
        true
    }

    /// Get the error name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::URIError => "URIError",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::AggregateError => "AggregateError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a single frame in a JavaScript stack trace
#[derive(Debug, Clone, PartialEq)]
pub struct StackFrame {
    function_name: String,
    file_name: String,
    line_number: u32,
    column_number: u32,
}

impl StackFrame {
    /// Create a new stack frame
    pub fn new(function_name: String, file_name: String, line_number: u32, column_number: u32) -> Self {
        StackFrame {
            function_name,
            file_name,
            line_number,
            column_number,
        }
    }

    /// Get the function name
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Get the file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the line number
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Get the column number
    pub fn column_number(&self) -> u32 {
        self.column_number
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "    at {} ({}:{}:{})",
            self.function_name, self.file_name, self.line_number, self.column_number
        )
    }
}

/// JavaScript Error object representation
#[derive(Debug, Clone)]
pub struct JsErrorObject {
    /// The kind of error
    kind: ErrorKind,
    /// Custom error name (can be overwritten)
    name: String,
    /// Error message
    message: String,
    /// Stack frames
    stack_frames: Vec<StackFrame>,
    /// Optional cause (for error chaining)
    cause: Option<Rc<JsErrorObject>>,
    /// For AggregateError: collection of errors
    errors: Option<Vec<JsErrorObject>>,
    /// Stack trace limit (default 10)
    stack_trace_limit: usize,
}

impl JsErrorObject {
    /// Create a new error object
    pub fn new(kind: ErrorKind, message: String) -> Self {
        let name = kind.name().to_string();
        JsErrorObject {
            kind,
            name,
            message,
            stack_frames: Vec::new(),
            cause: None,
            errors: None,
            stack_trace_limit: 10,
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the error name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Set the error message
    pub fn set_message(&mut self, message: String) {
        self.message = message;
    }

    /// Check if this is an error object
    pub fn is_error(&self) -> bool {
        true
    }

    /// Get the stack trace as a formatted string
    pub fn stack(&self) -> String {
        let mut result = self.to_string();

        let frames_to_show = self.stack_frames.len().min(self.stack_trace_limit);
        for frame in self.stack_frames.iter().take(frames_to_show) {
            result.push('\n');
            result.push_str(&frame.to_string());
        }

        result
    }

    /// Capture stack trace from provided frames
    pub fn capture_stack_trace(&mut self, frames: Vec<StackFrame>) {
        self.stack_frames = frames;
    }

    /// Get the cause of this error if any
    pub fn cause(&self) -> Option<&JsErrorObject> {
        self.cause.as_ref().map(|rc| rc.as_ref())
    }

    /// Set the cause of this error
    pub fn set_cause(&mut self, cause: JsErrorObject) {
        self.cause = Some(Rc::new(cause));
    }

    /// Get the errors array (for AggregateError)
    pub fn errors(&self) -> Option<&Vec<JsErrorObject>> {
        self.errors.as_ref()
    }

    /// Set the errors array (for AggregateError)
    pub fn set_errors(&mut self, errors: Vec<JsErrorObject>) {
        self.errors = Some(errors);
    }
}

impl fmt::Display for JsErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl PartialEq for JsErrorObject {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// Error constructor functions matching JavaScript Error API
pub struct ErrorConstructor;

impl ErrorConstructor {
    /// Construct a base Error
    pub fn construct(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::Error, message.unwrap_or_default())
    }

    /// Call Error() without new (behaves like new Error())
    pub fn call(message: Option<String>) -> JsErrorObject {
        Self::construct(message)
    }

    /// Create a TypeError
    pub fn type_error(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::TypeError, message.unwrap_or_default())
    }

    /// Create a ReferenceError
    pub fn reference_error(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::ReferenceError, message.unwrap_or_default())
    }

    /// Create a SyntaxError
    pub fn syntax_error(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::SyntaxError, message.unwrap_or_default())
    }

    /// Create a RangeError
    pub fn range_error(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::RangeError, message.unwrap_or_default())
    }

    /// Create a URIError
    pub fn uri_error(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::URIError, message.unwrap_or_default())
    }

    /// Create an EvalError
    pub fn eval_error(message: Option<String>) -> JsErrorObject {
        JsErrorObject::new(ErrorKind::EvalError, message.unwrap_or_default())
    }

    /// Create an AggregateError
    pub fn aggregate_error(errors: Vec<JsErrorObject>, message: Option<String>) -> JsErrorObject {
        let mut error = JsErrorObject::new(ErrorKind::AggregateError, message.unwrap_or_default());
        error.set_errors(errors);
        error
    }

    /// Create an error with a cause
    pub fn with_cause(
        kind: ErrorKind,
        message: Option<String>,
        cause: JsErrorObject,
    ) -> JsErrorObject {
        let mut error = JsErrorObject::new(kind, message.unwrap_or_default());
        error.set_cause(cause);
        error
    }
}
