//! Upvalue support for closures
//!
//! This module provides the runtime structures for captured variables
//! in closures. Upvalues allow inner functions to access variables
//! from their enclosing scopes.

use core_types::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Upvalue represents a captured variable from an outer scope
///
/// An upvalue can be in one of two states:
/// - Open: The variable still lives on the stack
/// - Closed: The variable has been moved to the heap when its scope ended
#[derive(Debug, Clone)]
pub enum Upvalue {
    /// Variable still lives on the stack at the given index
    Open {
        /// Stack index where the variable lives
        stack_index: usize,
    },
    /// Variable has been closed over (moved to heap)
    Closed {
        /// Heap-allocated value
        value: Rc<RefCell<Value>>,
    },
}

impl Upvalue {
    /// Create a new open upvalue pointing to a stack location
    pub fn new_open(stack_index: usize) -> Self {
        Upvalue::Open { stack_index }
    }

    /// Create a new closed upvalue with a heap-allocated value
    pub fn new_closed(value: Value) -> Self {
        Upvalue::Closed {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Close this upvalue by moving the value from stack to heap
    ///
    /// This is called when the scope containing the captured variable ends
    pub fn close(&mut self, value: Value) {
        *self = Upvalue::Closed {
            value: Rc::new(RefCell::new(value)),
        };
    }

    /// Get the value of this upvalue
    ///
    /// For open upvalues, reads from the stack.
    /// For closed upvalues, reads from the heap.
    pub fn get(&self, stack: &[Value]) -> Value {
        match self {
            Upvalue::Open { stack_index } => stack
                .get(*stack_index)
                .cloned()
                .unwrap_or(Value::Undefined),
            Upvalue::Closed { value } => value.borrow().clone(),
        }
    }

    /// Set the value of this upvalue
    ///
    /// For open upvalues, writes to the stack.
    /// For closed upvalues, writes to the heap.
    pub fn set(&self, new_value: Value, stack: &mut [Value]) {
        match self {
            Upvalue::Open { stack_index } => {
                if *stack_index < stack.len() {
                    stack[*stack_index] = new_value;
                }
            }
            Upvalue::Closed { value } => {
                *value.borrow_mut() = new_value;
            }
        }
    }

    /// Check if this upvalue is still open
    pub fn is_open(&self) -> bool {
        matches!(self, Upvalue::Open { .. })
    }

    /// Get the stack index if this is an open upvalue
    pub fn stack_index(&self) -> Option<usize> {
        match self {
            Upvalue::Open { stack_index } => Some(*stack_index),
            Upvalue::Closed { .. } => None,
        }
    }
}

/// A handle to a shared upvalue
pub type UpvalueHandle = Rc<RefCell<Upvalue>>;

/// Create a new upvalue handle
pub fn new_upvalue_handle(upvalue: Upvalue) -> UpvalueHandle {
    Rc::new(RefCell::new(upvalue))
}

/// Closure combines function code with its captured environment
///
/// A closure consists of a function index (pointing to bytecode) and
/// a list of upvalue handles that represent the captured variables.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Index of the function in the function registry
    pub function_index: usize,
    /// Captured variables (upvalues)
    pub upvalues: Vec<UpvalueHandle>,
}

impl Closure {
    /// Create a new closure with the given function index and upvalues
    pub fn new(function_index: usize, upvalues: Vec<UpvalueHandle>) -> Self {
        Self {
            function_index,
            upvalues,
        }
    }

    /// Create a closure with no captured variables
    pub fn without_upvalues(function_index: usize) -> Self {
        Self {
            function_index,
            upvalues: Vec::new(),
        }
    }

    /// Get the number of captured variables
    pub fn upvalue_count(&self) -> usize {
        self.upvalues.len()
    }

    /// Get a specific upvalue by index
    pub fn get_upvalue(&self, index: usize) -> Option<&UpvalueHandle> {
        self.upvalues.get(index)
    }
}
