//! Compiled-code handle produced by the baseline JIT façade.
//!
//! No machine code is emitted anywhere in this crate: a `CompiledCode`
//! instance wraps the bytecode it was "compiled" from and re-enters the
//! interpreter to run it. This keeps the tier-up / cache / deopt protocol
//! exercisable end to end without committing to an instruction-selection
//! or native ABI strategy.

use std::rc::Rc;

use bytecode_system::BytecodeChunk;
use core_types::{ErrorKind, JsError, Value};
use interpreter::VM;

/// A unit of compiled code installed in a [`crate::code_cache::CodeCache`].
///
/// Cheap to clone: the bytecode payload is reference-counted.
#[derive(Debug, Clone)]
pub struct CompiledCode {
    bytecode: Rc<BytecodeChunk>,
    valid: bool,
}

impl CompiledCode {
    /// Wrap a bytecode chunk as a trampoline entry.
    pub fn new(bytecode: BytecodeChunk) -> Self {
        Self {
            bytecode: Rc::new(bytecode),
            valid: true,
        }
    }

    /// Run the wrapped bytecode through the interpreter.
    ///
    /// Returns an `InternalError` if this entry has been invalidated (e.g.
    /// by a deopt event or a cache eviction) since it was installed.
    pub fn execute(&self) -> Result<Value, JsError> {
        if !self.valid {
            return Err(JsError {
                kind: ErrorKind::InternalError,
                message: "compiled code entry has been invalidated".to_string(),
                stack: vec![],
                source_position: None,
            });
        }
        let mut vm = VM::new();
        vm.execute(&self.bytecode)
    }

    /// Instruction count of the wrapped bytecode, standing in for a real
    /// code-size metric since no machine code is emitted.
    pub fn size(&self) -> usize {
        self.bytecode.instructions.len()
    }

    /// Whether this entry may still be executed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark this entry invalid. Subsequent `execute` calls fail; the cache
    /// should drop the entry on its next eviction pass.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// The bytecode this entry trampolines to.
    pub fn bytecode(&self) -> &BytecodeChunk {
        &self.bytecode
    }
}
