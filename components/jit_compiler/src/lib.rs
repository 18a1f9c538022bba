//! Baseline JIT façade for the JavaScript runtime.
//!
//! This crate does not emit machine code. It provides the tier-up
//! protocol a real JIT would sit behind: a decision of when a function is
//! hot enough to compile (`baseline::BaselineJit::should_compile`), a
//! compile entry point that hands out a trampoline (`compiled_code`), an
//! LRU-bounded cache of those trampolines (`code_cache`), and the
//! deoptimization path back to the interpreter when a speculative guard
//! would have been violated (`deopt`).
//!
//! # Example
//!
//! ```
//! use jit_compiler::{BaselineJit, CodeCache};
//! use bytecode_system::{BytecodeChunk, Opcode, Value as BcValue};
//!
//! let mut baseline = BaselineJit::new();
//! let mut chunk = BytecodeChunk::new();
//! let idx = chunk.add_constant(BcValue::Number(42.0));
//! chunk.emit(Opcode::LoadConstant(idx));
//! chunk.emit(Opcode::Return);
//!
//! assert!(baseline.should_compile(1, 1000));
//! let compiled = baseline.compile_function(1, &chunk).unwrap();
//!
//! let mut cache = CodeCache::new(64);
//! cache.insert(1, compiled);
//! let result = cache.lookup(1).unwrap().execute().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod baseline;
pub mod code_cache;
pub mod compiled_code;
pub mod deopt;

pub use baseline::{BaselineJit, BaselineStats};
pub use code_cache::CodeCache;
pub use compiled_code::CompiledCode;
pub use deopt::{DeoptInfo, DeoptReason, Deoptimizer, InterpreterState};
