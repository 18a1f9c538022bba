//! Baseline JIT façade: tier-up decision and compile-entry point.
//!
//! This module intentionally does not emit machine code. Its job is the
//! protocol around tiering: deciding when a hot function should stop being
//! interpreted instruction-by-instruction and start running through a
//! `CompiledCode` trampoline, and handing out those trampolines. A real
//! backend would slot in behind `compile_function` without touching the
//! rest of the engine.

use std::collections::HashSet;

use bytecode_system::BytecodeChunk;
use core_types::JsError;

use crate::compiled_code::CompiledCode;

/// Invocation count at which a function becomes eligible for tier-up.
pub const TIER_UP_THRESHOLD: u64 = 1000;

/// Running totals for the baseline JIT façade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineStats {
    /// Number of functions successfully handed a `CompiledCode` entry.
    pub functions_compiled: u64,
    /// Number of `should_compile` calls that returned `true`.
    pub tier_up_decisions: u64,
}

/// Baseline tier of the JIT façade.
///
/// Tracks which functions have already tiered up so the decision is
/// monotonic: a function is offered compilation once, not on every call
/// past the threshold.
#[derive(Debug, Default)]
pub struct BaselineJit {
    compiled_ids: HashSet<u64>,
    stats: BaselineStats,
}

impl BaselineJit {
    /// Create an empty baseline JIT façade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `function_id`, called `call_count` times so far,
    /// should tier up to compiled execution.
    pub fn should_compile(&mut self, function_id: u64, call_count: u64) -> bool {
        let eligible = call_count >= TIER_UP_THRESHOLD && !self.compiled_ids.contains(&function_id);
        if eligible {
            self.stats.tier_up_decisions += 1;
        }
        eligible
    }

    /// Produce a trampoline `CompiledCode` for `chunk`, marking
    /// `function_id` as tiered up.
    pub fn compile_function(
        &mut self,
        function_id: u64,
        chunk: &BytecodeChunk,
    ) -> Result<CompiledCode, JsError> {
        self.compiled_ids.insert(function_id);
        self.stats.functions_compiled += 1;
        tracing::debug!(function_id, instructions = chunk.instructions.len(), "tiered up function");
        Ok(CompiledCode::new(chunk.clone()))
    }

    /// Whether `function_id` has already been compiled.
    pub fn is_compiled(&self, function_id: u64) -> bool {
        self.compiled_ids.contains(&function_id)
    }

    /// Current compile/tier-up counters.
    pub fn stats(&self) -> &BaselineStats {
        &self.stats
    }

    /// Reset counters and forget which functions were compiled.
    pub fn reset_stats(&mut self) {
        self.compiled_ids.clear();
        self.stats = BaselineStats::default();
    }
}
