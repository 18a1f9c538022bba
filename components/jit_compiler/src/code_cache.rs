//! Bounded cache of compiled-code entries, keyed by function id.
//!
//! Eviction is least-recently-used: both a lookup and an insert count as a
//! use. When an insert would exceed capacity, the entry that has gone
//! longest without being touched is dropped first.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use memory_manager::{DeoptTrigger, HiddenClass, ShapeDeoptimization};

use crate::compiled_code::CompiledCode;

const DEFAULT_CAPACITY: usize = 256;

/// LRU-bounded cache mapping function ids to their compiled trampoline.
#[derive(Debug)]
pub struct CodeCache {
    capacity: usize,
    entries: HashMap<u64, CompiledCode>,
    /// Recency order, oldest first. Kept separate from `entries` so lookup
    /// can reorder it without touching the stored code.
    recency: Vec<u64>,
    /// Shape each cached function's compiled code speculated on. A shape
    /// deoptimization trigger against one of these evicts the entry.
    shape_guards: HashMap<u64, Weak<HiddenClass>>,
}

impl CodeCache {
    /// Create a cache that holds at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            recency: Vec::new(),
            shape_guards: HashMap::new(),
        }
    }

    fn touch(&mut self, function_id: u64) {
        self.recency.retain(|id| *id != function_id);
        self.recency.push(function_id);
    }

    /// Install `code` under `function_id`, evicting the least-recently-used
    /// entry first if the cache is full.
    pub fn insert(&mut self, function_id: u64, code: CompiledCode) {
        if !self.entries.contains_key(&function_id) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.recency.first().copied() {
                self.evict(evicted);
                tracing::debug!(function_id = evicted, "evicted code cache entry for capacity");
            }
        }
        self.entries.insert(function_id, code);
        self.touch(function_id);
    }

    /// Look up `function_id`, marking it most-recently-used on a hit.
    pub fn lookup(&mut self, function_id: u64) -> Option<&CompiledCode> {
        if self.entries.contains_key(&function_id) {
            self.touch(function_id);
        }
        self.entries.get(&function_id)
    }

    /// Remove and return the entry for `function_id`, if present.
    pub fn evict(&mut self, function_id: u64) -> Option<CompiledCode> {
        self.recency.retain(|id| *id != function_id);
        self.shape_guards.remove(&function_id);
        self.entries.remove(&function_id)
    }

    /// Record that `function_id`'s compiled code speculates on objects
    /// flowing through it having `shape`. If `shape` is later invalidated
    /// by a deoptimization trigger, the entry is evicted.
    pub fn guard_shape(&mut self, function_id: u64, shape: &Rc<HiddenClass>) {
        self.shape_guards.insert(function_id, Rc::downgrade(shape));
    }

    /// Evict every entry guarding `shape`, in response to `reason`.
    fn evict_for_shape(&mut self, shape: &Rc<HiddenClass>, reason: DeoptTrigger) {
        let stale: Vec<u64> = self
            .shape_guards
            .iter()
            .filter(|(_, guarded)| {
                guarded
                    .upgrade()
                    .is_some_and(|guarded_shape| Rc::ptr_eq(&guarded_shape, shape))
            })
            .map(|(function_id, _)| *function_id)
            .collect();

        for function_id in stale {
            self.evict(function_id);
            tracing::debug!(
                function_id,
                reason = reason.as_str(),
                "evicted code cache entry on shape deoptimization"
            );
        }
    }

    /// Register `cache` as a deoptimization listener on `deopt`, so any
    /// shape transition it reports evicts the compiled code that guarded
    /// that shape.
    pub fn listen_for_shape_deopt(cache: &Rc<RefCell<CodeCache>>, deopt: &ShapeDeoptimization) {
        let cache = Rc::clone(cache);
        deopt.register_deopt_listener(move |shape, reason, _details| {
            cache.borrow_mut().evict_for_shape(shape, reason);
        });
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured maximum entry count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CodeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
