//! Shape usage profiling
//!
//! Tracks shape creation, transitions, property access, and deprecation so
//! the JIT tier has something to decide "hot shape" / "hot transition"
//! questions from, without committing to which tier actually consumes it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::hidden_class::HiddenClass;

/// A shape's identity for profiling purposes: the address of its `Rc`
/// allocation. Stable for the shape's lifetime, unique among live shapes.
type ShapeId = usize;

fn shape_id(shape: &Rc<HiddenClass>) -> ShapeId {
    Rc::as_ptr(shape) as ShapeId
}

/// Per-shape usage counters.
#[derive(Debug, Clone, Default)]
pub struct ShapeStats {
    /// Number of times this shape was created (normally 1; tracked as a
    /// counter rather than a flag in case profiling hooks are ever called
    /// more than once for the same shape).
    pub creation_count: u64,
    /// Number of transitions recorded going *out of* this shape.
    pub transition_count: u64,
    /// Number of property accesses recorded against this shape.
    pub access_count: u64,
    /// Number of times this shape was deprecated.
    pub deprecation_count: u64,
    /// Property name -> child shape id, for transitions out of this shape.
    pub children: HashMap<String, ShapeId>,
}

/// Snapshot of profiling data across every shape seen so far.
#[derive(Debug, Clone)]
pub struct ShapeProfile {
    /// Total distinct shapes seen.
    pub total_shapes: usize,
    /// Shapes seen that have never been deprecated.
    pub active_shapes: usize,
    /// Shapes seen that have been deprecated at least once.
    pub deprecated_shapes: usize,
    /// Shape ids sorted by access count, descending, capped at 10.
    pub hot_shapes: Vec<ShapeId>,
}

/// Tracks shape usage across a shape tree.
///
/// Shares the same shared-coordinator pattern as [`crate::ShapeDeoptimization`]:
/// one profiler per tree, reached from any shape in it.
#[derive(Debug, Default)]
pub struct ShapeProfiler {
    stats: RefCell<HashMap<ShapeId, ShapeStats>>,
}

impl ShapeProfiler {
    /// Create an empty profiler.
    pub fn new() -> Self {
        Self {
            stats: RefCell::new(HashMap::new()),
        }
    }

    fn entry(stats: &mut HashMap<ShapeId, ShapeStats>, id: ShapeId) -> &mut ShapeStats {
        stats.entry(id).or_default()
    }

    /// Record that `shape` was created.
    pub fn record_creation(&self, shape: &Rc<HiddenClass>) {
        let mut stats = self.stats.borrow_mut();
        Self::entry(&mut stats, shape_id(shape)).creation_count += 1;
    }

    /// Record a transition from `from_shape` to `to_shape` via
    /// `property_name`.
    pub fn record_transition(&self, from_shape: &Rc<HiddenClass>, property_name: &str, to_shape: &Rc<HiddenClass>) {
        let mut stats = self.stats.borrow_mut();
        let from_id = shape_id(from_shape);
        let to_id = shape_id(to_shape);
        let entry = Self::entry(&mut stats, from_id);
        entry.transition_count += 1;
        entry.children.insert(property_name.to_string(), to_id);
    }

    /// Record a property access against `shape`.
    pub fn record_access(&self, shape: &Rc<HiddenClass>) {
        let mut stats = self.stats.borrow_mut();
        Self::entry(&mut stats, shape_id(shape)).access_count += 1;
    }

    /// Record that `shape` was deprecated.
    pub fn record_deprecation(&self, shape: &Rc<HiddenClass>) {
        let mut stats = self.stats.borrow_mut();
        Self::entry(&mut stats, shape_id(shape)).deprecation_count += 1;
    }

    /// Shape ids with at least `threshold` recorded accesses, sorted by
    /// access count descending, capped at the 10 hottest.
    pub fn hot_shapes(&self, threshold: u64) -> Vec<ShapeId> {
        let stats = self.stats.borrow();
        let mut hot: Vec<(ShapeId, u64)> = stats
            .iter()
            .filter(|(_, s)| s.access_count >= threshold)
            .map(|(id, s)| (*id, s.access_count))
            .collect();
        hot.sort_by(|a, b| b.1.cmp(&a.1));
        hot.truncate(10);
        hot.into_iter().map(|(id, _)| id).collect()
    }

    /// A point-in-time summary across every tracked shape.
    pub fn profile(&self) -> ShapeProfile {
        let stats = self.stats.borrow();
        let deprecated_shapes = stats.values().filter(|s| s.deprecation_count > 0).count();
        ShapeProfile {
            total_shapes: stats.len(),
            active_shapes: stats.len() - deprecated_shapes,
            deprecated_shapes,
            hot_shapes: self.hot_shapes(1),
        }
    }
}
