//! Shape-based deoptimization coordination
//!
//! JIT-compiled code speculates on object shapes: "this receiver has shape
//! X", "property `y` lives at offset 2", "this shape won't change again".
//! When a shape transition invalidates one of those assumptions, whoever
//! compiled against it needs to hear about it before running stale code.
//! This is the listener registry that makes that notification possible,
//! independent of whichever tier (baseline JIT, inline cache, ...) is
//! subscribed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::hidden_class::HiddenClass;

/// Why a shape-based deoptimization was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeoptTrigger {
    /// An object's shape changed out from under a guard that assumed it
    /// was stable.
    ShapeChanged,
    /// The shape was marked deprecated in favor of a migration target.
    ShapeDeprecated,
    /// A shape guard observed a shape other than the one it expected.
    ShapeMismatch,
    /// A property was added, producing a new shape.
    PropertyAdded,
    /// A property was deleted, producing a new shape.
    PropertyDeleted,
}

impl DeoptTrigger {
    /// Stable string form, e.g. for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeoptTrigger::ShapeChanged => "shape_changed",
            DeoptTrigger::ShapeDeprecated => "shape_deprecated",
            DeoptTrigger::ShapeMismatch => "shape_mismatch",
            DeoptTrigger::PropertyAdded => "property_added",
            DeoptTrigger::PropertyDeleted => "property_deleted",
        }
    }
}

/// Extra context passed alongside a [`DeoptTrigger`].
#[derive(Debug, Clone, Default)]
pub struct DeoptDetails {
    /// The property name involved, for `PropertyAdded`/`PropertyDeleted`.
    pub property: Option<String>,
    /// The shape being migrated to, if this trigger is part of a
    /// transition (property add/delete, deprecation).
    pub new_shape: Option<Rc<HiddenClass>>,
}

type DeoptListener = Box<dyn Fn(&Rc<HiddenClass>, DeoptTrigger, &DeoptDetails)>;

/// Shape-change deoptimization coordinator.
///
/// Shared by every shape descending from the same root (see
/// [`HiddenClass::root`]), so any listener registered against one shape in
/// a tree hears about transitions anywhere in that tree.
pub struct ShapeDeoptimization {
    listeners: RefCell<Vec<DeoptListener>>,
}

impl ShapeDeoptimization {
    /// Create a coordinator with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback to run on every future deoptimization trigger.
    pub fn register_deopt_listener(
        &self,
        listener: impl Fn(&Rc<HiddenClass>, DeoptTrigger, &DeoptDetails) + 'static,
    ) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Number of registered listeners, mostly useful for tests.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Notify every registered listener of a deoptimization trigger.
    pub fn trigger_deopt(&self, shape: &Rc<HiddenClass>, reason: DeoptTrigger, details: &DeoptDetails) {
        for listener in self.listeners.borrow().iter() {
            listener(shape, reason, details);
        }
    }

    /// Check a JIT shape guard: does `actual` match what compiled code
    /// assumed (`expected`)? A mismatch fires [`DeoptTrigger::ShapeMismatch`]
    /// before returning `false`.
    pub fn check_shape_guard(&self, expected: &Rc<HiddenClass>, actual: &Rc<HiddenClass>) -> bool {
        if Rc::ptr_eq(expected, actual) {
            return true;
        }
        self.trigger_deopt(actual, DeoptTrigger::ShapeMismatch, &DeoptDetails::default());
        false
    }

    /// Notify listeners that `old_shape` has been deprecated in favor of
    /// `new_shape`.
    pub fn on_shape_deprecation(&self, old_shape: &Rc<HiddenClass>, new_shape: &Rc<HiddenClass>) {
        self.trigger_deopt(
            old_shape,
            DeoptTrigger::ShapeDeprecated,
            &DeoptDetails {
                property: None,
                new_shape: Some(Rc::clone(new_shape)),
            },
        );
    }

    /// Notify listeners that `property_name` was added to `shape`,
    /// transitioning it to `new_shape`.
    pub fn on_property_added(
        &self,
        shape: &Rc<HiddenClass>,
        property_name: &str,
        new_shape: &Rc<HiddenClass>,
    ) {
        self.trigger_deopt(
            shape,
            DeoptTrigger::PropertyAdded,
            &DeoptDetails {
                property: Some(property_name.to_string()),
                new_shape: Some(Rc::clone(new_shape)),
            },
        );
    }

    /// Notify listeners that `property_name` was deleted from `shape`,
    /// transitioning it to `new_shape`.
    pub fn on_property_deleted(
        &self,
        shape: &Rc<HiddenClass>,
        property_name: &str,
        new_shape: &Rc<HiddenClass>,
    ) {
        self.trigger_deopt(
            shape,
            DeoptTrigger::PropertyDeleted,
            &DeoptDetails {
                property: Some(property_name.to_string()),
                new_shape: Some(Rc::clone(new_shape)),
            },
        );
    }
}

impl Default for ShapeDeoptimization {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShapeDeoptimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeDeoptimization")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}
