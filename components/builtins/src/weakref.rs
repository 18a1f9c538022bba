//! WeakRef and FinalizationRegistry implementations
//!
//! ES2024 compliant WeakRef and FinalizationRegistry for weak reference management
//! and cleanup callbacks when objects are garbage collected.

use crate::value::{JsError, JsResult, JsValue, ObjectData};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex};

/// WeakRef internal data
///
/// Holds a weak reference to a JavaScript object that allows the target
/// to be garbage collected when there are no strong references.
#[derive(Debug, Clone)]
pub struct WeakRefData {
    /// Weak reference to the target object's internal data
    target: WeakObjectRef,
}

/// Wrapper for different types of weak object references
#[derive(Debug, Clone)]
pub enum WeakObjectRef {
    /// Weak reference to an Object
    Object(Weak<RefCell<ObjectData>>),
    /// Weak reference to an Array
    Array(Weak<RefCell<crate::value::ArrayData>>),
    /// Weak reference to a Map
    Map(Weak<RefCell<crate::value::MapData>>),
    /// Weak reference to a Set
    Set(Weak<RefCell<crate::value::SetData>>),
    /// Weak reference to a Function
    Function(Weak<RefCell<crate::value::FunctionData>>),
    /// Weak reference to a Constructor
    Constructor(Weak<RefCell<crate::value::ConstructorData>>),
    /// Weak reference to a WeakMap
    WeakMap(Weak<RefCell<crate::value::WeakMapData>>),
    /// Weak reference to a WeakSet
    WeakSet(Weak<RefCell<crate::value::WeakSetData>>),
    /// Weak reference to an Error
    Error(Weak<RefCell<crate::error::JsErrorObject>>),
    /// Weak reference to a RegExp
    RegExp(Weak<RefCell<crate::regexp::RegExpObject>>),
}

impl WeakObjectRef {
    /// Check if the weak reference is still alive
    pub fn is_alive(&self) -> bool {
        match self {
            WeakObjectRef::Object(weak) => weak.strong_count() > 0,
            WeakObjectRef::Array(weak) => weak.strong_count() > 0,
            WeakObjectRef::Map(weak) => weak.strong_count() > 0,
            WeakObjectRef::Set(weak) => weak.strong_count() > 0,
            WeakObjectRef::Function(weak) => weak.strong_count() > 0,
            WeakObjectRef::Constructor(weak) => weak.strong_count() > 0,
            WeakObjectRef::WeakMap(weak) => weak.strong_count() > 0,
            WeakObjectRef::WeakSet(weak) => weak.strong_count() > 0,
            WeakObjectRef::Error(weak) => weak.strong_count() > 0,
            WeakObjectRef::RegExp(weak) => weak.strong_count() > 0,
        }
    }

    /// Upgrade the weak reference to a strong reference (returns the JsValue if alive)
    pub fn upgrade(&self) -> Option<JsValue> {
        match self {
            WeakObjectRef::Object(weak) => weak.upgrade().map(JsValue::Object),
            WeakObjectRef::Array(weak) => weak.upgrade().map(JsValue::Array),
            WeakObjectRef::Map(weak) => weak.upgrade().map(JsValue::Map),
            WeakObjectRef::Set(weak) => weak.upgrade().map(JsValue::Set),
            WeakObjectRef::Function(weak) => weak.upgrade().map(JsValue::Function),
            WeakObjectRef::Constructor(weak) => weak.upgrade().map(JsValue::Constructor),
            WeakObjectRef::WeakMap(weak) => weak.upgrade().map(JsValue::WeakMap),
            WeakObjectRef::WeakSet(weak) => weak.upgrade().map(JsValue::WeakSet),
            WeakObjectRef::Error(weak) => weak.upgrade().map(JsValue::Error),
            WeakObjectRef::RegExp(weak) => weak.upgrade().map(JsValue::RegExp),
        }
    }
}

/// WeakRef built-in object
///
/// Implements ES2024 WeakRef with:
/// - Weak reference to target object (target can be GC'd)
/// - deref() method to retrieve target or undefined
/// - Only accepts objects (not primitives)
pub struct WeakRefObject;

impl WeakRefObject {
    /// Create a new WeakRef holding a weak reference to the target
    ///
    /// Returns TypeError if target is not an object (primitives not allowed).
    pub fn new(target: &JsValue) -> JsResult<JsValue> {
        let weak_ref = Self::create_weak_ref(target)?;

        Ok(JsValue::WeakRef(Rc::new(RefCell::new(WeakRefData {
            target: weak_ref,
        }))))
    }

    /// Create a weak reference from a JsValue
    fn create_weak_ref(target: &JsValue) -> JsResult<WeakObjectRef> {
        match target {
            JsValue::Object(rc) => Ok(WeakObjectRef::Object(Rc::downgrade(rc))),
            JsValue::Array(rc) => Ok(WeakObjectRef::Array(Rc::downgrade(rc))),
            JsValue::Map(rc) => Ok(WeakObjectRef::Map(Rc::downgrade(rc))),
            JsValue::Set(rc) => Ok(WeakObjectRef::Set(Rc::downgrade(rc))),
            JsValue::Function(rc) => Ok(WeakObjectRef::Function(Rc::downgrade(rc))),
            JsValue::Constructor(rc) => Ok(WeakObjectRef::Constructor(Rc::downgrade(rc))),
            JsValue::WeakMap(rc) => Ok(WeakObjectRef::WeakMap(Rc::downgrade(rc))),
            JsValue::WeakSet(rc) => Ok(WeakObjectRef::WeakSet(Rc::downgrade(rc))),
            JsValue::Error(rc) => Ok(WeakObjectRef::Error(Rc::downgrade(rc))),
            JsValue::RegExp(rc) => Ok(WeakObjectRef::RegExp(Rc::downgrade(rc))),
            // Primitives and non-weak-referenceable types
            JsValue::Undefined
            | JsValue::Null
            | JsValue::Boolean(_)
            | JsValue::Number(_)
            | JsValue::String(_)
            | JsValue::Symbol(_)
            | JsValue::BigInt(_)
            | JsValue::Proxy(_)
            | JsValue::Generator(_)
            | JsValue::AsyncGenerator(_) => Err(JsError::type_error(
                "WeakRef constructor requires an object as target",
            )),
            // WeakRef and FinalizationRegistry cannot be targets of themselves
            JsValue::WeakRef(_) | JsValue::FinalizationRegistry(_) => Err(JsError::type_error(
                "WeakRef constructor requires an object as target",
            )),
        }
    }

    /// Dereference the WeakRef to get the target object
    ///
    /// Returns the target object if it's still alive, or undefined if it has been collected.
    pub fn deref(weak_ref: &JsValue) -> JsResult<JsValue> {
        if let JsValue::WeakRef(data) = weak_ref {
            let weak_ref_data = data.borrow();
            Ok(weak_ref_data.target.upgrade().unwrap_or(JsValue::Undefined))
        } else {
            Err(JsError::type_error("deref called on non-WeakRef"))
        }
    }

    /// Check if the WeakRef's target is still alive
    ///
    /// This is not part of the ES spec but useful for testing.
    pub fn is_alive(weak_ref: &JsValue) -> JsResult<bool> {
        if let JsValue::WeakRef(data) = weak_ref {
            let weak_ref_data = data.borrow();
            Ok(weak_ref_data.target.is_alive())
        } else {
            Err(JsError::type_error("is_alive called on non-WeakRef"))
        }
    }
}

/// FinalizationRegistry cleanup entry
#[derive(Debug, Clone)]
struct CleanupEntry {
    /// Weak reference to the target being watched
    target: WeakObjectRef,
    /// Value to pass to cleanup callback when target is collected
    held_value: JsValue,
    /// Optional unregister token (object identity)
    unregister_token: Option<usize>,
}

/// FinalizationRegistry internal data
///
/// Manages cleanup callbacks for objects when they are garbage collected.
#[derive(Debug)]
pub struct FinalizationRegistryData {
    /// The cleanup callback function
    cleanup_callback: Rc<RefCell<crate::value::FunctionData>>,
    /// Registry of targets being watched
    entries: Vec<CleanupEntry>,
    /// Queue of held values for cleanup (from collected targets)
    cleanup_queue: Arc<Mutex<Vec<JsValue>>>,
}

impl Clone for FinalizationRegistryData {
    fn clone(&self) -> Self {
        FinalizationRegistryData {
            cleanup_callback: self.cleanup_callback.clone(),
            entries: self.entries.clone(),
            cleanup_queue: self.cleanup_queue.clone(),
        }
    }
}

/// FinalizationRegistry built-in object
///
/// Implements ES2024 FinalizationRegistry with:
/// - Cleanup callback invoked when registered objects are collected
/// - register(target, heldValue, unregisterToken?) for watching objects
/// - unregister(unregisterToken) to remove registrations
/// - Thread-safe cleanup queue
pub struct FinalizationRegistryObject;

impl FinalizationRegistryObject {
    /// Create a new FinalizationRegistry with the given cleanup callback
    ///
    /// The callback will be invoked with the held value when a registered target is collected.
    pub fn new(cleanup_callback: JsValue) -> JsResult<JsValue> {
        let callback = match cleanup_callback {
            JsValue::Function(func) => func,
            _ => {
                return Err(JsError::type_error(
                    "FinalizationRegistry constructor requires a callback function",
                ))
            }
        };

        Ok(JsValue::FinalizationRegistry(Rc::new(RefCell::new(
            FinalizationRegistryData {
                cleanup_callback: callback,
                entries: Vec::new(),
                cleanup_queue: Arc::new(Mutex::new(Vec::new())),
            },
        ))))
    }

    /// Register a target object with the registry
    ///
    /// When target is garbage collected, the cleanup callback will be called with held_value.
    /// Optional unregister_token allows later removal of the registration.
    ///
    /// Returns undefined.
    /// Returns TypeError if target or unregister_token (if provided) is not an object.
    pub fn register(
        registry: &JsValue,
        target: &JsValue,
        held_value: JsValue,
        unregister_token: Option<&JsValue>,
    ) -> JsResult<JsValue> {
        if let JsValue::FinalizationRegistry(data) = registry {
            // Create weak reference to target
            let weak_ref = WeakRefObject::create_weak_ref(target)?;

            // Get unregister token identity if provided
            let token_id = if let Some(token) = unregister_token {
                let id = token.object_identity().ok_or_else(|| {
                    JsError::type_error(
                        "FinalizationRegistry.register: unregisterToken must be an object",
                    )
                })?;
                Some(id)
            } else {
                None
            };

            // Held value must not be the target itself
            if target.object_identity() == held_value.object_identity()
                && target.object_identity().is_some()
            {
                return Err(JsError::type_error(
                    "FinalizationRegistry.register: target and heldValue must not be the same",
                ));
            }

            let mut registry_data = data.borrow_mut();
            registry_data.entries.push(CleanupEntry {
                target: weak_ref,
                held_value,
                unregister_token: token_id,
            });

            Ok(JsValue::Undefined)
        } else {
            Err(JsError::type_error("register called on non-FinalizationRegistry"))
        }
    }

    /// Unregister all entries with the given unregister token
    ///
    /// Returns true if any entries were removed, false otherwise.
    /// Returns TypeError if unregister_token is not an object.
    pub fn unregister(registry: &JsValue, unregister_token: &JsValue) -> JsResult<bool> {
        if let JsValue::FinalizationRegistry(data) = registry {
            let token_id = unregister_token.object_identity().ok_or_else(|| {
                JsError::type_error("FinalizationRegistry.unregister: token must be an object")
            })?;

            let mut registry_data = data.borrow_mut();
            let original_len = registry_data.entries.len();
            registry_data
                .entries
                .retain(|entry| entry.unregister_token != Some(token_id));
            let removed = registry_data.entries.len() < original_len;

            Ok(removed)
        } else {
            Err(JsError::type_error("unregister called on non-FinalizationRegistry"))
        }
    }

    /// Check for collected targets and queue their cleanup callbacks
    ///
    /// This should be called periodically by the runtime/GC to process
    /// targets that have been garbage collected.
    pub fn cleanup_some(registry: &JsValue) -> JsResult<()> {
        if let JsValue::FinalizationRegistry(data) = registry {
            let mut registry_data = data.borrow_mut();
            let cleanup_queue = registry_data.cleanup_queue.clone();

            // Find entries where target has been collected
            let mut collected_values = Vec::new();
            registry_data.entries.retain(|entry| {
                if !entry.target.is_alive() {
                    collected_values.push(entry.held_value.clone());
                    false // Remove this entry
                } else {
                    true // Keep this entry
                }
            });

            // Add to cleanup queue
            if !collected_values.is_empty() {
                let mut queue = cleanup_queue.lock().unwrap();
                queue.extend(collected_values);
            }

            Ok(())
        } else {
            Err(JsError::type_error("cleanupSome called on non-FinalizationRegistry"))
        }
    }

    /// Execute pending cleanup callbacks
    ///
    /// This processes the cleanup queue and invokes the callback for each held value.
    /// Should be called by the runtime event loop.
    pub fn run_cleanup_callbacks(registry: &JsValue) -> JsResult<Vec<JsValue>> {
        if let JsValue::FinalizationRegistry(data) = registry {
            let registry_data = data.borrow();
            let cleanup_queue = registry_data.cleanup_queue.clone();
            let callback = registry_data.cleanup_callback.clone();
            drop(registry_data);

            // Get queued values
            let values: Vec<JsValue> = {
                let mut queue = cleanup_queue.lock().unwrap();
                std::mem::take(&mut *queue)
            };

            // Execute callbacks
            let mut results = Vec::new();
            for held_value in values {
                let callback_data = callback.borrow();
                let result = (callback_data.func)(JsValue::Undefined, vec![held_value])?;
                results.push(result);
            }

            Ok(results)
        } else {
            Err(JsError::type_error(
                "runCleanupCallbacks called on non-FinalizationRegistry",
            ))
        }
    }

    /// Get the number of registered entries (for testing)
    pub fn entry_count(registry: &JsValue) -> JsResult<usize> {
        if let JsValue::FinalizationRegistry(data) = registry {
            Ok(data.borrow().entries.len())
        } else {
            Err(JsError::type_error("entryCount called on non-FinalizationRegistry"))
        }
    }

    /// Get the number of items in the cleanup queue (for testing)
    pub fn queue_size(registry: &JsValue) -> JsResult<usize> {
        if let JsValue::FinalizationRegistry(data) = registry {
            let registry_data = data.borrow();
            let queue = registry_data.cleanup_queue.lock().unwrap();
            Ok(queue.len())
        } else {
            Err(JsError::type_error("queueSize called on non-FinalizationRegistry"))
        }
    }
}
