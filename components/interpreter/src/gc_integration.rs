//! GC integration for JavaScript object allocation
//!
//! Provides heap-allocated JavaScript objects that integrate with
//! the memory_manager's garbage collector.

use core_types::Value;
use memory_manager::{Heap, HiddenClass, PropertyAttributes};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// GC-managed JavaScript object
///
/// This structure represents a JavaScript object that is allocated
/// on the GC heap and supports property access with hidden class
/// optimization.
pub struct GCObject {
    /// Reference to the shared heap
    heap: Rc<RefCell<Heap>>,
    /// Property storage
    properties: HashMap<String, Value>,
    /// Prototype object (for prototype chain)
    prototype: Option<Box<GCObject>>,
    /// Hidden class for property layout optimization
    hidden_class: Option<Rc<HiddenClass>>,
}

impl std::fmt::Debug for GCObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GCObject")
            .field("properties", &self.properties)
            .field("prototype", &self.prototype.as_ref().map(|_| "..."))
            .field("hidden_class", &self.hidden_class.as_ref().map(|_| "HiddenClass"))
            .finish()
    }
}

impl GCObject {
    /// Create a new empty GC-managed object
    ///
    /// # Arguments
    ///
    /// * `heap` - Shared reference to the GC heap
    pub fn new(heap: Rc<RefCell<Heap>>) -> Self {
        Self {
            heap,
            properties: HashMap::new(),
            prototype: None,
            hidden_class: Some(HiddenClass::new()),
        }
    }

    /// Create a new GC-managed object with a prototype
    ///
    /// # Arguments
    ///
    /// * `heap` - Shared reference to the GC heap
    /// * `prototype` - The prototype object for this object
    pub fn with_prototype(heap: Rc<RefCell<Heap>>, prototype: GCObject) -> Self {
        Self {
            heap,
            properties: HashMap::new(),
            prototype: Some(Box::new(prototype)),
            hidden_class: Some(HiddenClass::new()),
        }
    }

    /// Get a property value by name
    ///
    /// Traverses the prototype chain if the property is not found
    /// on the current object.
    ///
    /// # Arguments
    ///
    /// * `key` - The property name to retrieve
    ///
    /// # Returns
    ///
    /// The property value, or `Value::Undefined` if not found
    pub fn get(&self, key: &str) -> Value {
        // Check own properties first (using hidden class if available)
        if let Some(ref class) = self.hidden_class {
            if class.lookup_property(key).is_some() {
                if let Some(value) = self.properties.get(key) {
                    return value.clone();
                }
            }
        } else if let Some(value) = self.properties.get(key) {
            return value.clone();
        }

        // Check prototype chain
        if let Some(ref proto) = self.prototype {
            return proto.get(key);
        }

        Value::Undefined
    }

    /// Set a property value
    ///
    /// Updates the hidden class if this is a new property.
    ///
    /// # Arguments
    ///
    /// * `key` - The property name
    /// * `value` - The value to set
    pub fn set(&mut self, key: String, value: Value) {
        // Update hidden class for new property
        if !self.properties.contains_key(&key) {
            if let Some(ref class) = self.hidden_class {
                self.hidden_class = Some(class.add_property(&key, PropertyAttributes::default()));
            }
        }
        self.properties.insert(key, value);
    }

    /// Check if the object has a property (including prototype chain)
    ///
    /// # Arguments
    ///
    /// * `key` - The property name to check
    ///
    /// # Returns
    ///
    /// `true` if the property exists, `false` otherwise
    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
            || self
                .prototype
                .as_ref()
                .map(|p| p.has(key))
                .unwrap_or(false)
    }

    /// Check if the object has an own property (not from prototype)
    ///
    /// # Arguments
    ///
    /// * `key` - The property name to check
    ///
    /// # Returns
    ///
    /// `true` if the property exists on this object directly
    pub fn has_own(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get all own property keys
    ///
    /// # Returns
    ///
    /// A vector of property names
    pub fn keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    /// Get a reference to the prototype object
    pub fn prototype(&self) -> Option<&GCObject> {
        self.prototype.as_deref()
    }

    /// Set the prototype object
    ///
    /// # Arguments
    ///
    /// * `prototype` - The new prototype object
    pub fn set_prototype(&mut self, prototype: GCObject) {
        self.prototype = Some(Box::new(prototype));
    }

    /// Remove a property from the object
    ///
    /// # Arguments
    ///
    /// * `key` - The property name to remove
    ///
    /// # Returns
    ///
    /// `true` if the property was removed, `false` if it didn't exist
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.properties.remove(key).is_some();
        if removed {
            if let Some(ref class) = self.hidden_class {
                self.hidden_class = Some(class.remove_property(key));
            }
        }
        removed
    }

    /// Get the number of own properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Get a reference to the hidden class
    pub fn hidden_class(&self) -> Option<&HiddenClass> {
        self.hidden_class.as_deref()
    }

    /// Get a reference to the heap
    pub fn heap(&self) -> &Rc<RefCell<Heap>> {
        &self.heap
    }
}

/// Heap wrapper for the VM
///
/// Provides a simplified interface for creating and managing
/// GC-allocated JavaScript objects.
pub struct VMHeap {
    /// Shared heap reference
    heap: Rc<RefCell<Heap>>,
}

impl VMHeap {
    /// Create a new VM heap with default configuration
    ///
    /// Uses 4MB young generation and promotion threshold of 3.
    pub fn new() -> Self {
        Self {
            heap: Rc::new(RefCell::new(Heap::new())),
        }
    }

    /// Create a new VM heap with custom configuration
    ///
    /// # Arguments
    ///
    /// * `young_gen_size` - Size of young generation in bytes
    /// * `promotion_threshold` - Number of GC cycles before promotion
    pub fn with_config(young_gen_size: usize, promotion_threshold: u8) -> Self {
        Self {
            heap: Rc::new(RefCell::new(Heap::with_config(
                young_gen_size,
                promotion_threshold,
            ))),
        }
    }

    /// Create a new empty GC-managed object
    pub fn create_object(&self) -> GCObject {
        GCObject::new(Rc::clone(&self.heap))
    }

    /// Create a new GC-managed object with a prototype
    ///
    /// # Arguments
    ///
    /// * `prototype` - The prototype object
    pub fn create_object_with_prototype(&self, prototype: GCObject) -> GCObject {
        GCObject::with_prototype(Rc::clone(&self.heap), prototype)
    }

    /// Trigger garbage collection
    ///
    /// Performs a young generation collection.
    pub fn collect_garbage(&self) {
        self.heap.borrow_mut().collect_garbage();
    }

    /// Trigger a full garbage collection
    ///
    /// Collects both young and old generations.
    pub fn full_gc(&self) {
        self.heap.borrow_mut().full_gc();
    }

    /// Get heap statistics
    ///
    /// # Returns
    ///
    /// Tuple of (young_generation_size, old_generation_size)
    pub fn stats(&self) -> (usize, usize) {
        let heap = self.heap.borrow();
        (heap.young_generation_size(), heap.old_generation_size())
    }

    /// Get detailed GC statistics
    pub fn gc_stats(&self) -> memory_manager::GcStats {
        self.heap.borrow().stats().clone()
    }

    /// Get total memory usage
    pub fn total_memory(&self) -> usize {
        self.heap.borrow().total_memory()
    }

    /// Get the number of young GC collections performed
    pub fn young_gc_count(&self) -> u64 {
        self.heap.borrow().stats().young_gc_count
    }

    /// Get the number of full GC collections performed
    pub fn old_gc_count(&self) -> u64 {
        self.heap.borrow().stats().old_gc_count
    }

    /// Reset GC statistics
    pub fn reset_stats(&self) {
        self.heap.borrow_mut().reset_stats();
    }

    /// Get shared heap reference (for advanced operations)
    pub fn heap_ref(&self) -> Rc<RefCell<Heap>> {
        Rc::clone(&self.heap)
    }
}

impl Default for VMHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VMHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (young, old) = self.stats();
        f.debug_struct("VMHeap")
            .field("young_generation_size", &young)
            .field("old_generation_size", &old)
            .finish()
    }
}
