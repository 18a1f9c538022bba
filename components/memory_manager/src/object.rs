//! JavaScript object representation
//!
//! Provides the core JSObject type with hidden class-based property storage.
//! New properties append to a packed `properties` vector and transition the
//! object's hidden class; once a property is deleted the object falls back
//! to dictionary-mode storage (a plain map) rather than trying to patch
//! holes into the shape tree, matching how real engines treat deletion as
//! rare enough not to optimize for.

use std::collections::HashMap;
use std::rc::Rc;

use core_types::Value;

use crate::hidden_class::PropertyAttributes;
use crate::HiddenClass;

/// JavaScript object with hidden class-based property storage
pub struct JSObject {
    /// Hidden class describing this object's current shape
    pub class: Rc<HiddenClass>,
    /// Property values, indexed by hidden class offsets
    pub properties: Vec<Value>,
    /// Array elements (for array-like objects)
    pub elements: Vec<Value>,
    /// Dictionary-mode overflow storage, used once a property has been
    /// deleted from this object and shape-based offsets can no longer be
    /// trusted
    local_properties: HashMap<String, Value>,
    dictionary_mode: bool,
}

impl JSObject {
    /// Create a new object with the given hidden class
    pub fn new(class: Rc<HiddenClass>) -> Self {
        JSObject {
            class,
            properties: Vec::new(),
            elements: Vec::new(),
            local_properties: HashMap::new(),
            dictionary_mode: false,
        }
    }

    /// Create a new object rooted at the empty shape
    pub fn with_empty_shape() -> Self {
        Self::new(HiddenClass::root())
    }

    /// Get a property value by name
    pub fn get_property(&self, name: &str) -> Option<Value> {
        if self.dictionary_mode {
            return self.local_properties.get(name).cloned();
        }

        if let Some(offset) = self.class.lookup_property(name) {
            return self.properties.get(offset as usize).cloned();
        }

        None
    }

    /// Set a property value by name
    ///
    /// Transitions to a new hidden class when adding a property that isn't
    /// already part of this object's shape.
    pub fn set_property(&mut self, name: String, value: Value) {
        if self.dictionary_mode {
            self.local_properties.insert(name, value);
            return;
        }

        if let Some(offset) = self.class.lookup_property(&name) {
            let offset = offset as usize;
            if self.properties.len() <= offset {
                self.properties.resize(offset + 1, Value::Undefined);
            }
            self.properties[offset] = value;
            return;
        }

        self.class = self.class.add_property(&name, PropertyAttributes::default());
        self.properties.push(value);
    }

    /// Delete a property, falling back to dictionary-mode storage
    ///
    /// Returns `true` if the property existed.
    pub fn delete_property(&mut self, name: &str) -> bool {
        if self.dictionary_mode {
            return self.local_properties.remove(name).is_some();
        }

        if self.class.lookup_property(name).is_none() {
            return false;
        }

        self.enter_dictionary_mode();
        self.local_properties.remove(name);
        true
    }

    fn enter_dictionary_mode(&mut self) {
        for prop_name in self.class.property_names() {
            if let Some(offset) = self.class.lookup_property(&prop_name) {
                if let Some(value) = self.properties.get(offset as usize).cloned() {
                    self.local_properties.insert(prop_name, value);
                }
            }
        }
        self.properties.clear();
        self.class = HiddenClass::root();
        self.dictionary_mode = true;
    }

    /// Whether this object has fallen back to dictionary-mode storage
    pub fn is_dictionary_mode(&self) -> bool {
        self.dictionary_mode
    }
}
