//! Map and Set collection implementations
//!
//! ES2024 compliant Map and Set built-in objects with SameValueZero semantics
//! and insertion order preservation.

use crate::value::{JsError, JsResult, JsValue};

/// Map built-in object
///
/// Implements ES2024 Map with:
/// - SameValueZero key comparison (NaN === NaN, -0 === +0)
/// - Insertion order preservation
/// - Support for any value type as keys
pub struct MapObject;

impl MapObject {
    /// Create a new empty Map
    pub fn new() -> JsValue {
        JsValue::map()
    }

    /// Create a Map from key-value pairs
    pub fn from_entries(entries: Vec<(JsValue, JsValue)>) -> JsValue {
        let map = Self::new();
        for (key, value) in entries {
            Self::set(&map, key, value);
        }
        map
    }

    /// Get the size of the Map
    pub fn size(map: &JsValue) -> usize {
        if let JsValue::Map(data) = map {
            data.borrow().entries.len()
        } else {
            0
        }
    }

    /// Set a key-value pair in the Map
    ///
    /// Returns the Map for chaining
    pub fn set(map: &JsValue, key: JsValue, value: JsValue) -> JsValue {
        if let JsValue::Map(data) = map {
            let mut map_data = data.borrow_mut();

            // Check if key already exists using SameValueZero
            if let Some(index) = map_data
                .entries
                .iter()
                .position(|(k, _)| k.same_value_zero(&key))
            {
                // Update existing entry (preserves insertion order)
                map_data.entries[index].1 = value;
            } else {
                // Add new entry
                map_data.entries.push((key, value));
            }
        }
        map.clone()
    }

    /// Get a value from the Map
    ///
    /// Returns None if key not found (JavaScript returns undefined)
    pub fn get(map: &JsValue, key: &JsValue) -> Option<JsValue> {
        if let JsValue::Map(data) = map {
            let map_data = data.borrow();
            map_data
                .entries
                .iter()
                .find(|(k, _)| k.same_value_zero(key))
                .map(|(_, v)| v.clone())
        } else {
            None
        }
    }

    /// Check if the Map has a key
    pub fn has(map: &JsValue, key: &JsValue) -> bool {
        if let JsValue::Map(data) = map {
            let map_data = data.borrow();
            map_data
                .entries
                .iter()
                .any(|(k, _)| k.same_value_zero(key))
        } else {
            false
        }
    }

    /// Delete a key from the Map
    ///
    /// Returns true if the key was found and deleted, false otherwise
    pub fn delete(map: &JsValue, key: &JsValue) -> bool {
        if let JsValue::Map(data) = map {
            let mut map_data = data.borrow_mut();
            if let Some(index) = map_data
                .entries
                .iter()
                .position(|(k, _)| k.same_value_zero(key))
            {
                map_data.entries.remove(index);
                true
            } else {
                false
            }
        } else {
            false
        }
    }

    /// Clear all entries from the Map
    pub fn clear(map: &JsValue) {
        if let JsValue::Map(data) = map {
            data.borrow_mut().entries.clear();
        }
    }

    /// Get all keys in insertion order
    pub fn keys(map: &JsValue) -> Vec<JsValue> {
        if let JsValue::Map(data) = map {
            data.borrow()
                .entries
                .iter()
                .map(|(k, _)| k.clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get all values in insertion order
    pub fn values(map: &JsValue) -> Vec<JsValue> {
        if let JsValue::Map(data) = map {
            data.borrow()
                .entries
                .iter()
                .map(|(_, v)| v.clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get all entries as (key, value) tuples in insertion order
    pub fn entries(map: &JsValue) -> Vec<(JsValue, JsValue)> {
        if let JsValue::Map(data) = map {
            data.borrow().entries.clone()
        } else {
            Vec::new()
        }
    }

    /// Execute a callback for each entry
    pub fn for_each<F>(map: &JsValue, mut callback: F) -> JsResult<()>
    where
        F: FnMut(&JsValue, &JsValue) -> JsResult<()>,
    {
        if let JsValue::Map(data) = map {
            let entries = data.borrow().entries.clone();
            for (key, value) in entries {
                callback(&key, &value)?;
            }
            Ok(())
        } else {
            Err(JsError::type_error("forEach called on non-Map"))
        }
    }

    /// Create an iterator over the Map entries
    pub fn iter(map: &JsValue) -> MapIterator {
        MapIterator::new(map)
    }
}

/// Iterator for Map entries
pub struct MapIterator {
    entries: Vec<(JsValue, JsValue)>,
    index: usize,
}

impl MapIterator {
    fn new(map: &JsValue) -> Self {
        let entries = MapObject::entries(map);
        MapIterator { entries, index: 0 }
    }
}

impl Iterator for MapIterator {
    type Item = (JsValue, JsValue);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.entries.len() {
            let entry = self.entries[self.index].clone();
            self.index += 1;
            Some(entry)
        } else {
            None
        }
    }
}

/// Set built-in object
///
/// Implements ES2024 Set with:
/// - SameValueZero value comparison (NaN === NaN, -0 === +0)
/// - Insertion order preservation
/// - Support for any value type
pub struct SetObject;

impl SetObject {
    /// Create a new empty Set
    pub fn new() -> JsValue {
        JsValue::set_collection()
    }

    /// Create a Set from values (automatically deduplicates)
    pub fn from_values(values: Vec<JsValue>) -> JsValue {
        let set = Self::new();
        for value in values {
            Self::add(&set, value);
        }
        set
    }

    /// Get the size of the Set
    pub fn size(set: &JsValue) -> usize {
        if let JsValue::Set(data) = set {
            data.borrow().values.len()
        } else {
            0
        }
    }

    /// Add a value to the Set
    ///
    /// Returns the Set for chaining
    pub fn add(set: &JsValue, value: JsValue) -> JsValue {
        if let JsValue::Set(data) = set {
            let mut set_data = data.borrow_mut();

            // Check if value already exists using SameValueZero
            if !set_data
                .values
                .iter()
                .any(|v| v.same_value_zero(&value))
            {
                set_data.values.push(value);
            }
        }
        set.clone()
    }

    /// Check if the Set has a value
    pub fn has(set: &JsValue, value: &JsValue) -> bool {
        if let JsValue::Set(data) = set {
            let set_data = data.borrow();
            set_data
                .values
                .iter()
                .any(|v| v.same_value_zero(value))
        } else {
            false
        }
    }

    /// Delete a value from the Set
    ///
    /// Returns true if the value was found and deleted, false otherwise
    pub fn delete(set: &JsValue, value: &JsValue) -> bool {
        if let JsValue::Set(data) = set {
            let mut set_data = data.borrow_mut();
            if let Some(index) = set_data
                .values
                .iter()
                .position(|v| v.same_value_zero(value))
            {
                set_data.values.remove(index);
                true
            } else {
                false
            }
        } else {
            false
        }
    }

    /// Clear all values from the Set
    pub fn clear(set: &JsValue) {
        if let JsValue::Set(data) = set {
            data.borrow_mut().values.clear();
        }
    }

    /// Get all values in insertion order
    ///
    /// This is the same as keys() for Set (for consistency with JS API)
    pub fn values(set: &JsValue) -> Vec<JsValue> {
        if let JsValue::Set(data) = set {
            data.borrow().values.clone()
        } else {
            Vec::new()
        }
    }

    /// Get all keys in insertion order
    ///
    /// For Set, keys() is an alias for values()
    pub fn keys(set: &JsValue) -> Vec<JsValue> {
        Self::values(set)
    }

    /// Get all entries as (value, value) tuples
    ///
    /// For Set, entries are [value, value] pairs for consistency with Map
    pub fn entries(set: &JsValue) -> Vec<(JsValue, JsValue)> {
        if let JsValue::Set(data) = set {
            data.borrow()
                .values
                .iter()
                .map(|v| (v.clone(), v.clone()))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Execute a callback for each value
    pub fn for_each<F>(set: &JsValue, mut callback: F) -> JsResult<()>
    where
        F: FnMut(&JsValue) -> JsResult<()>,
    {
        if let JsValue::Set(data) = set {
            let values = data.borrow().values.clone();
            for value in values {
                callback(&value)?;
            }
            Ok(())
        } else {
            Err(JsError::type_error("forEach called on non-Set"))
        }
    }

    /// Create an iterator over the Set values
    pub fn iter(set: &JsValue) -> SetIterator {
        SetIterator::new(set)
    }
}

/// Iterator for Set values
pub struct SetIterator {
    values: Vec<JsValue>,
    index: usize,
}

impl SetIterator {
    fn new(set: &JsValue) -> Self {
        let values = SetObject::values(set);
        SetIterator { values, index: 0 }
    }
}

impl Iterator for SetIterator {
    type Item = JsValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.values.len() {
            let value = self.values[self.index].clone();
            self.index += 1;
            Some(value)
        } else {
            None
        }
    }
}

/// WeakMap built-in object
///
/// Implements ES2024 WeakMap with:
/// - Only objects as keys (not primitives)
/// - Weak references to keys (keys can be garbage collected)
/// - No size property (because of weak references)
/// - No iteration methods (keys are weakly held)
pub struct WeakMapObject;

impl WeakMapObject {
    /// Create a new empty WeakMap
    pub fn new() -> JsValue {
        JsValue::weak_map()
    }

    /// Create a WeakMap from key-value pairs
    ///
    /// Returns an error if any key is not an object.
    pub fn from_entries(entries: Vec<(JsValue, JsValue)>) -> JsResult<JsValue> {
        let weak_map = Self::new();
        for (key, value) in entries {
            Self::set(&weak_map, key, value)?;
        }
        Ok(weak_map)
    }

    /// Set a key-value pair in the WeakMap
    ///
    /// Returns the WeakMap for chaining.
    /// Returns TypeError if key is not an object.
    pub fn set(weak_map: &JsValue, key: JsValue, value: JsValue) -> JsResult<JsValue> {
        // Key must be an object
        let key_id = key
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used as weak map key"))?;

        if let JsValue::WeakMap(data) = weak_map {
            let mut weak_map_data = data.borrow_mut();
            weak_map_data.entries.insert(key_id, value);
        }
        Ok(weak_map.clone())
    }

    /// Get a value from the WeakMap
    ///
    /// Returns None if key not found (JavaScript returns undefined).
    /// Returns TypeError if key is not an object.
    pub fn get(weak_map: &JsValue, key: &JsValue) -> JsResult<Option<JsValue>> {
        // Key must be an object
        let key_id = key
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used as weak map key"))?;

        if let JsValue::WeakMap(data) = weak_map {
            let weak_map_data = data.borrow();
            Ok(weak_map_data.entries.get(&key_id).cloned())
        } else {
            Ok(None)
        }
    }

    /// Check if the WeakMap has a key
    ///
    /// Returns TypeError if key is not an object.
    pub fn has(weak_map: &JsValue, key: &JsValue) -> JsResult<bool> {
        // Key must be an object
        let key_id = key
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used as weak map key"))?;

        if let JsValue::WeakMap(data) = weak_map {
            let weak_map_data = data.borrow();
            Ok(weak_map_data.entries.contains_key(&key_id))
        } else {
            Ok(false)
        }
    }

    /// Delete a key from the WeakMap
    ///
    /// Returns true if the key was found and deleted, false otherwise.
    /// Returns TypeError if key is not an object.
    pub fn delete(weak_map: &JsValue, key: &JsValue) -> JsResult<bool> {
        // Key must be an object
        let key_id = key
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used as weak map key"))?;

        if let JsValue::WeakMap(data) = weak_map {
            let mut weak_map_data = data.borrow_mut();
            Ok(weak_map_data.entries.remove(&key_id).is_some())
        } else {
            Ok(false)
        }
    }
}

/// WeakSet built-in object
///
/// Implements ES2024 WeakSet with:
/// - Only objects as values (not primitives)
/// - Weak references to values (values can be garbage collected)
/// - No size property (because of weak references)
/// - No iteration methods (values are weakly held)
pub struct WeakSetObject;

impl WeakSetObject {
    /// Create a new empty WeakSet
    pub fn new() -> JsValue {
        JsValue::weak_set()
    }

    /// Create a WeakSet from values
    ///
    /// Returns an error if any value is not an object.
    pub fn from_values(values: Vec<JsValue>) -> JsResult<JsValue> {
        let weak_set = Self::new();
        for value in values {
            Self::add(&weak_set, value)?;
        }
        Ok(weak_set)
    }

    /// Add a value to the WeakSet
    ///
    /// Returns the WeakSet for chaining.
    /// Returns TypeError if value is not an object.
    pub fn add(weak_set: &JsValue, value: JsValue) -> JsResult<JsValue> {
        // Value must be an object
        let value_id = value
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used in weak set"))?;

        if let JsValue::WeakSet(data) = weak_set {
            let mut weak_set_data = data.borrow_mut();
            weak_set_data.values.insert(value_id, ());
        }
        Ok(weak_set.clone())
    }

    /// Check if the WeakSet has a value
    ///
    /// Returns TypeError if value is not an object.
    pub fn has(weak_set: &JsValue, value: &JsValue) -> JsResult<bool> {
        // Value must be an object
        let value_id = value
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used in weak set"))?;

        if let JsValue::WeakSet(data) = weak_set {
            let weak_set_data = data.borrow();
            Ok(weak_set_data.values.contains_key(&value_id))
        } else {
            Ok(false)
        }
    }

    /// Delete a value from the WeakSet
    ///
    /// Returns true if the value was found and deleted, false otherwise.
    /// Returns TypeError if value is not an object.
    pub fn delete(weak_set: &JsValue, value: &JsValue) -> JsResult<bool> {
        // Value must be an object
        let value_id = value
            .object_identity()
            .ok_or_else(|| JsError::type_error("Invalid value used in weak set"))?;

        if let JsValue::WeakSet(data) = weak_set {
            let mut weak_set_data = data.borrow_mut();
            Ok(weak_set_data.values.remove(&value_id).is_some())
        } else {
            Ok(false)
        }
    }
}
