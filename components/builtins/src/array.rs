//! Array.prototype methods

use crate::value::{JsError, JsResult, JsValue};

/// Array.prototype methods
pub struct ArrayPrototype;

impl ArrayPrototype {
    /// Array.prototype.push(element)
    pub fn push(arr: &JsValue, element: JsValue) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            data.elements.push(element);
            Ok(JsValue::number(data.elements.len() as f64))
        } else {
            Err(JsError::type_error("push called on non-array"))
        }
    }

    /// Array.prototype.pop()
    pub fn pop(arr: &JsValue) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            Ok(data.elements.pop().unwrap_or(JsValue::undefined()))
        } else {
            Err(JsError::type_error("pop called on non-array"))
        }
    }

    /// Array.prototype.shift()
    pub fn shift(arr: &JsValue) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            if data.elements.is_empty() {
                Ok(JsValue::undefined())
            } else {
                Ok(data.elements.remove(0))
            }
        } else {
            Err(JsError::type_error("shift called on non-array"))
        }
    }

    /// Array.prototype.unshift(element)
    pub fn unshift(arr: &JsValue, element: JsValue) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            data.elements.insert(0, element);
            Ok(JsValue::number(data.elements.len() as f64))
        } else {
            Err(JsError::type_error("unshift called on non-array"))
        }
    }

    /// Array.prototype.slice(start, end)
    pub fn slice(arr: &JsValue, start: i32, end: Option<i32>) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            let len = data.elements.len() as i32;

            let start_idx = if start < 0 {
                (len + start).max(0) as usize
            } else {
                start.min(len) as usize
            };

            let end_idx = match end {
                Some(e) if e < 0 => (len + e).max(0) as usize,
                Some(e) => e.min(len) as usize,
                None => len as usize,
            };

            let sliced: Vec<JsValue> = if start_idx < end_idx {
                data.elements[start_idx..end_idx].to_vec()
            } else {
                Vec::new()
            };

            Ok(JsValue::array_from(sliced))
        } else {
            Err(JsError::type_error("slice called on non-array"))
        }
    }

    /// Array.prototype.splice(start, deleteCount, ...items)
    pub fn splice(
        arr: &JsValue,
        start: i32,
        delete_count: usize,
        items: Vec<JsValue>,
    ) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            let len = data.elements.len() as i32;

            let start_idx = if start < 0 {
                (len + start).max(0) as usize
            } else {
                start.min(len) as usize
            };

            let actual_delete = delete_count.min(data.elements.len() - start_idx);

            // Remove elements
            let removed: Vec<JsValue> = data.elements.drain(start_idx..start_idx + actual_delete).collect();

            // Insert new elements
            for (i, item) in items.into_iter().enumerate() {
                data.elements.insert(start_idx + i, item);
            }

            Ok(JsValue::array_from(removed))
        } else {
            Err(JsError::type_error("splice called on non-array"))
        }
    }

    /// Array.prototype.map(callback)
    pub fn map<F>(arr: &JsValue, callback: F) -> JsResult<JsValue>
    where
        F: Fn(JsValue) -> JsResult<JsValue>,
    {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            let mut result = Vec::new();
            for element in &data.elements {
                result.push(callback(element.clone())?);
            }
            Ok(JsValue::array_from(result))
        } else {
            Err(JsError::type_error("map called on non-array"))
        }
    }

    /// Array.prototype.filter(callback)
    pub fn filter<F>(arr: &JsValue, callback: F) -> JsResult<JsValue>
    where
        F: Fn(&JsValue) -> JsResult<bool>,
    {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            let mut result = Vec::new();
            for element in &data.elements {
                if callback(element)? {
                    result.push(element.clone());
                }
            }
            Ok(JsValue::array_from(result))
        } else {
            Err(JsError::type_error("filter called on non-array"))
        }
    }

    /// Array.prototype.reduce(callback, initialValue)
    pub fn reduce<F>(arr: &JsValue, initial: JsValue, callback: F) -> JsResult<JsValue>
    where
        F: Fn(JsValue, JsValue) -> JsResult<JsValue>,
    {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            let mut accumulator = initial;
            for element in &data.elements {
                accumulator = callback(accumulator, element.clone())?;
            }
            Ok(accumulator)
        } else {
            Err(JsError::type_error("reduce called on non-array"))
        }
    }

    /// Array.prototype.forEach(callback)
    pub fn for_each<F>(arr: &JsValue, callback: F) -> JsResult<()>
    where
        F: Fn(&JsValue) -> JsResult<()>,
    {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            for element in &data.elements {
                callback(element)?;
            }
            Ok(())
        } else {
            Err(JsError::type_error("forEach called on non-array"))
        }
    }

    /// Array.prototype.find(callback)
    pub fn find<F>(arr: &JsValue, callback: F) -> JsResult<JsValue>
    where
        F: Fn(&JsValue) -> JsResult<bool>,
    {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            for element in &data.elements {
                if callback(element)? {
                    return Ok(element.clone());
                }
            }
            Ok(JsValue::undefined())
        } else {
            Err(JsError::type_error("find called on non-array"))
        }
    }

    /// Array.prototype.findIndex(callback)
    pub fn find_index<F>(arr: &JsValue, callback: F) -> JsResult<i32>
    where
        F: Fn(&JsValue) -> JsResult<bool>,
    {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            for (i, element) in data.elements.iter().enumerate() {
                if callback(element)? {
                    return Ok(i as i32);
                }
            }
            Ok(-1)
        } else {
            Err(JsError::type_error("findIndex called on non-array"))
        }
    }

    /// Array.prototype.includes(value)
    pub fn includes(arr: &JsValue, value: &JsValue) -> bool {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            data.elements.iter().any(|e| e.equals(value))
        } else {
            false
        }
    }

    /// Array.prototype.indexOf(value)
    pub fn index_of(arr: &JsValue, value: &JsValue) -> Option<usize> {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            data.elements.iter().position(|e| e.equals(value))
        } else {
            None
        }
    }

    /// Array.prototype.join(separator)
    pub fn join(arr: &JsValue, separator: &str) -> JsResult<String> {
        if let JsValue::Array(array_data) = arr {
            let data = array_data.borrow();
            let strings: Vec<String> = data.elements.iter().map(|e| e.to_js_string()).collect();
            Ok(strings.join(separator))
        } else {
            Err(JsError::type_error("join called on non-array"))
        }
    }

    /// Array.prototype.sort()
    pub fn sort(arr: &JsValue) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            // Sort by string conversion (default JS behavior)
            data.elements.sort_by(|a, b| {
                a.to_js_string().cmp(&b.to_js_string())
            });
            Ok(arr.clone())
        } else {
            Err(JsError::type_error("sort called on non-array"))
        }
    }

    /// Array.prototype.reverse()
    pub fn reverse(arr: &JsValue) -> JsResult<JsValue> {
        if let JsValue::Array(array_data) = arr {
            let mut data = array_data.borrow_mut();
            data.elements.reverse();
            Ok(arr.clone())
        } else {
            Err(JsError::type_error("reverse called on non-array"))
        }
    }
}
