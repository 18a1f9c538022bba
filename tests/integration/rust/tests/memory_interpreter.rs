//! Memory Manager and Interpreter Integration Tests
//!
//! Tests the integration between memory_manager and interpreter components.
//! Verifies that the heap, hidden-class shape tree, and JSObject layout
//! compose the way the interpreter relies on them to.

use core_types::Value;
use memory_manager::{HiddenClass, Heap, JSObject};

#[test]
fn test_heap_allocation() {
    let mut heap = Heap::new();

    let ptr = heap.allocate(128);
    assert!(!ptr.is_null(), "Heap allocation should not return null");
    assert!(heap.young_generation_size() > 0);
}

#[test]
fn test_jsobject_properties() {
    let mut obj = JSObject::with_empty_shape();

    obj.set_property("x".to_string(), Value::Smi(10));
    obj.set_property("y".to_string(), Value::Smi(20));
    obj.set_property("z".to_string(), Value::Smi(30));

    assert_eq!(obj.get_property("x"), Some(Value::Smi(10)));
    assert_eq!(obj.get_property("y"), Some(Value::Smi(20)));
    assert_eq!(obj.get_property("z"), Some(Value::Smi(30)));
    assert_eq!(obj.get_property("w"), None);
}

#[test]
fn test_hidden_class_transitions() {
    use memory_manager::PropertyAttributes;

    let class1 = HiddenClass::new();
    let class2 = class1.add_property("name", PropertyAttributes::default());
    let class3 = class2.add_property("age", PropertyAttributes::default());
    let class4 = class3.add_property("email", PropertyAttributes::default());

    assert_eq!(class4.lookup_property("name"), Some(0));
    assert_eq!(class4.lookup_property("age"), Some(1));
    assert_eq!(class4.lookup_property("email"), Some(2));
    assert_eq!(class4.lookup_property("phone"), None);
}

#[test]
fn test_multiple_objects_same_shape() {
    let class = HiddenClass::new();
    let mut obj1 = JSObject::new(class.clone());
    let mut obj2 = JSObject::new(class);

    obj1.set_property("value".to_string(), Value::Smi(100));
    obj2.set_property("value".to_string(), Value::Smi(200));

    assert_eq!(obj1.get_property("value"), Some(Value::Smi(100)));
    assert_eq!(obj2.get_property("value"), Some(Value::Smi(200)));
}

#[test]
fn test_heap_garbage_collection() {
    let mut heap = Heap::new();

    let _ptr1 = heap.allocate(64);
    let _ptr2 = heap.allocate(128);
    let _ptr3 = heap.allocate(256);

    heap.collect_garbage();
    assert_eq!(heap.stats().young_gc_count, 1);

    let ptr4 = heap.allocate(64);
    assert!(!ptr4.is_null(), "Should be able to allocate after GC");
}

#[test]
fn test_jsobject_different_value_types() {
    let mut obj = JSObject::with_empty_shape();

    obj.set_property("number".to_string(), Value::Smi(42));
    obj.set_property("boolean".to_string(), Value::Boolean(true));
    obj.set_property("null_val".to_string(), Value::Null);
    obj.set_property("undefined".to_string(), Value::Undefined);

    assert_eq!(obj.get_property("number"), Some(Value::Smi(42)));
    assert_eq!(obj.get_property("boolean"), Some(Value::Boolean(true)));
    assert_eq!(obj.get_property("null_val"), Some(Value::Null));
    assert_eq!(obj.get_property("undefined"), Some(Value::Undefined));
}

#[test]
fn test_heap_generation_sizes() {
    let heap = Heap::new();

    let young_size = heap.young_generation_size();
    let old_size = heap.old_generation_size();

    assert!(young_size > 0, "Young generation should have positive size");
    assert_eq!(old_size, 0, "Old generation starts empty until a promotion occurs");
}

#[test]
fn test_jsobject_property_overwrite() {
    let mut obj = JSObject::with_empty_shape();

    obj.set_property("counter".to_string(), Value::Smi(0));
    assert_eq!(obj.get_property("counter"), Some(Value::Smi(0)));

    obj.set_property("counter".to_string(), Value::Smi(100));
    assert_eq!(obj.get_property("counter"), Some(Value::Smi(100)));
}

#[test]
fn test_hidden_class_lookup_performance() {
    use memory_manager::PropertyAttributes;

    let mut class = HiddenClass::new();
    for i in 0..100 {
        class = class.add_property(&format!("prop{}", i), PropertyAttributes::default());
    }

    for i in 0..100 {
        let offset = class.lookup_property(&format!("prop{}", i));
        assert_eq!(offset, Some(i as u32), "prop{} should have offset {}", i, i);
    }
    assert_eq!(class.lookup_property("nonexistent"), None);
}

#[test]
fn test_multiple_heap_allocations() {
    let mut heap = Heap::new();
    let mut ptrs = Vec::new();

    for size in [32, 64, 128, 256, 512] {
        let ptr = heap.allocate(size);
        assert!(!ptr.is_null(), "Allocation of {} bytes failed", size);
        ptrs.push(ptr);
    }

    assert_eq!(heap.young_generation_size(), 32 + 64 + 128 + 256 + 512);
}

#[test]
fn test_value_truthiness_in_object() {
    let mut obj = JSObject::with_empty_shape();

    obj.set_property("truthy_num".to_string(), Value::Smi(42));
    obj.set_property("falsy_zero".to_string(), Value::Smi(0));
    obj.set_property("truthy_bool".to_string(), Value::Boolean(true));
    obj.set_property("falsy_bool".to_string(), Value::Boolean(false));

    if let Some(Value::Smi(n)) = obj.get_property("truthy_num") {
        assert!(n != 0, "Truthy number should not be zero");
    }
    if let Some(Value::Smi(n)) = obj.get_property("falsy_zero") {
        assert_eq!(n, 0, "Falsy zero should be zero");
    }
    if let Some(Value::Boolean(b)) = obj.get_property("truthy_bool") {
        assert!(b, "Truthy bool should be true");
    }
    if let Some(Value::Boolean(b)) = obj.get_property("falsy_bool") {
        assert!(!b, "Falsy bool should be false");
    }
}

#[test]
fn test_property_deletion_falls_back_to_dictionary_mode() {
    let mut obj = JSObject::with_empty_shape();
    obj.set_property("a".to_string(), Value::Smi(1));
    obj.set_property("b".to_string(), Value::Smi(2));

    assert!(obj.delete_property("a"));
    assert!(obj.is_dictionary_mode());
    assert_eq!(obj.get_property("a"), None);
    assert_eq!(obj.get_property("b"), Some(Value::Smi(2)));
}
