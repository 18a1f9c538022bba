//! Write barrier hook for generational GC
//!
//! Full remembered-set maintenance and tri-color marking live inside the
//! (opaque, out of scope here) collector; this is the stable hook point
//! every pointer-field write in the interpreter goes through, so swapping
//! in a real generational collector later doesn't require touching call
//! sites.

use core_types::Value;

/// Opaque handle to a heap-allocated object, as seen by a write barrier.
pub struct Object;

/// Record a write of `new_val` into `slot`, owned by `obj`.
///
/// # Safety
/// - `obj` must point to a valid heap object for the duration of the call
/// - `slot` must point to valid, properly aligned `Value` storage within it
pub unsafe fn write_barrier(_obj: *mut Object, slot: *mut Value, new_val: Value) {
    *slot = new_val;
}
