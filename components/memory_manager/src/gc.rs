//! Garbage collection algorithms and policies
//!
//! Implements generational garbage collection with:
//! - Young generation (nursery) for short-lived objects
//! - Old generation for long-lived objects
//! - Promotion policies for objects that survive collections

// TODO: Implement GC algorithms
// - Mark and sweep for old generation
// - Copying collector for young generation
// - Promotion thresholds and policies
