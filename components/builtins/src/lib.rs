//! ECMAScript 2024 standard library implementation
//!
//! This crate provides the built-in objects and prototypes for a JavaScript runtime:
//! - Object.prototype methods
//! - Array.prototype methods
//! - String.prototype methods
//! - Number.prototype methods
//! - Math object
//! - JSON object
//! - Console object
//!
//! # Example
//!
//! ```
//! use builtins::{JsValue, ArrayPrototype, MathObject};
//!
//! // Create an array and use prototype methods
//! let arr = JsValue::array_from(vec![
//!     JsValue::number(1.0),
//!     JsValue::number(2.0),
//!     JsValue::number(3.0),
//! ]);
//!
//! let sum = ArrayPrototype::reduce(&arr, JsValue::number(0.0), |acc, v| {
//!     Ok(JsValue::number(acc.as_number().unwrap() + v.as_number().unwrap()))
//! }).unwrap();
//!
//! assert_eq!(sum.as_number().unwrap(), 6.0);
//!
//! // Use Math methods
//! assert_eq!(MathObject::sqrt(16.0), 4.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod async_generator;
pub mod bigint;
pub mod collections;
pub mod console;
pub mod date;
pub mod error;
pub mod intl;
pub mod iterator;
pub mod json;
pub mod math;
pub mod number;
pub mod object;
pub mod proxy;
pub mod reflect;
pub mod regexp;
pub mod string;
pub mod symbol;
pub mod typed_arrays;
pub mod value;
pub mod weakref;

// Re-export main types for convenience
pub use array::ArrayPrototype;
pub use async_generator::{
    AsyncGeneratorFunction, AsyncGeneratorObject, AsyncGeneratorPromise, AsyncGeneratorState,
    AsyncIteratorHelper,
};
pub use bigint::{BigIntConstructor, BigIntPrototype};
pub use collections::{MapIterator, MapObject, SetIterator, SetObject, WeakMapObject, WeakSetObject};
pub use console::ConsoleObject;
pub use date::{DateConstructor, JsDate};
pub use error::{ErrorConstructor, ErrorKind, JsErrorObject, StackFrame};
pub use intl::{
    CaseFirst, Collator, CollatorOptions, CollatorSensitivity, CollatorUsage,
    CompactDisplay, CurrencyDisplay, DateTimeFormat, DateTimeFormatOptions, DateTimeStyle,
    HourCycle, Intl, ListFormat, ListFormatOptions, ListFormatStyle, ListFormatType, Locale,
    Notation, NumberFormat, NumberFormatOptions, NumberStyle, PluralCategory, PluralRules,
    PluralRulesOptions, PluralRulesType, RelativeTimeFormat, RelativeTimeFormatOptions,
    RelativeTimeNumeric, RelativeTimeStyle, RelativeTimeUnit, SignDisplay,
};
pub use iterator::{
    ArrayIterator, GeneratorFunction, GeneratorObject, GeneratorState, Iterator,
    IteratorHelpers, IteratorKind, IteratorProtocol, IteratorResult, ObjectIterator,
    StringIterator,
};
pub use json::JSONObject;
pub use math::MathObject;
pub use number::NumberPrototype;
pub use object::ObjectPrototype;
pub use proxy::{ProxyHandler, ProxyObject};
pub use reflect::ReflectObject;
pub use regexp::{RegExpMatch, RegExpObject};
pub use string::StringPrototype;
pub use symbol::{SymbolConstructor, SymbolValue};
pub use typed_arrays::{
    ArrayBuffer, BigInt64Array, BigUint64Array, DataView, Float32Array, Float64Array, Int16Array,
    Int32Array, Int8Array, TypedArray, TypedArrayKind, TypedArrayValue, Uint16Array, Uint32Array,
    Uint8Array, Uint8ClampedArray,
};
pub use value::{BigIntValue, JsError, JsResult, JsValue};
pub use weakref::{
    FinalizationRegistryData, FinalizationRegistryObject, WeakObjectRef, WeakRefData,
    WeakRefObject,
};
