//! Constant-pool value representation
//!
//! This is deliberately a smaller, serializable sibling of
//! `core_types::Value`: it only represents values that can appear as
//! bytecode literals (including the function index a `CreateClosure`
//! constant needs to describe). The interpreter converts these into live
//! `core_types::Value`s (with `Rc`/`RefCell` handles, shared BigInts, etc.)
//! as they're loaded off the constant pool.
use num_bigint::BigInt;

/// A captured-function literal stored in the constant pool.
///
/// Closures themselves (with their bound upvalues) are materialized at
/// runtime; this only records which function body they point to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureData {
    /// Index of the function this closure wraps, in the enclosing
    /// chunk's `nested_functions` table.
    pub function_index: usize,
}

impl ClosureData {
    /// Create closure data pointing at the given function index
    pub fn new(function_index: usize) -> Self {
        Self { function_index }
    }
}

/// Bytecode constant-pool value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JavaScript undefined
    Undefined,
    /// JavaScript null
    Null,
    /// JavaScript boolean
    Boolean(bool),
    /// JavaScript number (IEEE 754 double)
    Number(f64),
    /// JavaScript string
    String(String),
    /// Arbitrary-precision integer literal
    BigInt(BigInt),
    /// Closure literal (function index only; upvalues are bound at runtime)
    Closure(ClosureData),
}

impl Value {
    /// Check if value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Try to get the number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Encode value to bytes for serialization
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        match self {
            Value::Undefined => bytes.push(0),
            Value::Null => bytes.push(1),
            Value::Boolean(b) => {
                bytes.push(2);
                bytes.push(if *b { 1 } else { 0 });
            }
            Value::Number(n) => {
                bytes.push(3);
                bytes.extend_from_slice(&n.to_le_bytes());
            }
            Value::String(s) => {
                bytes.push(4);
                let s_bytes = s.as_bytes();
                bytes.extend_from_slice(&(s_bytes.len() as u32).to_le_bytes());
                bytes.extend_from_slice(s_bytes);
            }
            Value::BigInt(n) => {
                bytes.push(5);
                let digits = n.to_signed_bytes_le();
                bytes.extend_from_slice(&(digits.len() as u32).to_le_bytes());
                bytes.extend_from_slice(&digits);
            }
            Value::Closure(closure) => {
                bytes.push(6);
                bytes.extend_from_slice(&(closure.function_index as u32).to_le_bytes());
            }
        }
        bytes
    }

    /// Decode value from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), String> {
        if bytes.is_empty() {
            return Err("Empty bytes".to_string());
        }

        let tag = bytes[0];
        match tag {
            0 => Ok((Value::Undefined, 1)),
            1 => Ok((Value::Null, 1)),
            2 => {
                if bytes.len() < 2 {
                    return Err("Not enough bytes for boolean".to_string());
                }
                Ok((Value::Boolean(bytes[1] != 0), 2))
            }
            3 => {
                if bytes.len() < 9 {
                    return Err("Not enough bytes for number".to_string());
                }
                let n = f64::from_le_bytes(bytes[1..9].try_into().unwrap());
                Ok((Value::Number(n), 9))
            }
            4 => {
                if bytes.len() < 5 {
                    return Err("Not enough bytes for string length".to_string());
                }
                let len = u32::from_le_bytes(bytes[1..5].try_into().unwrap()) as usize;
                if bytes.len() < 5 + len {
                    return Err("Not enough bytes for string content".to_string());
                }
                let s = String::from_utf8(bytes[5..5 + len].to_vec())
                    .map_err(|e| format!("Invalid UTF-8: {}", e))?;
                Ok((Value::String(s), 5 + len))
            }
            5 => {
                if bytes.len() < 5 {
                    return Err("Not enough bytes for bigint length".to_string());
                }
                let len = u32::from_le_bytes(bytes[1..5].try_into().unwrap()) as usize;
                if bytes.len() < 5 + len {
                    return Err("Not enough bytes for bigint digits".to_string());
                }
                let n = BigInt::from_signed_bytes_le(&bytes[5..5 + len]);
                Ok((Value::BigInt(n), 5 + len))
            }
            6 => {
                if bytes.len() < 5 {
                    return Err("Not enough bytes for closure function index".to_string());
                }
                let idx = u32::from_le_bytes(bytes[1..5].try_into().unwrap()) as usize;
                Ok((Value::Closure(ClosureData::new(idx)), 5))
            }
            _ => Err(format!("Unknown value tag: {}", tag)),
        }
    }
}
