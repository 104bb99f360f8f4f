//! JavaScript value representation.
//!
//! This module provides the core `Value` enum handed to builtins such as
//! `dbg`. Primitives are stored inline; arrays and plain objects carry their
//! elements so they can be rendered without access to a heap.

use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// Represents any JavaScript value.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let undefined = Value::Undefined;
/// let number = Value::Smi(42);
/// let float = Value::Double(3.14);
///
/// assert!(!undefined.is_truthy());
/// assert!(number.is_truthy());
/// assert_eq!(float.type_of(), "number");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JavaScript undefined value
    Undefined,
    /// JavaScript null value
    Null,
    /// JavaScript boolean (true or false)
    Boolean(bool),
    /// Small integer (fits in 32 bits, tagged representation)
    Smi(i32),
    /// IEEE 754 double-precision floating point
    Double(f64),
    /// JavaScript string value
    String(std::string::String),
    /// JavaScript BigInt (arbitrary precision integer)
    BigInt(BigInt),
    /// Array with its elements in index order
    Array(Vec<Value>),
    /// Plain object with its own enumerable properties in insertion order
    Object(Vec<(std::string::String, Value)>),
    /// Native function reference by name
    NativeFunction(std::string::String),
}

impl Value {
    /// Returns whether this value is truthy in JavaScript semantics.
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert!(!Value::Undefined.is_truthy());
    /// assert!(!Value::Smi(0).is_truthy());
    /// assert!(!Value::Double(f64::NAN).is_truthy());
    /// assert!(Value::Array(vec![]).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Smi(n) => *n != 0,
            Value::Double(n) => !n.is_nan() && *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::BigInt(n) => !n.is_zero(),
            Value::Array(_) | Value::Object(_) | Value::NativeFunction(_) => true,
        }
    }

    /// Returns the JavaScript typeof result for this value.
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert_eq!(Value::Null.type_of(), "object");
    /// assert_eq!(Value::NativeFunction("dbg".into()).type_of(), "function");
    /// ```
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object", // JavaScript quirk
            Value::Boolean(_) => "boolean",
            Value::Smi(_) | Value::Double(_) => "number",
            Value::String(_) => "string",
            Value::BigInt(_) => "bigint",
            Value::Array(_) | Value::Object(_) => "object",
            Value::NativeFunction(_) => "function",
        }
    }
}

/// Formats a double the way `Number.prototype.toString` does: plain
/// decimal while the decimal point falls within 21 digits and no more than
/// six zeros follow it, exponent notation otherwise.
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }
    if n == 0.0 {
        return write!(f, "0");
    }
    if n < 0.0 {
        write!(f, "-")?;
    }

    // Shortest round-trip digits, e.g. `1.2345e3`
    let sci = format!("{:e}", n.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    if k <= point && point <= 21 {
        write!(f, "{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        write!(f, "0.{}{}", "0".repeat(-point as usize), digits)
    } else {
        let exp = point - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            write!(f, "{}e{}{}", first, sign, exp.abs())
        } else {
            write!(f, "{}.{}e{}{}", first, rest, sign, exp.abs())
        }
    }
}

/// JavaScript `String(value)` conversion.
///
/// ```
/// use core_types::Value;
///
/// assert_eq!(Value::Undefined.to_string(), "undefined");
/// assert_eq!(Value::Smi(42).to_string(), "42");
/// assert_eq!(Value::Array(vec![Value::Smi(1), Value::Smi(2)]).to_string(), "1,2");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Smi(n) => write!(f, "{}", n),
            Value::Double(n) => format_number(*n, f),
            Value::String(s) => write!(f, "{}", s),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::Array(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // null and undefined elements join as empty strings
                    if !matches!(element, Value::Undefined | Value::Null) {
                        write!(f, "{}", element)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => write!(f, "[object Object]"),
            Value::NativeFunction(name) => write!(f, "function {}() {{ [native code] }}", name),
        }
    }
}
