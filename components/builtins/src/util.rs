//! The `util` module: value inspection
//!
//! [`Inspect`] is the rendering capability the `dbg` builtin delegates to.
//! For script values it follows `util.inspect` with default options
//! (depth 2, single-quoted strings, one line).

use core_types::Value;

/// Nesting level past which containers collapse to `[Array]` / `[Object]`
const MAX_DEPTH: usize = 2;

/// Something that can be rendered for debug output
pub trait Inspect {
    /// Render the value the way `util.inspect` would
    fn inspect(&self) -> String;
}

impl Inspect for Value {
    fn inspect(&self) -> String {
        inspect(self)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> String {
        (**self).inspect()
    }
}

impl Inspect for str {
    fn inspect(&self) -> String {
        quote(self)
    }
}

impl Inspect for String {
    fn inspect(&self) -> String {
        quote(self)
    }
}

impl Inspect for bool {
    fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Inspect for f64 {
    fn inspect(&self) -> String {
        inspect(&Value::Double(*self))
    }
}

macro_rules! inspect_integer {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

inspect_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// `None` renders as `undefined`.
///
/// `Option` has an inherent `inspect` method of its own, so a direct call
/// needs the qualified form: `Inspect::inspect(&None::<i32>)`.
impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> String {
        match self {
            Some(value) => value.inspect(),
            None => "undefined".to_string(),
        }
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> String {
        bracket('[', self.iter().map(Inspect::inspect).collect(), ']')
    }
}

/// util.inspect(value)
pub fn inspect(value: &Value) -> String {
    inspect_at(value, 0)
}

/// Formats console arguments: strings verbatim, everything else inspected,
/// separated by spaces
pub fn inspect_args(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => inspect(other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn inspect_at(value: &Value, depth: usize) -> String {
    match value {
        Value::Double(n) if *n == 0.0 && n.is_sign_negative() => "-0".to_string(),
        Value::String(s) => quote(s),
        Value::BigInt(n) => format!("{}n", n),
        Value::NativeFunction(name) if name.is_empty() => "[Function (anonymous)]".to_string(),
        Value::NativeFunction(name) => format!("[Function: {}]", name),
        Value::Array(_) if depth > MAX_DEPTH => "[Array]".to_string(),
        Value::Object(_) if depth > MAX_DEPTH => "[Object]".to_string(),
        Value::Array(elements) => bracket(
            '[',
            elements.iter().map(|e| inspect_at(e, depth + 1)).collect(),
            ']',
        ),
        Value::Object(properties) => bracket(
            '{',
            properties
                .iter()
                .map(|(key, v)| format!("{}: {}", property_key(key), inspect_at(v, depth + 1)))
                .collect(),
            '}',
        ),
        other => other.to_string(),
    }
}

fn bracket(open: char, items: Vec<String>, close: char) -> String {
    if items.is_empty() {
        format!("{}{}", open, close)
    } else {
        format!("{} {} {}", open, items.join(", "), close)
    }
}

fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Quotes a string, preferring single quotes and switching when the
/// content contains them
fn quote(s: &str) -> String {
    let quote = if !s.contains('\'') {
        '\''
    } else if !s.contains('"') {
        '"'
    } else if !s.contains('`') {
        '`'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
