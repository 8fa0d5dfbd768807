//! Structured values that can be snapshotted.

use crate::result::BancheckResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A value to be serialized into a snapshot
///
/// The variants mirror what a structural pretty-printer distinguishes:
/// primitives, opaque leaves (functions, symbols, regexes, errors, dates)
/// and containers. Anything `Serialize` can be turned into a `Value` with
/// [`Value::from_serialize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Text
    String(String),
    /// Symbol with a description
    Symbol(String),
    /// Regular expression
    Regex {
        /// Pattern source, without delimiters
        source: String,
        /// Flags such as `g` or `i`
        flags: String,
    },
    /// Function, optionally named
    Function {
        /// Function name
        name: Option<String>,
    },
    /// Error object
    Error {
        /// Error kind, e.g. `TypeError`
        name: String,
        /// Error message
        message: String,
    },
    /// Point in time
    Date(DateTime<Utc>),
    /// Ordered list
    Array(Vec<Value>),
    /// String-keyed record
    Object {
        /// Constructor name, `None` for plain objects
        constructor: Option<String>,
        /// Fields in insertion order (printed sorted)
        fields: Vec<(String, Value)>,
    },
    /// Map with arbitrary keys, printed in insertion order
    Map(Vec<(Value, Value)>),
    /// Set, printed in insertion order
    Set(Vec<Value>),
}

impl Value {
    /// Convert anything serde can serialize
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> BancheckResult<Self> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    /// Plain object from key/value pairs
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object {
            constructor: None,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Object created by a named constructor
    pub fn instance<K, V, I>(constructor: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        match Self::object(fields) {
            Self::Object { fields, .. } => Self::Object {
                constructor: Some(constructor.into()),
                fields,
            },
            other => other,
        }
    }

    /// Array from items
    pub fn array<V: Into<Value>, I: IntoIterator<Item = V>>(items: I) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Map from entries
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Set from items
    pub fn set<V: Into<Value>, I: IntoIterator<Item = V>>(items: I) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Regular expression
    pub fn regex(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self::Regex {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// Named function
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function {
            name: Some(name.into()),
        }
    }

    /// Plain `Error` with a message
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            name: "Error".to_string(),
            message: message.into(),
        }
    }

    /// Symbol with a description
    pub fn symbol(description: impl Into<String>) -> Self {
        Self::Symbol(description.into())
    }

    /// Name used for containers cut off by the depth limit
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Array(_) => "Array",
            Self::Object {
                constructor: Some(name),
                ..
            } => name,
            Self::Object { .. } => "Object",
            Self::Map(_) => "Map",
            Self::Set(_) => "Set",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Regex { .. } => "RegExp",
            Self::Function { .. } => "Function",
            Self::Error { .. } => "Error",
            Self::Date(_) => "Date",
        }
    }

    /// Whether the value has children
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Array(_) | Self::Object { .. } | Self::Map(_) | Self::Set(_)
        )
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::array(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(map) => Self::object(map),
        }
    }
}
