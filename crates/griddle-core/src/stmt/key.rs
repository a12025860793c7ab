use super::Value;

/// An extracted primary key value.
///
/// Keys are the subset of values a table may be ordered by: integers and
/// strings, or a composite of those in declared key-component order. Floats,
/// booleans and nulls are not keyable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    I64(i64),
    String(String),
    Composite(Vec<Key>),
}

impl Key {
    /// Attempts to read a value as a key. Returns `None` for value families
    /// that cannot act as keys.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::I64(v) => Some(Self::I64(*v)),
            Value::String(v) => Some(Self::String(v.clone())),
            _ => None,
        }
    }

    /// Builds a key from components: a single component stays scalar, more
    /// become a composite in the given order.
    pub fn from_components(mut components: Vec<Self>) -> Self {
        if components.len() == 1 {
            components.remove(0)
        } else {
            Self::Composite(components)
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::I64(v) => Value::I64(*v),
            Self::String(v) => Value::String(v.clone()),
            Self::Composite(parts) => Value::List(parts.iter().map(Self::to_value).collect()),
        }
    }
}

impl From<i64> for Key {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<&str> for Key {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}
