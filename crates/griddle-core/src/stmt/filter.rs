use super::Value;

use indexmap::IndexMap;

/// A declarative where-condition: per-field checks plus optional logical
/// combinators. Field checks and every present combinator must all hold.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    /// Field name to field-level filter. All entries must match.
    pub fields: IndexMap<String, FieldFilter>,

    /// Every branch must hold.
    pub and: Vec<Filter>,

    /// At least one branch must hold. An empty list imposes no constraint.
    pub or: Vec<Filter>,

    /// No branch may hold.
    pub not: Vec<Filter>,
}

/// A filter applied to a single field: either a bare literal (equality) or a
/// conjunction of operators.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// Shorthand for an equality test against the literal.
    Literal(Value),

    /// Every operator must hold.
    All(Vec<FieldOp>),
}

/// One field-level operator. The operator set is closed; the evaluator
/// dispatches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Equals(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Contains(Value),
    StartsWith(String),
    EndsWith(String),
    Not(Box<FieldFilter>),
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field-level check. A literal value reads as an equality test.
    pub fn field(mut self, name: impl Into<String>, filter: impl Into<FieldFilter>) -> Self {
        self.fields.insert(name.into(), filter.into());
        self
    }

    pub fn and(mut self, filter: Self) -> Self {
        self.and.push(filter);
        self
    }

    pub fn or(mut self, branches: impl IntoIterator<Item = Self>) -> Self {
        self.or.extend(branches);
        self
    }

    pub fn not(mut self, filter: Self) -> Self {
        self.not.push(filter);
        self
    }

    /// True when the filter imposes no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.and.is_empty() && self.or.is_empty() && self.not.is_empty()
    }
}

impl FieldOp {
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(value.into())
    }

    pub fn is_in<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::In(values.into_iter().map(Into::into).collect())
    }

    pub fn not_in<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::NotIn(values.into_iter().map(Into::into).collect())
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        Self::Gt(value.into())
    }

    pub fn gte(value: impl Into<Value>) -> Self {
        Self::Gte(value.into())
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        Self::Lt(value.into())
    }

    pub fn lte(value: impl Into<Value>) -> Self {
        Self::Lte(value.into())
    }

    pub fn contains(value: impl Into<Value>) -> Self {
        Self::Contains(value.into())
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }

    pub fn ends_with(suffix: impl Into<String>) -> Self {
        Self::EndsWith(suffix.into())
    }

    pub fn not(filter: impl Into<FieldFilter>) -> Self {
        Self::Not(Box::new(filter.into()))
    }
}

// Blanket `From<T: Into<Value>>` would conflict with the operator
// conversions below, so literal conversions are spelled out per source type.
macro_rules! literal_field_filter {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for FieldFilter {
                fn from(src: $ty) -> Self {
                    Self::Literal(src.into())
                }
            }
        )*
    };
}

literal_field_filter!(Value, bool, i32, i64, f64, &str, String);

impl From<FieldOp> for FieldFilter {
    fn from(src: FieldOp) -> Self {
        Self::All(vec![src])
    }
}

impl From<Vec<FieldOp>> for FieldFilter {
    fn from(src: Vec<FieldOp>) -> Self {
        Self::All(src)
    }
}

impl<const N: usize> From<[FieldOp; N]> for FieldFilter {
    fn from(src: [FieldOp; N]) -> Self {
        Self::All(src.into())
    }
}
