mod compare;

#[cfg(test)]
mod tests;

use crate::types::{Date, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::strict_order_cmp;

///
/// Value
/// literal payload of a constant expression node
///
/// Null → the bound is absent (Option::None / SQL NULL).
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Int(i64),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Scalar type carried by this value; `None` for `Null`.
    #[must_use]
    pub const fn scalar_type(&self) -> Option<ValueType> {
        match self {
            Self::Bool(_) => Some(ValueType::Bool),
            Self::Date(_) => Some(ValueType::Date),
            Self::Int(_) => Some(ValueType::Int),
            Self::Null => None,
            Self::Text(_) => Some(ValueType::Text),
            Self::Timestamp(_) => Some(ValueType::Timestamp),
            Self::Uint(_) => Some(ValueType::Uint),
        }
    }

    /// Whether this literal may appear in a constant node of type `ty`.
    ///
    /// `Null` only inhabits optional types; a scalar inhabits its own type
    /// and the optional wrapper of it.
    #[must_use]
    pub fn inhabits(&self, ty: &ValueType) -> bool {
        match (self, ty) {
            (Self::Null, ValueType::Optional(_)) => true,
            (Self::Null, _) => false,
            (value, ty) => value
                .scalar_type()
                .is_some_and(|scalar| &scalar == ty.strip_optional()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Null => f.write_str("null"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Timestamp(ts) => write!(f, "@{ts}"),
            Self::Uint(u) => write!(f, "{u}u"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

///
/// ValueType
/// static type of an expression node
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ValueType {
    Bool,
    Date,
    /// Opaque row type, identified by entity name.
    Entity(String),
    Function {
        params: Vec<Self>,
        ret: Box<Self>,
    },
    Int,
    Optional(Box<Self>),
    Text,
    Timestamp,
    Uint,
}

impl ValueType {
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    #[must_use]
    pub fn entity(name: impl Into<String>) -> Self {
        Self::Entity(name.into())
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Underlying type with one optional layer removed.
    #[must_use]
    pub fn strip_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }

    /// Whether values of this type admit a total order usable by comparisons.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Int | Self::Text | Self::Timestamp | Self::Uint
        )
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Date => f.write_str("date"),
            Self::Entity(name) => f.write_str(name),
            Self::Function { params, ret } => {
                f.write_str("fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
            Self::Int => f.write_str("int"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::Text => f.write_str("text"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::Uint => f.write_str("uint"),
        }
    }
}
