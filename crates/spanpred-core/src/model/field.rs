use crate::value::ValueType;

///
/// EntityFieldModel
/// Runtime field metadata used by accessor construction and validation.
///

#[derive(Debug)]
pub struct EntityFieldModel {
    /// Field name as used in member access and filters.
    pub name: &'static str,
    /// Scalar type shape of the stored value.
    pub kind: EntityFieldKind,
    /// Whether the stored value may be absent.
    pub nullable: bool,
}

impl EntityFieldModel {
    /// Static type of a member access on this field.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        let scalar = self.kind.value_type();

        if self.nullable {
            ValueType::optional(scalar)
        } else {
            scalar
        }
    }
}

///
/// EntityFieldKind
///
/// Scalar surface an accessor may project.
/// Aligned with `Value` variants.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityFieldKind {
    Bool,
    Date,
    Int,
    Text,
    Timestamp,
    Uint,
}

impl EntityFieldKind {
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Bool => ValueType::Bool,
            Self::Date => ValueType::Date,
            Self::Int => ValueType::Int,
            Self::Text => ValueType::Text,
            Self::Timestamp => ValueType::Timestamp,
            Self::Uint => ValueType::Uint,
        }
    }
}
