use crate::{
    model::entity::EntityModel,
    types::{Date, Timestamp},
    value::{Value, ValueType},
};

///
/// Comparable
///
/// Scalar types an interval can be built over. The bound pins the
/// comparison value and both accessors to one type at compile time.
///

pub trait Comparable: Clone + Ord + Into<Value> + 'static {
    fn value_type() -> ValueType;
}

macro_rules! impl_comparable {
    ($($ty:ty => $vt:ident),* $(,)?) => {
        $(
            impl Comparable for $ty {
                fn value_type() -> ValueType {
                    ValueType::$vt
                }
            }
        )*
    };
}

impl_comparable!(
    Date => Date,
    i32 => Int,
    i64 => Int,
    String => Text,
    Timestamp => Timestamp,
    u64 => Uint,
);

///
/// Entity
///
/// A row type with a static field model. Field reads go through
/// `get_value`, which backs local evaluation.
///

pub trait Entity: 'static {
    const MODEL: &'static EntityModel;

    /// Current value of `field`, `Value::Null` for an absent optional,
    /// `None` for an unknown field.
    fn get_value(&self, field: &str) -> Option<Value>;

    #[must_use]
    fn entity_type() -> ValueType {
        Self::MODEL.entity_type()
    }
}
