use crate::{
    interval::Bounds,
    test_support::{date, ts},
    types::{Date, Timestamp},
    value::{Value, ValueType, strict_order_cmp},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[test]
fn strict_order_compares_same_variants() {
    assert_eq!(
        strict_order_cmp(&Value::Int(1), &Value::Int(2)),
        Some(Ordering::Less)
    );
    assert_eq!(
        strict_order_cmp(
            &Value::Date(date("2018-07-31")),
            &Value::Date(date("2018-07-01"))
        ),
        Some(Ordering::Greater)
    );
    assert_eq!(
        strict_order_cmp(
            &Value::Timestamp(Timestamp::from_seconds(5)),
            &Value::Timestamp(Timestamp::from_seconds(5))
        ),
        Some(Ordering::Equal)
    );
}

#[test]
fn strict_order_rejects_mixed_variants_and_null() {
    assert_eq!(strict_order_cmp(&Value::Int(1), &Value::Uint(1)), None);
    assert_eq!(strict_order_cmp(&Value::Null, &Value::Int(1)), None);
    assert_eq!(strict_order_cmp(&Value::Null, &Value::Null), None);
}

#[test]
fn null_only_inhabits_optional_types() {
    assert!(Value::Null.inhabits(&ValueType::optional(ValueType::Int)));
    assert!(!Value::Null.inhabits(&ValueType::Int));
}

#[test]
fn scalar_inhabits_its_type_and_its_optional() {
    let v = Value::Date(Date::EPOCH);

    assert!(v.inhabits(&ValueType::Date));
    assert!(v.inhabits(&ValueType::optional(ValueType::Date)));
    assert!(!v.inhabits(&ValueType::Timestamp));
}

#[test]
fn optional_does_not_nest() {
    let once = ValueType::optional(ValueType::Int);
    let twice = ValueType::optional(once.clone());

    assert_eq!(once, twice);
}

#[test]
fn option_converts_to_null_or_scalar() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some(3i64)), Value::Int(3));
}

#[test]
fn function_type_display_lists_params() {
    let ty = ValueType::Function {
        params: vec![ValueType::entity("Post"), ValueType::Bool],
        ret: Box::new(ValueType::Bool),
    };

    assert_eq!(ty.to_string(), "fn(Post, bool) -> bool");
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
struct Literals {
    bounds: Bounds,
    ty: ValueType,
    day: Value,
    instant: Value,
    missing: Value,
}

#[test]
fn literals_round_trip_through_toml() {
    let literals = Literals {
        bounds: Bounds::HALF_OPEN,
        ty: ValueType::optional(ValueType::Date),
        day: Value::Date(date("2018-07-15")),
        instant: Value::Timestamp(ts("2018-07-15 00:00:00 +00:00")),
        missing: Value::Null,
    };

    let text = toml::to_string(&literals).unwrap();
    assert!(text.contains("2018-07-15"), "{text}");

    let back: Literals = toml::from_str(&text).unwrap();
    assert_eq!(back, literals);
}
