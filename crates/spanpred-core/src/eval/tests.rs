use crate::{
    eval::{EvalError, Row, Scope, eval, eval_predicate},
    expr::{CompareOp, Expr, Lambda},
    test_support::{IntInterval, Post, ts},
    traits::Entity,
    value::{Value, ValueType},
};

fn member(param: &Expr, field: &str, ty: ValueType) -> Expr {
    Expr::member(param.clone(), field, ValueType::optional(ty)).unwrap()
}

fn int_lambda(build: impl FnOnce(&Expr) -> Expr) -> Lambda {
    let p = Expr::parameter("i", IntInterval::entity_type());
    let body = build(&p);

    Lambda::new(vec![p], body).unwrap()
}

#[test]
fn entities_are_rows() {
    let row = IntInterval {
        from: Some(1),
        to: None,
    };

    assert_eq!(row.field("from"), Some(Value::Int(1)));
    assert_eq!(row.field("to"), Some(Value::Null));
    assert_eq!(row.field("nope"), None);
}

#[test]
fn comparisons_with_null_are_false() {
    let lambda = int_lambda(|p| {
        let five = Expr::constant(Value::Int(5), ValueType::Int).unwrap();
        Expr::or(
            Expr::compare(CompareOp::Lte, member(p, "to", ValueType::Int), five.clone()).unwrap(),
            Expr::compare(CompareOp::Gt, member(p, "to", ValueType::Int), five).unwrap(),
        )
        .unwrap()
    });

    let row = IntInterval {
        from: None,
        to: None,
    };
    assert_eq!(eval_predicate(&lambda, &row), Ok(false));
}

#[test]
fn is_null_observes_absent_fields() {
    let lambda = int_lambda(|p| Expr::is_null(member(p, "from", ValueType::Int)).unwrap());

    let absent = IntInterval::default();
    let present = IntInterval {
        from: Some(3),
        to: None,
    };

    assert_eq!(eval_predicate(&lambda, &absent), Ok(true));
    assert_eq!(eval_predicate(&lambda, &present), Ok(false));
}

#[test]
fn and_short_circuits_before_failing_operand() {
    // the right side reads a field the row does not have
    let lambda = int_lambda(|p| {
        Expr::and(
            Expr::bool(false),
            Expr::is_null(member(p, "missing", ValueType::Int)).unwrap(),
        )
        .unwrap()
    });
    assert_eq!(eval_predicate(&lambda, &IntInterval::default()), Ok(false));

    let lambda = int_lambda(|p| Expr::is_null(member(p, "missing", ValueType::Int)).unwrap());
    assert_eq!(
        eval_predicate(&lambda, &IntInterval::default()),
        Err(EvalError::MissingField {
            field: "missing".to_string()
        })
    );
}

#[test]
fn predicate_arity_is_checked() {
    let a = Expr::parameter("a", ValueType::Bool);
    let b = Expr::parameter("b", ValueType::Bool);
    let lambda = Lambda::new(vec![a.clone(), b.clone()], Expr::and(a, b).unwrap()).unwrap();

    assert_eq!(
        eval_predicate(&lambda, &IntInterval::default()),
        Err(EvalError::Arity {
            expected: 1,
            found: 2
        })
    );
}

#[test]
fn unbound_and_misused_parameters_are_errors() {
    let free = Expr::parameter("free", ValueType::Bool);
    assert_eq!(
        eval(&free, &Scope::new()),
        Err(EvalError::Unbound {
            name: "free".to_string()
        })
    );

    let value = Value::Bool(true);
    let v = Expr::parameter("v", ValueType::Bool);
    let id = v.as_parameter().unwrap().id();
    let m = Expr::member(
        Expr::parameter("p", Post::entity_type()),
        "title",
        ValueType::optional(ValueType::Text),
    )
    .unwrap();
    assert_eq!(eval(&v, &Scope::new().with_value(id, &value)), Ok(value.clone()));
    assert!(matches!(
        eval(&m, &Scope::new().with_value(id, &value)),
        Err(EvalError::Unbound { .. })
    ));
}

#[test]
fn nested_lambdas_are_not_values() {
    let x = Expr::parameter("x", ValueType::Bool);
    let lambda: Expr = Lambda::new(vec![x.clone()], x).unwrap().into();

    assert_eq!(
        eval(&lambda, &Scope::new()),
        Err(EvalError::UnsupportedLambda)
    );
}

#[test]
fn timestamps_compare_by_instant() {
    let post = Post {
        id: 1,
        title: "cats".to_string(),
        created: ts("2018-07-01 00:00:00 +00:00"),
        publish: ts("2018-07-31 00:00:00 +00:00"),
    };

    let p = Expr::parameter("p", Post::entity_type());
    let now =
        Expr::constant(ts("2018-07-15 00:00:00 +00:00").into(), ValueType::Timestamp).unwrap();
    let created = member(&p, "created", ValueType::Timestamp);
    let publish = member(&p, "publish", ValueType::Timestamp);
    let body = Expr::and(
        Expr::compare(CompareOp::Lte, created, now.clone()).unwrap(),
        Expr::compare(CompareOp::Gt, publish, now).unwrap(),
    )
    .unwrap();
    let lambda = Lambda::new(vec![p], body).unwrap();

    assert_eq!(eval_predicate(&lambda, &post), Ok(true));
}
