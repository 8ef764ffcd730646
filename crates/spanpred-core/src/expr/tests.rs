use crate::{
    expr::{CompareOp, Expr, Lambda, NodeKind, TypeError, node_kinds},
    value::{Value, ValueType},
};

fn post() -> ValueType {
    ValueType::entity("Post")
}

fn opt_int() -> ValueType {
    ValueType::optional(ValueType::Int)
}

#[test]
fn parameters_with_same_name_have_distinct_ids() {
    let a = Expr::parameter("x", ValueType::Int);
    let b = Expr::parameter("x", ValueType::Int);

    let (pa, pb) = (a.as_parameter().unwrap(), b.as_parameter().unwrap());
    assert_eq!(pa.name(), pb.name());
    assert_ne!(pa.id(), pb.id());
    assert!(!a.ptr_eq(&b));
}

#[test]
fn clone_shares_the_node() {
    let a = Expr::parameter("x", ValueType::Int);
    let b = a.clone();

    assert!(a.ptr_eq(&b));
}

#[test]
fn constant_must_inhabit_its_type() {
    assert!(Expr::constant(Value::Int(1), ValueType::Int).is_ok());
    assert!(Expr::constant(Value::Int(1), opt_int()).is_ok());
    assert!(Expr::constant(Value::Null, opt_int()).is_ok());

    let err = Expr::constant(Value::Null, ValueType::Int).unwrap_err();
    assert!(matches!(err, TypeError::Literal { .. }));

    let err = Expr::constant(Value::Text("a".into()), ValueType::Int).unwrap_err();
    assert!(matches!(err, TypeError::Literal { .. }));
}

#[test]
fn compare_accepts_optional_against_plain() {
    let x = Expr::parameter("x", opt_int());
    let v = Expr::constant(Value::Int(5), ValueType::Int).unwrap();

    let cmp = Expr::compare(CompareOp::Lte, x, v).unwrap();
    assert_eq!(cmp.ty(), &ValueType::Bool);
    assert_eq!(cmp.kind(), NodeKind::Compare);
}

#[test]
fn compare_rejects_mismatched_and_unorderable_operands() {
    let int = Expr::parameter("i", ValueType::Int);
    let text = Expr::parameter("t", ValueType::Text);
    let flag = Expr::parameter("f", ValueType::Bool);
    let entity = Expr::parameter("p", post());

    let err = Expr::compare(CompareOp::Eq, int.clone(), text).unwrap_err();
    assert!(matches!(err, TypeError::Incomparable { .. }));

    let err = Expr::compare(CompareOp::Lt, flag.clone(), flag.clone()).unwrap_err();
    assert!(matches!(err, TypeError::Incomparable { .. }));
    assert!(Expr::compare(CompareOp::Eq, flag.clone(), flag).is_ok());

    let err = Expr::compare(CompareOp::Eq, entity.clone(), entity).unwrap_err();
    assert!(matches!(err, TypeError::Incomparable { .. }));
}

#[test]
fn connectives_require_booleans() {
    let x = Expr::parameter("x", ValueType::Int);

    let err = Expr::and(x.clone(), Expr::bool(true)).unwrap_err();
    assert_eq!(
        err,
        TypeError::Mismatch {
            expected: ValueType::Bool,
            found: ValueType::Int,
        }
    );
    assert!(Expr::not(x).is_err());
}

#[test]
fn is_null_requires_optional_operand() {
    let plain = Expr::parameter("x", ValueType::Int);
    let optional = Expr::parameter("y", opt_int());

    assert!(matches!(
        Expr::is_null(plain).unwrap_err(),
        TypeError::NotOptional { .. }
    ));
    assert!(Expr::is_null(optional).is_ok());
}

#[test]
fn member_requires_entity_target() {
    let p = Expr::parameter("p", post());
    let i = Expr::parameter("i", ValueType::Int);

    assert!(Expr::member(p, "publish", opt_int()).is_ok());
    assert!(matches!(
        Expr::member(i, "publish", opt_int()).unwrap_err(),
        TypeError::NotAnEntity { .. }
    ));
}

#[test]
fn lambda_rejects_non_parameters_and_duplicates() {
    let x = Expr::parameter("x", ValueType::Bool);

    let err = Lambda::new(vec![Expr::bool(true)], x.clone()).unwrap_err();
    assert_eq!(
        err,
        TypeError::NotAParameter {
            kind: NodeKind::Constant
        }
    );

    let err = Lambda::new(vec![x.clone(), x.clone()], x).unwrap_err();
    assert!(matches!(err, TypeError::DuplicateParameter { .. }));
}

#[test]
fn lambda_type_follows_params_and_body() {
    let p = Expr::parameter("p", post());
    let body = Expr::is_null(Expr::member(p.clone(), "publish", opt_int()).unwrap()).unwrap();
    let lambda = Lambda::new(vec![p], body).unwrap();

    assert_eq!(
        lambda.ty(),
        &ValueType::Function {
            params: vec![post()],
            ret: Box::new(ValueType::Bool),
        }
    );
    assert_eq!(lambda.ty().to_string(), "fn(Post) -> bool");
    assert!(lambda.is_closed());
}

#[test]
fn free_parameters_skip_lambda_bound_ones() {
    let outer = Expr::parameter("outer", ValueType::Bool);
    let inner = Expr::parameter("inner", ValueType::Bool);

    let body = Expr::and(inner.clone(), outer.clone()).unwrap();
    let nested = Lambda::new(vec![inner], body).unwrap();
    let free = nested.free_parameters();

    assert_eq!(free.len(), 1);
    assert_eq!(Some(&free[0]), outer.as_parameter());
    assert!(!nested.is_closed());
}

#[test]
fn alpha_equivalence_renames_bound_parameters_only() {
    let build = || {
        let p = Expr::parameter("p", post());
        let m = Expr::member(p.clone(), "publish", opt_int()).unwrap();
        Lambda::new(vec![p], Expr::is_null(m).unwrap()).unwrap()
    };

    let (a, b) = (build(), build());
    assert!(a.structurally_eq(&b));

    // free parameters are compared by identity
    let x = Expr::parameter("x", ValueType::Bool);
    let y = Expr::parameter("x", ValueType::Bool);
    assert!(x.alpha_eq(&x.clone()));
    assert!(!x.alpha_eq(&y));
}

#[test]
fn node_kinds_reports_every_kind_used() {
    let p = Expr::parameter("p", post());
    let m = Expr::member(p.clone(), "n", opt_int()).unwrap();
    let body = Expr::not(Expr::is_null(m).unwrap()).unwrap();
    let lambda: Expr = Lambda::new(vec![p], body).unwrap().into();

    let kinds: Vec<_> = node_kinds(&lambda).into_iter().collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::IsNull,
            NodeKind::Lambda,
            NodeKind::Member,
            NodeKind::Not,
            NodeKind::Parameter,
        ]
    );
}

#[test]
fn display_is_fully_parenthesized() {
    let p = Expr::parameter("p", post());
    let m = Expr::member(p.clone(), "n", opt_int()).unwrap();
    let five = Expr::constant(Value::Int(5), ValueType::Int).unwrap();
    let body = Expr::or(
        Expr::is_null(m.clone()).unwrap(),
        Expr::compare(CompareOp::Lte, m, five).unwrap(),
    )
    .unwrap();
    let lambda = Lambda::new(vec![p], body).unwrap();

    assert_eq!(
        lambda.to_string(),
        "|p: Post| ((p.n == null) || (p.n <= 5))"
    );
}
