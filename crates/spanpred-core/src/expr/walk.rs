use crate::expr::{Expr, ExprNode, NodeKind, ParamId, Parameter};
use std::collections::BTreeSet;

/// Parameters referenced in `expr` that no enclosing lambda inside `expr`
/// binds, in order of first appearance and without duplicates.
#[must_use]
pub fn free_parameters(expr: &Expr) -> Vec<Parameter> {
    let mut bound = Vec::new();
    let mut out = Vec::new();
    collect_free(expr, &mut bound, &mut out);

    out
}

fn collect_free(expr: &Expr, bound: &mut Vec<ParamId>, out: &mut Vec<Parameter>) {
    match expr.node() {
        ExprNode::Parameter(p) => {
            if !bound.contains(&p.id) && !out.iter().any(|seen| seen.id == p.id) {
                out.push(p.clone());
            }
        }
        ExprNode::Constant(_) => {}
        ExprNode::Member(m) => collect_free(&m.target, bound, out),
        ExprNode::Compare { left, right, .. }
        | ExprNode::And(left, right)
        | ExprNode::Or(left, right) => {
            collect_free(left, bound, out);
            collect_free(right, bound, out);
        }
        ExprNode::Not(inner) | ExprNode::IsNull(inner) => collect_free(inner, bound, out),
        ExprNode::Lambda(lambda) => {
            let depth = bound.len();
            bound.extend(lambda.param_ids());
            collect_free(&lambda.body, bound, out);
            bound.truncate(depth);
        }
    }
}

/// Every node kind reachable from `expr`, including `expr` itself.
#[must_use]
pub fn node_kinds(expr: &Expr) -> BTreeSet<NodeKind> {
    let mut out = BTreeSet::new();
    collect_kinds(expr, &mut out);

    out
}

fn collect_kinds(expr: &Expr, out: &mut BTreeSet<NodeKind>) {
    out.insert(expr.kind());

    match expr.node() {
        ExprNode::Parameter(_) | ExprNode::Constant(_) => {}
        ExprNode::Member(m) => collect_kinds(&m.target, out),
        ExprNode::Compare { left, right, .. }
        | ExprNode::And(left, right)
        | ExprNode::Or(left, right) => {
            collect_kinds(left, out);
            collect_kinds(right, out);
        }
        ExprNode::Not(inner) | ExprNode::IsNull(inner) => collect_kinds(inner, out),
        ExprNode::Lambda(lambda) => {
            for param in &lambda.params {
                collect_kinds(param, out);
            }
            collect_kinds(&lambda.body, out);
        }
    }
}

/// Structural equality up to consistent renaming of lambda-bound parameters.
///
/// Parameters bound by corresponding lambdas are matched by position; free
/// parameters must be the same parameter.
#[must_use]
pub fn alpha_eq(left: &Expr, right: &Expr) -> bool {
    let mut pairs = Vec::new();

    alpha_eq_in(left, right, &mut pairs)
}

fn alpha_eq_in(left: &Expr, right: &Expr, pairs: &mut Vec<(ParamId, ParamId)>) -> bool {
    if left.ptr_eq(right) && pairs.is_empty() {
        return true;
    }

    match (left.node(), right.node()) {
        (ExprNode::Parameter(a), ExprNode::Parameter(b)) => {
            // innermost binding wins
            match pairs.iter().rev().find(|(l, r)| *l == a.id || *r == b.id) {
                Some((l, r)) => *l == a.id && *r == b.id,
                None => a.id == b.id,
            }
        }
        (ExprNode::Constant(a), ExprNode::Constant(b)) => a == b,
        (ExprNode::Member(a), ExprNode::Member(b)) => {
            a.field == b.field && a.ty == b.ty && alpha_eq_in(&a.target, &b.target, pairs)
        }
        (
            ExprNode::Compare {
                op: op_a,
                left: la,
                right: ra,
            },
            ExprNode::Compare {
                op: op_b,
                left: lb,
                right: rb,
            },
        ) => op_a == op_b && alpha_eq_in(la, lb, pairs) && alpha_eq_in(ra, rb, pairs),
        (ExprNode::And(la, ra), ExprNode::And(lb, rb))
        | (ExprNode::Or(la, ra), ExprNode::Or(lb, rb)) => {
            alpha_eq_in(la, lb, pairs) && alpha_eq_in(ra, rb, pairs)
        }
        (ExprNode::Not(a), ExprNode::Not(b)) | (ExprNode::IsNull(a), ExprNode::IsNull(b)) => {
            alpha_eq_in(a, b, pairs)
        }
        (ExprNode::Lambda(a), ExprNode::Lambda(b)) => {
            if a.ty != b.ty || a.params.len() != b.params.len() {
                return false;
            }

            let depth = pairs.len();
            pairs.extend(a.param_ids().zip(b.param_ids()));
            let eq = alpha_eq_in(&a.body, &b.body, pairs);
            pairs.truncate(depth);

            eq
        }
        _ => false,
    }
}
