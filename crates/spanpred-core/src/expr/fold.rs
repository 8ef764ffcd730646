use crate::expr::{Expr, ExprNode, MemberAccess};

///
/// Rebuild `expr` with every direct child passed through `f`.
///
/// This is the structural-recursion default each rewrite falls back to:
/// - leaves (parameters, constants) are returned as-is
/// - a lambda maps its body only; its parameter list is never rewritten
/// - when no child changed, the original handle is returned, so untouched
///   subtrees stay shared between the input and output trees
///
pub(crate) fn map_children(expr: &Expr, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
    match expr.node() {
        ExprNode::Parameter(_) | ExprNode::Constant(_) => expr.clone(),

        ExprNode::Member(m) => {
            let target = f(&m.target);
            if target.ptr_eq(&m.target) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::Member(MemberAccess {
                target,
                field: m.field.clone(),
                ty: m.ty.clone(),
            }))
        }

        ExprNode::Compare { op, left, right } => {
            let (l, r) = (f(left), f(right));
            if l.ptr_eq(left) && r.ptr_eq(right) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::Compare {
                op: *op,
                left: l,
                right: r,
            })
        }

        ExprNode::And(left, right) => {
            let (l, r) = (f(left), f(right));
            if l.ptr_eq(left) && r.ptr_eq(right) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::And(l, r))
        }

        ExprNode::Or(left, right) => {
            let (l, r) = (f(left), f(right));
            if l.ptr_eq(left) && r.ptr_eq(right) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::Or(l, r))
        }

        ExprNode::Not(inner) => {
            let i = f(inner);
            if i.ptr_eq(inner) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::Not(i))
        }

        ExprNode::IsNull(inner) => {
            let i = f(inner);
            if i.ptr_eq(inner) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::IsNull(i))
        }

        ExprNode::Lambda(lambda) => {
            let body = f(&lambda.body);
            if body.ptr_eq(&lambda.body) {
                return expr.clone();
            }

            Expr::from_node(ExprNode::Lambda(lambda.with_body(body)))
        }
    }
}
