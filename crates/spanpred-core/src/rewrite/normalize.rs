use crate::{
    expr::{Expr, ExprNode, map_children},
    value::strict_order_cmp,
};

///
/// Fold constant sub-expressions bottom-up.
///
/// Rules:
/// - AND(False, x)      → False
/// - AND(True, x)       → x
/// - OR(True, x)        → True
/// - OR(False, x)       → x
/// - NOT(constant)      → !constant
/// - NOT(NOT x)         → x
/// - IS NULL(constant)  → constant is null
/// - constant ⋈ constant → literal result (false when either side is null)
///
/// Boolean results are unchanged for every input row. Flag binding leaves
/// `x AND true` / `x AND NOT true` shapes behind; this pass removes them
/// before translation.
///
#[must_use]
pub fn normalize(tree: &Expr) -> Expr {
    let expr = map_children(tree, normalize);

    fold(&expr).unwrap_or(expr)
}

fn fold(expr: &Expr) -> Option<Expr> {
    match expr.node() {
        ExprNode::And(left, right) => match (left.as_bool_constant(), right.as_bool_constant()) {
            (Some(false), _) | (_, Some(false)) => Some(Expr::bool(false)),
            (Some(true), _) => Some(right.clone()),
            (_, Some(true)) => Some(left.clone()),
            _ => None,
        },

        ExprNode::Or(left, right) => match (left.as_bool_constant(), right.as_bool_constant()) {
            (Some(true), _) | (_, Some(true)) => Some(Expr::bool(true)),
            (Some(false), _) => Some(right.clone()),
            (_, Some(false)) => Some(left.clone()),
            _ => None,
        },

        ExprNode::Not(inner) => {
            if let Some(b) = inner.as_bool_constant() {
                return Some(Expr::bool(!b));
            }
            match inner.node() {
                ExprNode::Not(double) => Some(double.clone()),
                _ => None,
            }
        }

        ExprNode::IsNull(inner) => inner
            .as_constant()
            .map(|c| Expr::bool(c.value().is_null())),

        ExprNode::Compare { op, left, right } => {
            let (l, r) = (left.as_constant()?, right.as_constant()?);
            if l.value().is_null() || r.value().is_null() {
                return Some(Expr::bool(false));
            }

            strict_order_cmp(l.value(), r.value()).map(|ord| Expr::bool(op.holds(ord)))
        }

        _ => None,
    }
}
