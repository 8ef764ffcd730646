use crate::expr::{Expr, ExprNode, ParamId, TypeError, free_parameters, map_children};
use tracing::instrument;

///
/// Replace every free parameter of `tree` with the single `shared` parameter.
///
/// Used to collapse accessors that were each written against their own
/// parameter into one predicate over one entity. This is only sound when all
/// free parameters denote the same logical input, so their types are checked
/// against `shared` first: a parameter of any other type is rejected rather
/// than silently merged.
///
/// Parameters bound by a lambda nested inside `tree` are not free and are
/// left alone.
///
#[instrument(level = "trace", skip_all, name = "rewrite::unify")]
pub fn unify_parameters(tree: &Expr, shared: &Expr) -> Result<Expr, TypeError> {
    let Some(target) = shared.as_parameter() else {
        return Err(TypeError::NotAParameter {
            kind: shared.kind(),
        });
    };

    for param in free_parameters(tree) {
        if param.ty() != target.ty() {
            return Err(TypeError::Mismatch {
                expected: target.ty().clone(),
                found: param.ty().clone(),
            });
        }
    }

    Ok(unify_in(tree, shared, &mut Vec::new()))
}

fn unify_in(expr: &Expr, shared: &Expr, bound: &mut Vec<ParamId>) -> Expr {
    match expr.node() {
        ExprNode::Parameter(p) if !bound.contains(&p.id()) => shared.clone(),

        ExprNode::Lambda(lambda) => {
            let depth = bound.len();
            bound.extend(lambda.param_ids());
            let out = map_children(expr, |child| unify_in(child, shared, bound));
            bound.truncate(depth);

            out
        }

        _ => map_children(expr, |child| unify_in(child, shared, bound)),
    }
}
