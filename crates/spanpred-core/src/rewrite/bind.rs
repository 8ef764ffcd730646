use crate::{
    expr::{Expr, ExprNode, ParamId, Parameter, TypeError, map_children},
    value::Value,
};
use std::collections::BTreeMap;
use tracing::instrument;

///
/// ConstantBindings
///
/// Parameter → literal mapping for `bind_constants`.
///
/// Keyed by parameter identity, not by name: two independently built
/// parameters that happen to share a name are never confused.
/// Entity-typed parameters cannot be bound; only flag/value parameters can.
///

#[derive(Clone, Debug, Default)]
pub struct ConstantBindings {
    map: BTreeMap<ParamId, Expr>,
}

impl ConstantBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::insert`].
    pub fn bind(mut self, param: &Parameter, value: Value) -> Result<Self, TypeError> {
        self.insert(param, value)?;

        Ok(self)
    }

    /// Bind `param` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, param: &Parameter, value: Value) -> Result<(), TypeError> {
        if param.ty().is_entity() {
            return Err(TypeError::EntityBinding {
                name: param.name().to_string(),
                ty: param.ty().clone(),
            });
        }

        let constant = Expr::constant(value, param.ty().clone())?;
        self.map.insert(param.id(), constant);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: ParamId) -> Option<&Expr> {
        self.map.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

///
/// Replace bound parameters in `tree` with their constant nodes.
///
/// A nested lambda's parameter list is never rewritten, and inside that
/// lambda's body its own parameters shadow any binding for the same id.
/// Every other node is preserved (shared, when nothing below it changed).
///
#[instrument(level = "trace", skip_all, name = "rewrite::bind_constants")]
#[must_use]
pub fn bind_constants(tree: &Expr, bindings: &ConstantBindings) -> Expr {
    if bindings.is_empty() {
        return tree.clone();
    }

    bind_in(tree, bindings, &mut Vec::new())
}

fn bind_in(expr: &Expr, bindings: &ConstantBindings, shadowed: &mut Vec<ParamId>) -> Expr {
    match expr.node() {
        ExprNode::Parameter(p) if !shadowed.contains(&p.id()) => bindings
            .get(p.id())
            .cloned()
            .unwrap_or_else(|| expr.clone()),

        ExprNode::Lambda(lambda) => {
            let depth = shadowed.len();
            shadowed.extend(lambda.param_ids());
            let out = map_children(expr, |child| bind_in(child, bindings, shadowed));
            shadowed.truncate(depth);

            out
        }

        _ => map_children(expr, |child| bind_in(child, bindings, shadowed)),
    }
}
