//! Local (in-memory) evaluation of expression trees.
//!
//! This is the reference interpreter for composed predicates: whatever a
//! remote backend does with a translated filter, the same predicate run
//! through here over the same rows must agree.

#[cfg(test)]
mod tests;

use crate::{
    expr::{Expr, ExprNode, Lambda, ParamId},
    traits::Entity,
    value::{Value, strict_order_cmp},
};
use thiserror::Error as ThisError;

///
/// EvalError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EvalError {
    #[error("entity parameter '{name}' used as a value")]
    EntityAsValue { name: String },

    #[error("cannot compare {left} with {right}")]
    Incomparable { left: Value, right: Value },

    #[error("row has no field '{field}'")]
    MissingField { field: String },

    #[error("expected a boolean, found {found}")]
    NotBoolean { found: Value },

    #[error("member access target is not a bound entity")]
    NotARow,

    #[error("parameter '{name}' is not bound")]
    Unbound { name: String },

    #[error("nested lambdas cannot be evaluated as values")]
    UnsupportedLambda,

    #[error("expected {expected} argument(s), found {found}")]
    Arity { expected: usize, found: usize },
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete entity types.
///

pub trait Row {
    fn field(&self, name: &str) -> Option<Value>;
}

impl<T: Entity> Row for T {
    fn field(&self, name: &str) -> Option<Value> {
        self.get_value(name)
    }
}

///
/// Binding
///

#[derive(Clone, Copy)]
enum Binding<'a> {
    Row(&'a dyn Row),
    Value(&'a Value),
}

///
/// Scope
/// parameter bindings visible to the expression being evaluated
///

#[derive(Clone, Default)]
pub struct Scope<'a> {
    bindings: Vec<(ParamId, Binding<'a>)>,
}

impl<'a> Scope<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_row(mut self, param: ParamId, row: &'a dyn Row) -> Self {
        self.bindings.push((param, Binding::Row(row)));
        self
    }

    #[must_use]
    pub fn with_value(mut self, param: ParamId, value: &'a Value) -> Self {
        self.bindings.push((param, Binding::Value(value)));
        self
    }

    fn lookup(&self, id: ParamId) -> Option<Binding<'a>> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == id)
            .map(|(_, binding)| *binding)
    }
}

///
/// Evaluate a one-parameter predicate against a single row.
///
pub fn eval_predicate(predicate: &Lambda, row: &dyn Row) -> Result<bool, EvalError> {
    let Some(param) = predicate.param(0).filter(|_| predicate.arity() == 1) else {
        return Err(EvalError::Arity {
            expected: 1,
            found: predicate.arity(),
        });
    };

    let scope = Scope::new().with_row(param.id(), row);

    match eval(predicate.body(), &scope)? {
        Value::Bool(b) => Ok(b),
        found => Err(EvalError::NotBoolean { found }),
    }
}

///
/// Evaluate an expression under `scope`.
///
/// Null handling follows SQL: any comparison with a null side is false,
/// and `IS NULL` is the only way to observe a null.
///
pub fn eval(expr: &Expr, scope: &Scope<'_>) -> Result<Value, EvalError> {
    match expr.node() {
        ExprNode::Parameter(p) => match scope.lookup(p.id()) {
            Some(Binding::Value(v)) => Ok(v.clone()),
            Some(Binding::Row(_)) => Err(EvalError::EntityAsValue {
                name: p.name().to_string(),
            }),
            None => Err(EvalError::Unbound {
                name: p.name().to_string(),
            }),
        },

        ExprNode::Constant(c) => Ok(c.value().clone()),

        ExprNode::Member(m) => {
            let row = resolve_row(m.target(), scope)?;

            row.field(m.field()).ok_or_else(|| EvalError::MissingField {
                field: m.field().to_string(),
            })
        }

        ExprNode::Compare { op, left, right } => {
            let (l, r) = (eval(left, scope)?, eval(right, scope)?);
            if l.is_null() || r.is_null() {
                return Ok(Value::Bool(false));
            }

            match strict_order_cmp(&l, &r) {
                Some(ord) => Ok(Value::Bool(op.holds(ord))),
                None => Err(EvalError::Incomparable { left: l, right: r }),
            }
        }

        ExprNode::And(left, right) => {
            if !eval_bool(left, scope)? {
                return Ok(Value::Bool(false));
            }

            eval_bool(right, scope).map(Value::Bool)
        }

        ExprNode::Or(left, right) => {
            if eval_bool(left, scope)? {
                return Ok(Value::Bool(true));
            }

            eval_bool(right, scope).map(Value::Bool)
        }

        ExprNode::Not(inner) => eval_bool(inner, scope).map(|b| Value::Bool(!b)),

        ExprNode::IsNull(inner) => eval(inner, scope).map(|v| Value::Bool(v.is_null())),

        ExprNode::Lambda(_) => Err(EvalError::UnsupportedLambda),
    }
}

fn eval_bool(expr: &Expr, scope: &Scope<'_>) -> Result<bool, EvalError> {
    match eval(expr, scope)? {
        Value::Bool(b) => Ok(b),
        found => Err(EvalError::NotBoolean { found }),
    }
}

fn resolve_row<'a>(target: &Expr, scope: &Scope<'a>) -> Result<&'a dyn Row, EvalError> {
    let ExprNode::Parameter(p) = target.node() else {
        return Err(EvalError::NotARow);
    };

    match scope.lookup(p.id()) {
        Some(Binding::Row(row)) => Ok(row),
        Some(Binding::Value(_)) => Err(EvalError::NotARow),
        None => Err(EvalError::Unbound {
            name: p.name().to_string(),
        }),
    }
}
