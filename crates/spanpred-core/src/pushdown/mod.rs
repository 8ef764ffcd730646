//! Translation of composed predicates for remote query backends.
//!
//! A backend can only translate a small vocabulary: member access on the
//! predicate's own entity, literals, comparisons, boolean connectives and
//! null checks. [`check`] rejects anything else; [`render_filter`] emits a
//! SQL-style `WHERE` fragment for predicates that pass.


use crate::{
    expr::{CompareOp, Expr, ExprNode, Lambda, NodeKind, ParamId},
    rewrite::normalize,
    value::{Value, ValueType},
};
use std::fmt::Write as _;
use thiserror::Error as ThisError;
use tracing::instrument;

///
/// PushdownError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PushdownError {
    #[error("predicate must take exactly one parameter, found {found}")]
    Arity { found: usize },

    #[error("entity parameter '{name}' used outside member access")]
    BareEntity { name: String },

    #[error("member '{field}' is not read from the predicate's entity")]
    ForeignMember { field: String },

    #[error("predicate parameter must be an entity, found {ty}")]
    NotAnEntity { ty: ValueType },

    #[error("predicate references free parameter(s): {names}")]
    NotClosed { names: String },

    #[error("{kind} nodes cannot be translated")]
    UnsupportedNode { kind: NodeKind },
}

///
/// Verify that `predicate` stays within the translatable vocabulary.
///
#[instrument(level = "trace", skip_all, name = "pushdown::check")]
pub fn check(predicate: &Lambda) -> Result<(), PushdownError> {
    let entity = entity_param(predicate)?;

    let free = predicate.free_parameters();
    if !free.is_empty() {
        let names = free
            .iter()
            .map(|p| p.name().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        return Err(PushdownError::NotClosed { names });
    }

    check_node(predicate.body(), entity)
}

///
/// Render `predicate` as a SQL-style filter.
///
/// The body is normalized first, so bound flags fold away. Identifiers are
/// double-quoted, text literals single-quoted, dates rendered as
/// `DATE 'YYYY-MM-DD'` and timestamps as epoch seconds. A `NOT` over a
/// sub-expression that may be UNKNOWN is rendered as
/// `NOT COALESCE(x, FALSE)`, matching local evaluation.
///
#[instrument(level = "trace", skip_all, name = "pushdown::render_filter")]
pub fn render_filter(predicate: &Lambda) -> Result<String, PushdownError> {
    check(predicate)?;

    let body = normalize(predicate.body());
    let mut out = String::new();
    render(&body, &mut out);

    Ok(out)
}

fn entity_param(predicate: &Lambda) -> Result<ParamId, PushdownError> {
    if predicate.arity() != 1 {
        return Err(PushdownError::Arity {
            found: predicate.arity(),
        });
    }

    match predicate.param(0) {
        Some(p) if p.ty().is_entity() => Ok(p.id()),
        Some(p) => Err(PushdownError::NotAnEntity { ty: p.ty().clone() }),
        None => Err(PushdownError::Arity { found: 0 }),
    }
}

fn check_node(expr: &Expr, entity: ParamId) -> Result<(), PushdownError> {
    match expr.node() {
        ExprNode::Constant(_) => Ok(()),

        ExprNode::Parameter(p) => Err(PushdownError::BareEntity {
            name: p.name().to_string(),
        }),

        ExprNode::Member(m) => match m.target().as_parameter() {
            Some(p) if p.id() == entity => Ok(()),
            _ => Err(PushdownError::ForeignMember {
                field: m.field().to_string(),
            }),
        },

        ExprNode::Compare { left, right, .. }
        | ExprNode::And(left, right)
        | ExprNode::Or(left, right) => {
            check_node(left, entity)?;
            check_node(right, entity)
        }

        ExprNode::Not(inner) | ExprNode::IsNull(inner) => check_node(inner, entity),

        ExprNode::Lambda(_) => Err(PushdownError::UnsupportedNode {
            kind: NodeKind::Lambda,
        }),
    }
}

// Only called on checked trees.
fn render(expr: &Expr, out: &mut String) {
    match expr.node() {
        ExprNode::Constant(c) => render_literal(c.value(), out),
        ExprNode::Member(m) => render_ident(m.field(), out),
        ExprNode::Compare { op, left, right } => {
            out.push('(');
            render(left, out);
            let _ = write!(out, " {} ", sql_op(*op));
            render(right, out);
            out.push(')');
        }
        ExprNode::And(left, right) => render_binary(left, "AND", right, out),
        ExprNode::Or(left, right) => render_binary(left, "OR", right, out),
        ExprNode::Not(inner) if is_two_valued(inner) => {
            out.push_str("(NOT ");
            render(inner, out);
            out.push(')');
        }
        ExprNode::Not(inner) => {
            out.push_str("(NOT COALESCE(");
            render(inner, out);
            out.push_str(", FALSE))");
        }
        ExprNode::IsNull(inner) => {
            out.push('(');
            render(inner, out);
            out.push_str(" IS NULL)");
        }
        ExprNode::Parameter(p) => out.push_str(p.name()),
        ExprNode::Lambda(_) => {}
    }
}

// The rendered form of `expr` is never UNKNOWN.
fn is_two_valued(expr: &Expr) -> bool {
    match expr.node() {
        ExprNode::Constant(c) => !c.value().is_null(),
        ExprNode::IsNull(_) | ExprNode::Not(_) => true,
        ExprNode::And(left, right) | ExprNode::Or(left, right) => {
            is_two_valued(left) && is_two_valued(right)
        }
        _ => false,
    }
}

fn render_binary(left: &Expr, keyword: &str, right: &Expr, out: &mut String) {
    out.push('(');
    render(left, out);
    let _ = write!(out, " {keyword} ");
    render(right, out);
    out.push(')');
}

fn render_ident(name: &str, out: &mut String) {
    out.push('"');
    out.push_str(&name.replace('"', "\"\""));
    out.push('"');
}

fn render_literal(value: &Value, out: &mut String) {
    let _ = match value {
        Value::Bool(true) => write!(out, "TRUE"),
        Value::Bool(false) => write!(out, "FALSE"),
        Value::Date(d) => write!(out, "DATE '{d}'"),
        Value::Int(i) => write!(out, "{i}"),
        Value::Null => write!(out, "NULL"),
        Value::Text(s) => write!(out, "'{}'", s.replace('\'', "''")),
        Value::Timestamp(ts) => write!(out, "{}", ts.get()),
        Value::Uint(u) => write!(out, "{u}"),
    };
}

const fn sql_op(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::Ne => "<>",
        CompareOp::Lt => "<",
        CompareOp::Lte => "<=",
        CompareOp::Gt => ">",
        CompareOp::Gte => ">=",
    }
}
