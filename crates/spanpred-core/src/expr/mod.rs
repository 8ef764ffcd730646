//! Typed, immutable expression trees.
//!
//! Nodes are reference-counted; cloning an [`Expr`] clones the handle, never
//! the subtree. Node identity is handle identity ([`Expr::ptr_eq`]), which is
//! what identity-based substitution keys on. Parameters additionally carry a
//! process-unique [`ParamId`] so bindings survive tree rebuilding.
//!
//! All constructors type-check their operands. A tree that was built through
//! them is well-typed; rewrites preserve that as long as replacements carry
//! the type of the node they replace.

mod display;
mod fold;
mod walk;

#[cfg(test)]
mod tests;

use crate::value::{Value, ValueType};
use std::{
    cmp::Ordering,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering as AtomicOrdering},
    },
};
use thiserror::Error as ThisError;

pub(crate) use fold::map_children;
pub use walk::{alpha_eq, free_parameters, node_kinds};

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(1);
static BOOL: ValueType = ValueType::Bool;

///
/// TypeError
/// construction-time type mismatch between expression nodes
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeError {
    #[error("expected {expected} parameter(s), found {found}")]
    Arity { expected: usize, found: usize },

    #[error("parameter '{name}' appears twice in one parameter list")]
    DuplicateParameter { name: String },

    #[error("parameter '{name}' of entity type {ty} cannot be bound to a constant")]
    EntityBinding { name: String, ty: ValueType },

    #[error("operator '{op}' cannot compare {left} with {right}")]
    Incomparable {
        op: CompareOp,
        left: ValueType,
        right: ValueType,
    },

    #[error("literal {value} does not inhabit type {ty}")]
    Literal { value: Value, ty: ValueType },

    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("lambda parameter list contains a {kind} node")]
    NotAParameter { kind: NodeKind },

    #[error("member access requires an entity operand, found {ty}")]
    NotAnEntity { ty: ValueType },

    #[error("null check requires an optional operand, found {ty}")]
    NotOptional { ty: ValueType },

    #[error("type {ty} is not orderable")]
    NotOrderable { ty: ValueType },

    #[error("entity {entity} has no field '{field}'")]
    UnknownField { entity: String, field: String },
}

///
/// ParamId
/// process-unique parameter identity
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ParamId(u64);

impl ParamId {
    fn fresh() -> Self {
        Self(NEXT_PARAM_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

///
/// Parameter
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    id: ParamId,
    name: String,
    ty: ValueType,
}

impl Parameter {
    #[must_use]
    pub const fn id(&self) -> ParamId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &ValueType {
        &self.ty
    }
}

///
/// Constant
/// literal embedded in the tree, with its static type
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constant {
    value: Value,
    ty: ValueType,
}

impl Constant {
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn ty(&self) -> &ValueType {
        &self.ty
    }
}

///
/// MemberAccess
/// field projection out of an entity-typed operand
///

#[derive(Clone, Debug)]
pub struct MemberAccess {
    target: Expr,
    field: String,
    ty: ValueType,
}

impl MemberAccess {
    #[must_use]
    pub const fn target(&self) -> &Expr {
        &self.target
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn ty(&self) -> &ValueType {
        &self.ty
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }

    /// Whether `ordering` (left relative to right) satisfies the operator.
    #[must_use]
    pub const fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Lt => ordering.is_lt(),
            Self::Lte => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Gte => ordering.is_ge(),
        }
    }

    /// Whether the operator needs an ordering rather than plain equality.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Lte | Self::Gt | Self::Gte)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// Lambda
/// ordered parameter list plus body, typed as a function
///

#[derive(Clone, Debug)]
pub struct Lambda {
    params: Vec<Expr>,
    body: Expr,
    ty: ValueType,
}

impl Lambda {
    /// Build a lambda. Every entry of `params` must be a parameter node and
    /// no parameter may appear twice.
    pub fn new(params: Vec<Expr>, body: Expr) -> Result<Self, TypeError> {
        let mut seen = Vec::with_capacity(params.len());

        for param in &params {
            let Some(p) = param.as_parameter() else {
                return Err(TypeError::NotAParameter {
                    kind: param.kind(),
                });
            };
            if seen.contains(&p.id) {
                return Err(TypeError::DuplicateParameter {
                    name: p.name.clone(),
                });
            }
            seen.push(p.id);
        }

        Ok(Self::assemble(params, body))
    }

    /// Single-parameter lambda over a node built by [`Expr::parameter`].
    pub(crate) fn unary(param: Expr, body: Expr) -> Self {
        Self::assemble(vec![param], body)
    }

    fn assemble(params: Vec<Expr>, body: Expr) -> Self {
        let ty = ValueType::Function {
            params: params.iter().map(|p| p.ty().clone()).collect(),
            ret: Box::new(body.ty().clone()),
        };

        Self { params, body, ty }
    }

    /// Same parameter list, new body. The function type follows the body.
    #[must_use]
    pub fn with_body(&self, body: Expr) -> Self {
        Self::assemble(self.params.clone(), body)
    }

    #[must_use]
    pub fn params(&self) -> &[Expr] {
        &self.params
    }

    /// Parameter at `index`, if any.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index).and_then(Expr::as_parameter)
    }

    #[must_use]
    pub const fn body(&self) -> &Expr {
        &self.body
    }

    #[must_use]
    pub const fn ty(&self) -> &ValueType {
        &self.ty
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameters referenced by the body but not bound by this lambda.
    #[must_use]
    pub fn free_parameters(&self) -> Vec<Parameter> {
        let bound: Vec<ParamId> = self.param_ids().collect();

        free_parameters(&self.body)
            .into_iter()
            .filter(|p| !bound.contains(&p.id))
            .collect()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.free_parameters().is_empty()
    }

    /// Structural equality up to consistent renaming of parameters.
    #[must_use]
    pub fn structurally_eq(&self, other: &Self) -> bool {
        Expr::from_node(ExprNode::Lambda(self.clone()))
            .alpha_eq(&Expr::from_node(ExprNode::Lambda(other.clone())))
    }

    pub(crate) fn param_ids(&self) -> impl Iterator<Item = ParamId> + '_ {
        self.params
            .iter()
            .filter_map(Expr::as_parameter)
            .map(Parameter::id)
    }
}

impl From<Lambda> for Expr {
    fn from(lambda: Lambda) -> Self {
        Self::from_node(ExprNode::Lambda(lambda))
    }
}

///
/// NodeKind
/// discriminant of an expression node, used in diagnostics
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NodeKind {
    And,
    Compare,
    Constant,
    IsNull,
    Lambda,
    Member,
    Not,
    Or,
    Parameter,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::And => "and",
            Self::Compare => "compare",
            Self::Constant => "constant",
            Self::IsNull => "is-null",
            Self::Lambda => "lambda",
            Self::Member => "member",
            Self::Not => "not",
            Self::Or => "or",
            Self::Parameter => "parameter",
        };

        f.write_str(label)
    }
}

///
/// ExprNode
///

#[derive(Debug)]
pub enum ExprNode {
    And(Expr, Expr),
    Compare {
        op: CompareOp,
        left: Expr,
        right: Expr,
    },
    Constant(Constant),
    IsNull(Expr),
    Lambda(Lambda),
    Member(MemberAccess),
    Not(Expr),
    Or(Expr, Expr),
    Parameter(Parameter),
}

///
/// Expr
/// shared handle to an immutable node
///

#[derive(Clone, Debug)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    pub(crate) fn from_node(node: ExprNode) -> Self {
        Self(Arc::new(node))
    }

    /// Fresh parameter with a new identity.
    #[must_use]
    pub fn parameter(name: impl Into<String>, ty: ValueType) -> Self {
        Self::from_node(ExprNode::Parameter(Parameter {
            id: ParamId::fresh(),
            name: name.into(),
            ty,
        }))
    }

    pub fn constant(value: Value, ty: ValueType) -> Result<Self, TypeError> {
        if !value.inhabits(&ty) {
            return Err(TypeError::Literal { value, ty });
        }

        Ok(Self::from_node(ExprNode::Constant(Constant { value, ty })))
    }

    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::from_node(ExprNode::Constant(Constant {
            value: Value::Bool(value),
            ty: ValueType::Bool,
        }))
    }

    /// Null literal of the optional form of `ty`.
    #[must_use]
    pub fn null(ty: ValueType) -> Self {
        Self::from_node(ExprNode::Constant(Constant {
            value: Value::Null,
            ty: ValueType::optional(ty),
        }))
    }

    pub fn member(
        target: Self,
        field: impl Into<String>,
        ty: ValueType,
    ) -> Result<Self, TypeError> {
        if !target.ty().is_entity() {
            return Err(TypeError::NotAnEntity {
                ty: target.ty().clone(),
            });
        }

        Ok(Self::from_node(ExprNode::Member(MemberAccess {
            target,
            field: field.into(),
            ty,
        })))
    }

    /// Comparison over two operands of the same scalar type; either side may
    /// be optional.
    pub fn compare(op: CompareOp, left: Self, right: Self) -> Result<Self, TypeError> {
        let l = left.ty().strip_optional();
        let r = right.ty().strip_optional();

        let comparable = l == r
            && match l {
                ValueType::Entity(_) | ValueType::Function { .. } | ValueType::Optional(_) => false,
                ValueType::Bool => !op.is_ordering(),
                _ => true,
            };
        if !comparable {
            return Err(TypeError::Incomparable {
                op,
                left: left.ty().clone(),
                right: right.ty().clone(),
            });
        }

        Ok(Self::from_node(ExprNode::Compare { op, left, right }))
    }

    pub fn and(left: Self, right: Self) -> Result<Self, TypeError> {
        expect_bool(&left)?;
        expect_bool(&right)?;

        Ok(Self::from_node(ExprNode::And(left, right)))
    }

    pub fn or(left: Self, right: Self) -> Result<Self, TypeError> {
        expect_bool(&left)?;
        expect_bool(&right)?;

        Ok(Self::from_node(ExprNode::Or(left, right)))
    }

    pub fn not(inner: Self) -> Result<Self, TypeError> {
        expect_bool(&inner)?;

        Ok(Self::from_node(ExprNode::Not(inner)))
    }

    pub fn is_null(inner: Self) -> Result<Self, TypeError> {
        if !inner.ty().is_optional() {
            return Err(TypeError::NotOptional {
                ty: inner.ty().clone(),
            });
        }

        Ok(Self::from_node(ExprNode::IsNull(inner)))
    }

    #[must_use]
    pub fn node(&self) -> &ExprNode {
        &self.0
    }

    /// Handle identity: both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn ty(&self) -> &ValueType {
        match self.node() {
            ExprNode::And(..)
            | ExprNode::Compare { .. }
            | ExprNode::IsNull(_)
            | ExprNode::Not(_)
            | ExprNode::Or(..) => &BOOL,
            ExprNode::Constant(c) => &c.ty,
            ExprNode::Lambda(l) => &l.ty,
            ExprNode::Member(m) => &m.ty,
            ExprNode::Parameter(p) => &p.ty,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self.node() {
            ExprNode::And(..) => NodeKind::And,
            ExprNode::Compare { .. } => NodeKind::Compare,
            ExprNode::Constant(_) => NodeKind::Constant,
            ExprNode::IsNull(_) => NodeKind::IsNull,
            ExprNode::Lambda(_) => NodeKind::Lambda,
            ExprNode::Member(_) => NodeKind::Member,
            ExprNode::Not(_) => NodeKind::Not,
            ExprNode::Or(..) => NodeKind::Or,
            ExprNode::Parameter(_) => NodeKind::Parameter,
        }
    }

    #[must_use]
    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self.node() {
            ExprNode::Parameter(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_constant(&self) -> Option<&Constant> {
        match self.node() {
            ExprNode::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// Boolean literal value, if this node is one.
    #[must_use]
    pub fn as_bool_constant(&self) -> Option<bool> {
        self.as_constant().and_then(|c| c.value.as_bool())
    }

    /// Structural equality up to consistent renaming of lambda parameters.
    /// Free parameters must match by identity.
    #[must_use]
    pub fn alpha_eq(&self, other: &Self) -> bool {
        alpha_eq(self, other)
    }
}

fn expect_bool(expr: &Expr) -> Result<(), TypeError> {
    if expr.ty() == &ValueType::Bool {
        Ok(())
    } else {
        Err(TypeError::Mismatch {
            expected: ValueType::Bool,
            found: expr.ty().clone(),
        })
    }
}
