use crate::{
    expr::{Expr, Lambda, TypeError},
    interval::{
        template::IntervalTemplate,
        typed::{Accessor, Predicate},
    },
    rewrite::{ConstantBindings, bind_constants, substitute, unify_parameters},
    traits::{Comparable, Entity},
    value::{Value, ValueType},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use tracing::{instrument, trace};

/// Name given to the single parameter of every composed predicate.
pub const ENTITY_PARAM: &str = "entity";

///
/// ComposeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ComposeError {
    #[error("{side} accessor: {source}")]
    Accessor {
        side: BoundSide,
        #[source]
        source: TypeError,
    },

    #[error("accessors disagree on entity type: start takes {start}, end takes {end}")]
    EntityMismatch { start: ValueType, end: ValueType },

    #[error("comparison value must not be null")]
    NullComparison,

    #[error("composed predicate still references parameter(s): {names}")]
    NotClosed { names: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

///
/// BoundSide
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
pub enum BoundSide {
    #[display("start")]
    Start,
    #[display("end")]
    End,
}

///
/// Bounds
/// inclusivity of each end of the interval
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Bounds {
    pub include_start: bool,
    pub include_end: bool,
}

impl Bounds {
    /// `[start, end)`, for instants.
    pub const HALF_OPEN: Self = Self::new(true, false);

    /// `[start, end]`, for whole dates.
    pub const CLOSED: Self = Self::new(true, true);

    /// `(start, end)`
    pub const OPEN: Self = Self::new(false, false);

    #[must_use]
    pub const fn new(include_start: bool, include_end: bool) -> Self {
        Self {
            include_start,
            include_end,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::CLOSED
    }
}

///
/// Compose a closed interval-containment predicate from two accessors.
///
/// Preconditions (checked):
/// - both accessors take exactly one entity-typed parameter, of the same entity
/// - both accessor bodies have type `T?`, where `T` is the type of `compare_to`
///
/// Precondition (not checked): accessor bodies are pure projections of their
/// parameter. The composer copies them verbatim.
///
/// The result has exactly one parameter (the entity) and is built only from
/// parameters, constants, member access, comparisons, AND/OR/NOT and null
/// checks.
///
#[instrument(level = "trace", skip_all, name = "interval::compose")]
pub fn compose_dyn(
    compare_to: Value,
    start: &Lambda,
    end: &Lambda,
    bounds: Bounds,
) -> Result<Lambda, ComposeError> {
    let Some(ty) = compare_to.scalar_type() else {
        return Err(ComposeError::NullComparison);
    };

    let start_entity = check_accessor(start, &ty, BoundSide::Start)?;
    let end_entity = check_accessor(end, &ty, BoundSide::End)?;
    if start_entity != end_entity {
        return Err(ComposeError::EntityMismatch {
            start: start_entity,
            end: end_entity,
        });
    }

    // template(start, end, include_start, include_end) over compare_to
    let template = IntervalTemplate::new_dyn(compare_to, ty)?;
    let body = template.lambda().body();

    // inline the accessor bodies where the bound parameters are used
    let body = substitute(body, template.start(), start.body());
    let body = substitute(&body, template.end(), end.body());

    // flags become literals
    let mut bindings = ConstantBindings::new();
    if let Some(p) = template.include_start().as_parameter() {
        bindings.insert(p, Value::Bool(bounds.include_start))?;
    }
    if let Some(p) = template.include_end().as_parameter() {
        bindings.insert(p, Value::Bool(bounds.include_end))?;
    }
    let body = bind_constants(&body, &bindings);

    // both accessor parameters collapse into one entity parameter
    let entity = Expr::parameter(ENTITY_PARAM, start_entity);
    let body = unify_parameters(&body, &entity)?;

    let predicate = Lambda::new(vec![entity], body)?;

    let free = predicate.free_parameters();
    if !free.is_empty() {
        let names = free
            .iter()
            .map(|p| p.name().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        return Err(ComposeError::NotClosed { names });
    }

    trace!(
        include_start = bounds.include_start,
        include_end = bounds.include_end,
        predicate = %predicate,
        "composed interval predicate"
    );

    Ok(predicate)
}

/// Typed form of [`compose_dyn`]; `E` and `T` are fixed by the accessors.
pub fn compose<E: Entity, T: Comparable>(
    compare_to: T,
    start: &Accessor<E, T>,
    end: &Accessor<E, T>,
    bounds: Bounds,
) -> Result<Predicate<E>, ComposeError> {
    compose_dyn(compare_to.into(), start.lambda(), end.lambda(), bounds)
        .map(Predicate::new_unchecked)
}

/// `[start, end)`: start included, end excluded.
pub fn compose_half_open<E: Entity, T: Comparable>(
    compare_to: T,
    start: &Accessor<E, T>,
    end: &Accessor<E, T>,
) -> Result<Predicate<E>, ComposeError> {
    compose(compare_to, start, end, Bounds::HALF_OPEN)
}

/// `[start, end]`: both ends included.
pub fn compose_closed<E: Entity, T: Comparable>(
    compare_to: T,
    start: &Accessor<E, T>,
    end: &Accessor<E, T>,
) -> Result<Predicate<E>, ComposeError> {
    compose(compare_to, start, end, Bounds::CLOSED)
}

// Returns the accessor's entity type.
fn check_accessor(
    accessor: &Lambda,
    ty: &ValueType,
    side: BoundSide,
) -> Result<ValueType, ComposeError> {
    let err = |source| ComposeError::Accessor { side, source };

    if accessor.arity() != 1 {
        return Err(err(TypeError::Arity {
            expected: 1,
            found: accessor.arity(),
        }));
    }

    let entity = accessor
        .param(0)
        .map(|p| p.ty().clone())
        .filter(ValueType::is_entity);
    let Some(entity) = entity else {
        return Err(err(TypeError::NotAnEntity {
            ty: accessor.params()[0].ty().clone(),
        }));
    };

    let expected = ValueType::optional(ty.clone());
    if accessor.body().ty() != &expected {
        return Err(err(TypeError::Mismatch {
            expected,
            found: accessor.body().ty().clone(),
        }));
    }

    Ok(entity)
}
