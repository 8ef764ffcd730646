use crate::{
    eval::{EvalError, eval_predicate},
    expr::{Expr, Lambda, TypeError},
    model::entity::EntityModel,
    pushdown::{self, PushdownError},
    traits::{Comparable, Entity},
    value::ValueType,
};
use std::{fmt, marker::PhantomData};

///
/// Accessor
///
/// One-parameter lambda `E -> T?` projecting an interval bound.
/// The body is always optional: a non-nullable field is lifted, and an
/// unbounded side is a null constant.
///

pub struct Accessor<E: Entity, T: Comparable> {
    lambda: Lambda,
    _marker: PhantomData<fn(&E) -> T>,
}

impl<E: Entity, T: Comparable> Accessor<E, T> {
    /// Member projection of `field`; the field must exist on `E` and hold `T`.
    pub fn field(name: &str) -> Result<Self, TypeError> {
        field_accessor(E::MODEL, name, &T::value_type()).map(Self::wrap)
    }

    /// A side with no bound.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::wrap(unbounded_accessor(E::MODEL, &T::value_type()))
    }

    /// Checked wrap of an arbitrary lambda.
    pub fn from_lambda(lambda: Lambda) -> Result<Self, TypeError> {
        if lambda.arity() != 1 {
            return Err(TypeError::Arity {
                expected: 1,
                found: lambda.arity(),
            });
        }

        let entity = E::entity_type();
        let param_ty = lambda.params()[0].ty();
        if param_ty != &entity {
            return Err(TypeError::Mismatch {
                expected: entity,
                found: param_ty.clone(),
            });
        }

        let expected = ValueType::optional(T::value_type());
        if lambda.body().ty() != &expected {
            return Err(TypeError::Mismatch {
                expected,
                found: lambda.body().ty().clone(),
            });
        }

        Ok(Self::wrap(lambda))
    }

    #[must_use]
    pub const fn lambda(&self) -> &Lambda {
        &self.lambda
    }

    const fn wrap(lambda: Lambda) -> Self {
        Self {
            lambda,
            _marker: PhantomData,
        }
    }
}

impl<E: Entity, T: Comparable> Clone for Accessor<E, T> {
    fn clone(&self) -> Self {
        Self::wrap(self.lambda.clone())
    }
}

impl<E: Entity, T: Comparable> fmt::Debug for Accessor<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Accessor").field(&self.lambda).finish()
    }
}

///
/// Dynamic accessor over `model.field`, typed `ty?`.
///
/// The field's scalar kind must equal `ty`. Nullability is erased: the
/// member node is always typed optional.
///
pub fn field_accessor(
    model: &EntityModel,
    field: &str,
    ty: &ValueType,
) -> Result<Lambda, TypeError> {
    let Some(field_model) = model.field(field) else {
        return Err(TypeError::UnknownField {
            entity: model.entity_name.to_string(),
            field: field.to_string(),
        });
    };

    let scalar = field_model.kind.value_type();
    if &scalar != ty {
        return Err(TypeError::Mismatch {
            expected: ty.clone(),
            found: field_model.value_type(),
        });
    }

    let param = Expr::parameter(short_name(model), model.entity_type());
    let body = Expr::member(param.clone(), field, ValueType::optional(scalar))?;

    Lambda::new(vec![param], body)
}

/// Dynamic accessor with a null body, typed `ty?`.
#[must_use]
pub fn unbounded_accessor(model: &EntityModel, ty: &ValueType) -> Lambda {
    let param = Expr::parameter(short_name(model), model.entity_type());

    Lambda::unary(param, Expr::null(ty.clone()))
}

fn short_name(model: &EntityModel) -> String {
    model
        .entity_name
        .chars()
        .next()
        .map_or_else(|| "e".to_string(), |c| c.to_lowercase().collect())
}

///
/// Predicate
///
/// A composed, closed `E -> bool` lambda.
///

pub struct Predicate<E: Entity> {
    lambda: Lambda,
    _marker: PhantomData<fn(&E)>,
}

impl<E: Entity> Predicate<E> {
    pub(crate) const fn new_unchecked(lambda: Lambda) -> Self {
        Self {
            lambda,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn lambda(&self) -> &Lambda {
        &self.lambda
    }

    #[must_use]
    pub fn into_lambda(self) -> Lambda {
        self.lambda
    }

    /// Evaluate against one entity.
    pub fn matches(&self, entity: &E) -> Result<bool, EvalError> {
        eval_predicate(&self.lambda, entity)
    }

    /// Entities that satisfy the predicate, in input order.
    pub fn filter<'a, I>(&self, entities: I) -> Result<Vec<&'a E>, EvalError>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let mut out = Vec::new();
        for entity in entities {
            if self.matches(entity)? {
                out.push(entity);
            }
        }

        Ok(out)
    }

    /// SQL-style filter text for a remote backend.
    pub fn render_filter(&self) -> Result<String, PushdownError> {
        pushdown::render_filter(&self.lambda)
    }

    #[must_use]
    pub fn structurally_eq(&self, other: &Self) -> bool {
        self.lambda.structurally_eq(&other.lambda)
    }
}

impl<E: Entity> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self::new_unchecked(self.lambda.clone())
    }
}

impl<E: Entity> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.lambda).finish()
    }
}

impl<E: Entity> fmt::Display for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.lambda, f)
    }
}
