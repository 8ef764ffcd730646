use crate::{
    expr::{CompareOp, Expr, Lambda, Parameter, TypeError},
    traits::Comparable,
    value::{Value, ValueType},
};

///
/// IntervalTemplate
///
/// The containment test, defined once per comparison value:
///
/// ```text
/// |start: T?, end: T?, include_start: bool, include_end: bool|
///       (start == null || (start <= v && include_start) || (start < v && !include_start))
///    && (end   == null || (end   >= v && include_end)   || (end   > v && !include_end))
/// ```
///
/// `v` is embedded as a constant. The four inputs stay free parameters so
/// the composer can substitute whole expressions for `start`/`end`, not
/// just values. A built template is never mutated and may be reused.
///

#[derive(Clone, Debug)]
pub struct IntervalTemplate {
    lambda: Lambda,
    compare_to: Value,
}

impl IntervalTemplate {
    /// Template over a statically typed comparison value.
    pub fn new<T: Comparable>(compare_to: T) -> Result<Self, TypeError> {
        Self::new_dyn(compare_to.into(), T::value_type())
    }

    /// Template over a dynamically typed comparison value. `ty` must be an
    /// orderable scalar type and `compare_to` a non-null value of it.
    pub fn new_dyn(compare_to: Value, ty: ValueType) -> Result<Self, TypeError> {
        if !ty.is_orderable() {
            return Err(TypeError::NotOrderable { ty });
        }
        if compare_to.is_null() {
            return Err(TypeError::Literal {
                value: compare_to,
                ty,
            });
        }

        let v = Expr::constant(compare_to.clone(), ty.clone())?;

        let start = Expr::parameter("start", ValueType::optional(ty.clone()));
        let end = Expr::parameter("end", ValueType::optional(ty));
        let include_start = Expr::parameter("include_start", ValueType::Bool);
        let include_end = Expr::parameter("include_end", ValueType::Bool);

        let lower = bound_check(&start, &v, CompareOp::Lte, CompareOp::Lt, &include_start)?;
        let upper = bound_check(&end, &v, CompareOp::Gte, CompareOp::Gt, &include_end)?;
        let body = Expr::and(lower, upper)?;

        let lambda = Lambda::new(vec![start, end, include_start, include_end], body)?;

        Ok(Self { lambda, compare_to })
    }

    #[must_use]
    pub const fn lambda(&self) -> &Lambda {
        &self.lambda
    }

    #[must_use]
    pub const fn compare_to(&self) -> &Value {
        &self.compare_to
    }

    /// The `start` parameter node (handle shared with its uses in the body).
    #[must_use]
    pub fn start(&self) -> &Expr {
        &self.lambda.params()[0]
    }

    #[must_use]
    pub fn end(&self) -> &Expr {
        &self.lambda.params()[1]
    }

    #[must_use]
    pub fn include_start(&self) -> &Expr {
        &self.lambda.params()[2]
    }

    #[must_use]
    pub fn include_end(&self) -> &Expr {
        &self.lambda.params()[3]
    }

    /// Parameter metadata for one of the four template inputs.
    #[must_use]
    pub fn parameter(&self, slot: TemplateSlot) -> Option<&Parameter> {
        self.lambda.param(slot as usize)
    }
}

///
/// TemplateSlot
/// positional index of a template input
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TemplateSlot {
    Start = 0,
    End = 1,
    IncludeStart = 2,
    IncludeEnd = 3,
}

// bound IS NULL || (bound inclusive v && flag) || (bound exclusive v && !flag)
fn bound_check(
    bound: &Expr,
    v: &Expr,
    inclusive: CompareOp,
    exclusive: CompareOp,
    flag: &Expr,
) -> Result<Expr, TypeError> {
    let unbounded = Expr::is_null(bound.clone())?;
    let inclusive = Expr::and(
        Expr::compare(inclusive, bound.clone(), v.clone())?,
        flag.clone(),
    )?;
    let exclusive = Expr::and(
        Expr::compare(exclusive, bound.clone(), v.clone())?,
        Expr::not(flag.clone())?,
    )?;

    Expr::or(Expr::or(unbounded, inclusive)?, exclusive)
}
