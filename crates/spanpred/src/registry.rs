use crate::error::{Error, ErrorKind, ErrorOrigin};
use spanpred_config::{Config, ResolvedInterval};
use spanpred_core::{
    expr::Lambda,
    interval::{Bounds, ComposeError, compose_dyn, field_accessor, unbounded_accessor},
    model::entity::EntityModel,
    value::{Value, ValueType},
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

///
/// IntervalRegistry
///
/// Named interval definitions bound to runtime entity models.
/// Predicates are composed on demand; nothing is cached.
///

#[derive(Debug, Default)]
pub struct IntervalRegistry {
    config: Config,
    models: BTreeMap<&'static str, &'static EntityModel>,
}

impl IntervalRegistry {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            models: BTreeMap::new(),
        }
    }

    /// Build from config and models, then check every definition against
    /// the models.
    pub fn from_config(
        config: Config,
        models: impl IntoIterator<Item = &'static EntityModel>,
    ) -> Result<Self, Error> {
        let mut registry = Self::new(config);
        for model in models {
            registry.register(model);
        }
        registry.validate()?;

        Ok(registry)
    }

    /// Register `model` under its entity name, replacing any earlier one.
    pub fn register(&mut self, model: &'static EntityModel) -> &mut Self {
        debug!(entity = model.entity_name, "registered entity model");
        self.models.insert(model.entity_name, model);

        self
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Configured interval names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.config.intervals.keys().map(String::as_str)
    }

    /// Every definition refers to a registered entity, its fields exist, and
    /// both bounds share one scalar kind.
    pub fn validate(&self) -> Result<(), Error> {
        for interval in self.config.resolved() {
            let model = self.model(&interval)?;
            field_type(model, &interval)?;
        }

        Ok(())
    }

    ///
    /// Compose the predicate for interval `name` at `compare_to`.
    ///
    /// The result is a closed `entity -> bool` lambda over the interval's
    /// entity, ready for [`spanpred_core::eval::eval_predicate`] or
    /// [`spanpred_core::pushdown::render_filter`].
    ///
    #[instrument(level = "debug", skip(self, compare_to), name = "registry::predicate")]
    pub fn predicate(&self, name: &str, compare_to: Value) -> Result<Lambda, Error> {
        let interval = self
            .config
            .interval(name)
            .ok_or_else(|| Error::unknown_interval(name))?;
        let model = self.model(&interval)?;

        let Some(ty) = compare_to.scalar_type() else {
            return Err(ComposeError::NullComparison.into());
        };

        let start = accessor(model, interval.start, &ty)?;
        let end = accessor(model, interval.end, &ty)?;
        let bounds = Bounds::new(interval.include_start, interval.include_end);

        let predicate = compose_dyn(compare_to, &start, &end, bounds)?;
        debug!(
            entity = interval.entity,
            include_start = bounds.include_start,
            include_end = bounds.include_end,
            "resolved interval predicate"
        );

        Ok(predicate)
    }

    fn model(&self, interval: &ResolvedInterval<'_>) -> Result<&'static EntityModel, Error> {
        self.models
            .get(interval.entity)
            .copied()
            .ok_or_else(|| Error::unknown_entity(interval.name, interval.entity))
    }
}

fn accessor(model: &EntityModel, field: Option<&str>, ty: &ValueType) -> Result<Lambda, Error> {
    match field {
        Some(field) => Ok(field_accessor(model, field, ty)?),
        None => Ok(unbounded_accessor(model, ty)),
    }
}

// Scalar type shared by the configured bound fields.
fn field_type(model: &EntityModel, interval: &ResolvedInterval<'_>) -> Result<ValueType, Error> {
    let mut found: Option<ValueType> = None;

    for field in [interval.start, interval.end].into_iter().flatten() {
        let Some(field_model) = model.field(field) else {
            return Err(Error::new(
                ErrorKind::NotFound,
                ErrorOrigin::Registry,
                format!(
                    "interval '{}': entity {} has no field '{field}'",
                    interval.name, model.entity_name
                ),
            ));
        };

        let ty = field_model.kind.value_type();
        if !ty.is_orderable() {
            return Err(Error::new(
                ErrorKind::Invalid,
                ErrorOrigin::Registry,
                format!(
                    "interval '{}': field '{field}' of type {ty} is not orderable",
                    interval.name
                ),
            ));
        }

        match &found {
            Some(prev) if prev != &ty => {
                return Err(Error::new(
                    ErrorKind::Invalid,
                    ErrorOrigin::Registry,
                    format!(
                        "interval '{}': bounds disagree on type ({prev} vs {ty})",
                        interval.name
                    ),
                ));
            }
            _ => found = Some(ty),
        }
    }

    found.ok_or_else(|| {
        Error::new(
            ErrorKind::Invalid,
            ErrorOrigin::Registry,
            format!("interval '{}' has no bounds", interval.name),
        )
    })
}
