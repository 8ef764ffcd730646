use crate::{model::field::EntityFieldModel, value::ValueType};

///
/// EntityModel
/// Minimal runtime model for one entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for diagnostics).
    pub path: &'static str,
    /// Stable external name; doubles as the entity's `ValueType` name.
    pub entity_name: &'static str,
    /// Ordered field list.
    pub fields: &'static [EntityFieldModel],
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static EntityFieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn entity_type(&self) -> ValueType {
        ValueType::entity(self.entity_name)
    }
}
