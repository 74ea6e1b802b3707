//! Field-name translation between the frontend and backend naming conventions.
//!
//! The frontend works with camelCase field names while the backend collection API spells a
//! handful of fields in snake_case. The pairs are declared once in [`FIELD_ALIASES`] and every
//! read, write and create path goes through a [`Translator`] built from that table.
//!
//! Translation is top-level only: fields outside the alias table, including nested objects,
//! keep their name and value untouched in both directions.

use serde_json::{Map, Value};

use crate::model::entity::Entity;

/// A field whose name differs between the frontend and the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldAlias {
    pub frontend: &'static str,
    pub backend: &'static str,
}

impl FieldAlias {
    pub const fn new(frontend: &'static str, backend: &'static str) -> Self {
        Self { frontend, backend }
    }
}

/// Every field whose name differs between the two conventions.
pub const FIELD_ALIASES: &[FieldAlias] = &[
    FieldAlias::new("primaryPhone", "primary_phone"),
    FieldAlias::new("dateOfBirth", "date_of_birth"),
    FieldAlias::new("workPhone", "work_phone"),
    FieldAlias::new("homePhone", "home_phone"),
    FieldAlias::new("socialSecurityNumber", "social_security_number"),
    FieldAlias::new("zipCode", "zip_code"),
    FieldAlias::new("imageUrl", "image_url"),
];

/// Bidirectional, stateless field-name mapping over an alias table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Translator {
    aliases: &'static [FieldAlias],
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(FIELD_ALIASES)
    }
}

impl Translator {
    pub const fn new(aliases: &'static [FieldAlias]) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &'static [FieldAlias] {
        self.aliases
    }

    /// Converts a frontend-shaped entity (partial or complete) to backend field names.
    ///
    /// Aliased fields are emitted under their backend name and the frontend name is dropped;
    /// all other fields are carried over unchanged. When an input carries both spellings of the
    /// same field, the frontend value wins.
    pub fn to_backend(&self, entity: Entity) -> Entity {
        self.remap(entity, |alias| alias.frontend, |alias| alias.backend)
    }

    /// Converts a backend-shaped entity to frontend field names, the inverse of
    /// [`Translator::to_backend`]. When an input carries both spellings of the same field, the
    /// backend value wins.
    pub fn to_frontend(&self, entity: Entity) -> Entity {
        self.remap(entity, |alias| alias.backend, |alias| alias.frontend)
    }

    /// Backend spelling of a single field name
    pub fn backend_name<'a>(&self, field: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|alias| alias.frontend == field)
            .map_or(field, |alias| alias.backend)
    }

    /// Frontend spelling of a single field name
    pub fn frontend_name<'a>(&self, field: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|alias| alias.backend == field)
            .map_or(field, |alias| alias.frontend)
    }

    /// Renames aliased object keys to their backend spelling at every depth.
    ///
    /// Used for the `s` search object of list queries, where field names appear as keys
    /// nested under operators such as `$or` and `$and`.
    pub fn search_to_backend(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        (
                            self.backend_name(&key).to_string(),
                            self.search_to_backend(value),
                        )
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.search_to_backend(item))
                    .collect(),
            ),
            other => other,
        }
    }

    fn remap(
        &self,
        entity: Entity,
        from: fn(&FieldAlias) -> &'static str,
        to: fn(&FieldAlias) -> &'static str,
    ) -> Entity {
        let mut output = Map::new();
        let mut remapped = Vec::new();

        for (field, value) in entity {
            match self.aliases.iter().find(|alias| from(alias) == field) {
                Some(alias) => remapped.push((to(alias), value)),
                None => {
                    output.insert(field, value);
                }
            }
        }

        // Inserted last so a remapped value replaces a stale copy under the target name
        for (field, value) in remapped {
            output.insert(field.to_string(), value);
        }

        Entity::from(output)
    }
}
