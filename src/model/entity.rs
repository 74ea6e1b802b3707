//! Dynamic entity records.
//!
//! The backend collection API returns loosely shaped JSON objects. An [`Entity`] wraps one such
//! object and is used for both the frontend and the backend field-naming convention; which one a
//! given value is in is decided by where it sits relative to the [`Translator`] boundary.
//!
//! [`Translator`]: crate::model::translator::Translator

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the stable record identifier, identical in both naming conventions.
pub const ID_FIELD: &str = "id";

/// A record from the backend collection API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", schema(value_type = Object))]
#[serde(transparent)]
pub struct Entity(Map<String, Value>);

impl Entity {
    /// Creates an empty entity
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Numeric record identifier, when present
    pub fn id(&self) -> Option<i64> {
        self.0.get(ID_FIELD).and_then(Value::as_i64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Sets `field` to `value`, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Builder-style [`Entity::insert`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Value::Object(entity.0)
    }
}

impl TryFrom<Value> for Entity {
    type Error = Value;

    /// Accepts JSON objects only, handing any other value back
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl FromIterator<(String, Value)> for Entity {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Entity {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
