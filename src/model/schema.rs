//! Collections exposed by the backend and the typed schema of each.
//!
//! Schemas are written in frontend field naming; the [`Translator`] owns every naming concern
//! so a schema never mentions a backend spelling.
//!
//! [`Translator`]: crate::model::translator::Translator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::entity::Entity;

/// Fields the change tracker never diffs: identity, bookkeeping and access control.
pub const EXCLUDED_FROM_DELTA: &[&str] = &[
    "id",
    "externalId",
    "createdAt",
    "updatedAt",
    "status",
    "role",
];

/// Schema check failure for an entity, before or after translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field `{0}`")]
    MissingField(String),
    #[error("Field `{field}` must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
}

/// Value shape accepted by a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text containing a local part and a dotted domain
    Email,
    /// Calendar date formatted as `YYYY-MM-DD`
    Date,
    Number,
    Boolean,
    /// Object or array of nested records
    Nested,
}

impl FieldKind {
    fn description(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Email => "an email address",
            Self::Date => "a date formatted as YYYY-MM-DD",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::Nested => "an object or array",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Email => value.as_str().is_some_and(is_email),
            Self::Date => value
                .as_str()
                .is_some_and(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Nested => value.is_object() || value.is_array(),
        }
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_null() && self.nullable {
            return Ok(());
        }

        if self.kind.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::InvalidField {
                field: self.name.to_string(),
                expected: self.kind.description(),
            })
        }
    }
}

/// Canonical frontend shape of one collection.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
    /// Fields that must be present when creating a record
    pub required_on_create: &'static [&'static str],
    /// Field the backend requires on every update to confirm the record's identity
    pub identity_field: Option<&'static str>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Checks the kind of every known field present in `entity`; unknown fields pass through
    pub fn validate_fields(&self, entity: &Entity) -> Result<(), ValidationError> {
        for (name, value) in entity.iter() {
            if let Some(spec) = self.field(name) {
                spec.check(value)?;
            }
        }

        Ok(())
    }

    /// Validates a frontend-shaped body for record creation
    pub fn validate_create(&self, entity: &Entity) -> Result<(), ValidationError> {
        if let Some(missing) = self
            .required_on_create
            .iter()
            .find(|field| entity.get(field).map_or(true, Value::is_null))
        {
            return Err(ValidationError::MissingField(missing.to_string()));
        }

        self.validate_fields(entity)
    }

    /// Validates a frontend-shaped body for a full or partial update
    pub fn validate_update(&self, entity: &Entity) -> Result<(), ValidationError> {
        if let Some(identity) = self.identity_field {
            if entity.get(identity).map_or(true, Value::is_null) {
                return Err(ValidationError::MissingField(identity.to_string()));
            }
        }

        self.validate_fields(entity)
    }
}

const PERSON_CONTACT: [FieldSpec; 8] = [
    FieldSpec::optional("primaryPhone", FieldKind::Text),
    FieldSpec::optional("workPhone", FieldKind::Text),
    FieldSpec::optional("homePhone", FieldKind::Text),
    FieldSpec::optional("address", FieldKind::Text),
    FieldSpec::optional("city", FieldKind::Text),
    FieldSpec::optional("state", FieldKind::Text),
    FieldSpec::optional("zipCode", FieldKind::Text),
    FieldSpec::optional("imageUrl", FieldKind::Text),
];

const BOOKKEEPING: [FieldSpec; 3] = [
    FieldSpec::required("id", FieldKind::Number),
    FieldSpec::optional("createdAt", FieldKind::Text),
    FieldSpec::optional("updatedAt", FieldKind::Text),
];

const USER_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::optional("externalId", FieldKind::Text),
    FieldSpec::required("email", FieldKind::Email),
    FieldSpec::optional("firstName", FieldKind::Text),
    FieldSpec::optional("lastName", FieldKind::Text),
    FieldSpec::optional("dateOfBirth", FieldKind::Date),
    FieldSpec::optional("socialSecurityNumber", FieldKind::Text),
    FieldSpec::optional("role", FieldKind::Text),
    FieldSpec::optional("status", FieldKind::Text),
    PERSON_CONTACT[0],
    PERSON_CONTACT[1],
    PERSON_CONTACT[2],
    PERSON_CONTACT[3],
    PERSON_CONTACT[4],
    PERSON_CONTACT[5],
    PERSON_CONTACT[6],
    PERSON_CONTACT[7],
];

const CLIENT_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::required("firstName", FieldKind::Text),
    FieldSpec::required("lastName", FieldKind::Text),
    FieldSpec::optional("email", FieldKind::Email),
    FieldSpec::optional("dateOfBirth", FieldKind::Date),
    FieldSpec::optional("socialSecurityNumber", FieldKind::Text),
    FieldSpec::optional("status", FieldKind::Text),
    FieldSpec::optional("emergencyContacts", FieldKind::Nested),
    FieldSpec::optional("specialConditions", FieldKind::Nested),
    PERSON_CONTACT[0],
    PERSON_CONTACT[1],
    PERSON_CONTACT[2],
    PERSON_CONTACT[3],
    PERSON_CONTACT[4],
    PERSON_CONTACT[5],
    PERSON_CONTACT[6],
    PERSON_CONTACT[7],
];

const EMERGENCY_CONTACT_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::optional("relationship", FieldKind::Text),
    FieldSpec::optional("email", FieldKind::Email),
    FieldSpec::required("clientId", FieldKind::Number),
    PERSON_CONTACT[0],
    PERSON_CONTACT[1],
    PERSON_CONTACT[2],
];

const CLINIC_INFORMATION_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::optional("email", FieldKind::Email),
    FieldSpec::optional("website", FieldKind::Text),
    PERSON_CONTACT[0],
    PERSON_CONTACT[1],
    PERSON_CONTACT[3],
    PERSON_CONTACT[4],
    PERSON_CONTACT[5],
    PERSON_CONTACT[6],
    PERSON_CONTACT[7],
];

const SPECIAL_CONDITION_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::optional("description", FieldKind::Text),
    FieldSpec::required("clientId", FieldKind::Number),
];

const STAFF_HOURS_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::required("userId", FieldKind::Number),
    FieldSpec::required("date", FieldKind::Date),
    FieldSpec::required("hours", FieldKind::Number),
    FieldSpec::optional("approved", FieldKind::Boolean),
];

const NOTE_FIELDS: &[FieldSpec] = &[
    BOOKKEEPING[0],
    BOOKKEEPING[1],
    BOOKKEEPING[2],
    FieldSpec::required("content", FieldKind::Text),
    FieldSpec::optional("clientId", FieldKind::Number),
    FieldSpec::optional("authorId", FieldKind::Number),
];

static USERS: Schema = Schema {
    fields: USER_FIELDS,
    required_on_create: &["email"],
    identity_field: Some("email"),
};

static CLIENTS: Schema = Schema {
    fields: CLIENT_FIELDS,
    required_on_create: &["firstName", "lastName"],
    identity_field: None,
};

static EMERGENCY_CONTACTS: Schema = Schema {
    fields: EMERGENCY_CONTACT_FIELDS,
    required_on_create: &["name", "primaryPhone", "clientId"],
    identity_field: None,
};

static CLINIC_INFORMATIONS: Schema = Schema {
    fields: CLINIC_INFORMATION_FIELDS,
    required_on_create: &["name"],
    identity_field: None,
};

static SPECIAL_CONDITIONS: Schema = Schema {
    fields: SPECIAL_CONDITION_FIELDS,
    required_on_create: &["name", "clientId"],
    identity_field: None,
};

static STAFF_HOURS: Schema = Schema {
    fields: STAFF_HOURS_FIELDS,
    required_on_create: &["userId", "date", "hours"],
    identity_field: None,
};

static NOTES: Schema = Schema {
    fields: NOTE_FIELDS,
    required_on_create: &["content"],
    identity_field: None,
};

/// A collection of the backend CRUD API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Users,
    Clients,
    EmergencyContacts,
    ClinicInformations,
    SpecialConditions,
    StaffHours,
    Notes,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Self::Users,
        Self::Clients,
        Self::EmergencyContacts,
        Self::ClinicInformations,
        Self::SpecialConditions,
        Self::StaffHours,
        Self::Notes,
    ];

    /// Path segment of the collection on the backend API
    pub fn backend_path(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Clients => "Clients",
            Self::EmergencyContacts => "EmergencyContacts",
            Self::ClinicInformations => "ClinicInformations",
            Self::SpecialConditions => "SpecialConditions",
            Self::StaffHours => "staffHours",
            Self::Notes => "notes",
        }
    }

    /// Path segment of the collection on the proxy API
    pub fn slug(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Clients => "clients",
            Self::EmergencyContacts => "emergency-contacts",
            Self::ClinicInformations => "clinic-informations",
            Self::SpecialConditions => "special-conditions",
            Self::StaffHours => "staff-hours",
            Self::Notes => "notes",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.slug() == slug)
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Users => &USERS,
            Self::Clients => &CLIENTS,
            Self::EmergencyContacts => &EMERGENCY_CONTACTS,
            Self::ClinicInformations => &CLINIC_INFORMATIONS,
            Self::SpecialConditions => &SPECIAL_CONDITIONS,
            Self::StaffHours => &STAFF_HOURS,
            Self::Notes => &NOTES,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.backend_path())
    }
}
