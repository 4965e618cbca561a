//! Declarative profile schema and validation of untrusted JSON payloads.
//!
//! Every writable field is listed once in [`PROFILE_SCHEMA`] with its wire name
//! and constraint. Create payloads must satisfy every entry; patch payloads may
//! omit any field but each present field must satisfy the same constraint.
//! All violations are reported together.

use std::collections::HashMap;

use profile_directory_sdk::{NewProfile, ProfilePatch};
use serde_json::{Map, Value};

use crate::domain::error::{DomainError, FieldViolation};

/// Constraint attached to a profile field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Non-empty string, never null.
    RequiredText,
    /// String, `null`, or absent.
    OptionalText,
    /// JSON number within the inclusive range.
    Coordinate { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

const LATITUDE: FieldKind = FieldKind::Coordinate {
    min: -90.0,
    max: 90.0,
};
const LONGITUDE: FieldKind = FieldKind::Coordinate {
    min: -180.0,
    max: 180.0,
};

pub const PROFILE_SCHEMA: [FieldSpec; 13] = [
    field("name", FieldKind::RequiredText),
    field("title", FieldKind::RequiredText),
    field("company", FieldKind::RequiredText),
    field("location", FieldKind::RequiredText),
    field("description", FieldKind::RequiredText),
    field("email", FieldKind::RequiredText),
    field("phone", FieldKind::OptionalText),
    field("website", FieldKind::OptionalText),
    field("linkedin", FieldKind::OptionalText),
    field("experience", FieldKind::OptionalText),
    field("latitude", LATITUDE),
    field("longitude", LONGITUDE),
    field("imageUrl", FieldKind::RequiredText),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
enum Accepted {
    Text(String),
    Null,
    Number(f64),
}

/// Values that passed validation, keyed by wire name. Absent fields have no entry.
struct AcceptedFields(HashMap<&'static str, Accepted>);

impl AcceptedFields {
    fn text(&mut self, name: &str) -> Option<String> {
        match self.0.remove(name) {
            Some(Accepted::Text(s)) => Some(s),
            _ => None,
        }
    }

    fn optional_text(&mut self, name: &str) -> Option<Option<String>> {
        match self.0.remove(name) {
            Some(Accepted::Text(s)) => Some(Some(s)),
            Some(Accepted::Null) => Some(None),
            _ => None,
        }
    }

    fn number(&mut self, name: &str) -> Option<f64> {
        match self.0.remove(name) {
            Some(Accepted::Number(n)) => Some(n),
            _ => None,
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_field(spec: &FieldSpec, value: Option<&Value>, mode: Mode) -> Result<Option<Accepted>, String> {
    match (spec.kind, value) {
        (FieldKind::OptionalText, None) => Ok(None),
        (FieldKind::OptionalText, Some(Value::Null)) => Ok(Some(Accepted::Null)),
        (_, None) if mode == Mode::Full => Err("Required".to_owned()),
        (_, None) => Ok(None),
        (FieldKind::RequiredText, Some(Value::String(s))) => {
            if s.trim().is_empty() {
                Err("must not be empty".to_owned())
            } else {
                Ok(Some(Accepted::Text(s.clone())))
            }
        }
        (FieldKind::OptionalText, Some(Value::String(s))) => Ok(Some(Accepted::Text(s.clone()))),
        (FieldKind::Coordinate { min, max }, Some(Value::Number(n))) => {
            let v = n
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| "Expected a finite number".to_owned())?;
            if v < min || v > max {
                Err(format!("must be between {min} and {max}, got {v}"))
            } else {
                Ok(Some(Accepted::Number(v)))
            }
        }
        (FieldKind::Coordinate { .. }, Some(other)) => {
            Err(format!("Expected number, received {}", json_type(other)))
        }
        (FieldKind::RequiredText | FieldKind::OptionalText, Some(other)) => {
            Err(format!("Expected string, received {}", json_type(other)))
        }
    }
}

fn check(value: &Value, mode: Mode) -> Result<AcceptedFields, DomainError> {
    let Value::Object(obj) = value else {
        return Err(DomainError::validation(vec![FieldViolation::new(
            "body",
            format!("Expected object, received {}", json_type(value)),
        )]));
    };

    check_object(obj, mode)
}

fn check_object(obj: &Map<String, Value>, mode: Mode) -> Result<AcceptedFields, DomainError> {
    let mut accepted = HashMap::with_capacity(PROFILE_SCHEMA.len());
    let mut violations = Vec::new();

    for spec in &PROFILE_SCHEMA {
        match check_field(spec, obj.get(spec.name), mode) {
            Ok(Some(v)) => {
                accepted.insert(spec.name, v);
            }
            Ok(None) => {}
            Err(message) => violations.push(FieldViolation::new(spec.name, message)),
        }
    }

    if violations.is_empty() {
        Ok(AcceptedFields(accepted))
    } else {
        Err(DomainError::validation(violations))
    }
}

fn assemble_new_profile(fields: &mut AcceptedFields) -> Option<NewProfile> {
    Some(NewProfile {
        name: fields.text("name")?,
        title: fields.text("title")?,
        company: fields.text("company")?,
        location: fields.text("location")?,
        description: fields.text("description")?,
        email: fields.text("email")?,
        phone: fields.optional_text("phone").flatten(),
        website: fields.optional_text("website").flatten(),
        linkedin: fields.optional_text("linkedin").flatten(),
        experience: fields.optional_text("experience").flatten(),
        latitude: fields.number("latitude")?,
        longitude: fields.number("longitude")?,
        image_url: fields.text("imageUrl")?,
    })
}

/// Validate a create payload against the full schema.
///
/// Unknown keys, including `id`, are ignored.
///
/// # Errors
/// Returns [`DomainError::Validation`] listing every violated field.
pub fn validate_new_profile(value: &Value) -> Result<NewProfile, DomainError> {
    let mut fields = check(value, Mode::Full)?;
    assemble_new_profile(&mut fields)
        .ok_or_else(|| DomainError::internal("validated profile payload is incomplete"))
}

/// Validate a patch payload: every field optional, present fields constrained
/// as on create. For optional text fields `null` means "clear".
///
/// # Errors
/// Returns [`DomainError::Validation`] listing every violated field.
pub fn validate_profile_patch(value: &Value) -> Result<ProfilePatch, DomainError> {
    let mut fields = check(value, Mode::Partial)?;
    Ok(ProfilePatch {
        name: fields.text("name"),
        title: fields.text("title"),
        company: fields.text("company"),
        location: fields.text("location"),
        description: fields.text("description"),
        email: fields.text("email"),
        phone: fields.optional_text("phone"),
        website: fields.optional_text("website"),
        linkedin: fields.optional_text("linkedin"),
        experience: fields.optional_text("experience"),
        latitude: fields.number("latitude"),
        longitude: fields.number("longitude"),
        image_url: fields.text("imageUrl"),
    })
}
