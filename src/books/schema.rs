//! Structural schemas for book payloads.
//!
//! A payload is checked against a schema before any typed domain object is built from it.
//! Messages use the JSON-schema "stack" wording, e.g. `instance requires property "title"`,
//! and every problem in the payload is reported, not just the first.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => as_i32(value).is_some(),
        }
    }
}

// an integer is any JSON number without a fractional part that fits in i32, so `264.0` and
// `2e3` pass as well as `264`
fn as_i32(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    value.as_f64()
        .filter(|n| n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64)
        .map(|n| n as i32)
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
    pub required: bool,
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
    pub additional_properties: bool,
}

const fn field(name: &'static str, kind: FieldType, required: bool) -> FieldSpec {
    FieldSpec { name, kind, required }
}

pub static NEW_BOOK_SCHEMA: Schema = Schema {
    fields: &[
        field("isbn", FieldType::String, true),
        field("amazon_url", FieldType::String, true),
        field("author", FieldType::String, true),
        field("language", FieldType::String, true),
        field("pages", FieldType::Integer, true),
        field("publisher", FieldType::String, true),
        field("title", FieldType::String, true),
        field("year", FieldType::Integer, true),
    ],
    additional_properties: false,
};

// isbn is not part of an update; the update command rejects it before validation runs
pub static UPDATE_BOOK_SCHEMA: Schema = Schema {
    fields: &[
        field("amazon_url", FieldType::String, false),
        field("author", FieldType::String, false),
        field("language", FieldType::String, false),
        field("pages", FieldType::Integer, false),
        field("publisher", FieldType::String, false),
        field("title", FieldType::String, false),
        field("year", FieldType::Integer, false),
    ],
    additional_properties: false,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    Invalid(Vec<String>),
}

pub fn validate(payload: &Value, schema: &Schema) -> Validation {
    let object = match payload.as_object() {
        Some(object) => object,
        None => return Validation::Invalid(vec!["instance is not of a type(s) object".to_string()]),
    };
    let mut errors = vec![];
    for spec in schema.fields {
        match object.get(spec.name) {
            Some(value) if !spec.kind.accepts(value) => {
                errors.push(format!("instance.{} is not of a type(s) {}", spec.name, spec.kind.name()));
            }
            Some(_) => {}
            None if spec.required => {
                errors.push(format!("instance requires property \"{}\"", spec.name));
            }
            None => {}
        }
    }
    if !schema.additional_properties {
        errors.extend(unknown_properties(object, schema)
            .map(|name| format!("instance is not allowed to have the additional property \"{}\"", name)));
    }
    if errors.is_empty() {
        Validation::Valid
    } else {
        Validation::Invalid(errors)
    }
}

/// Rewrites integral floats such as `300.0` as plain integers in the schema's integer fields,
/// so a validated payload deserializes into `i32` fields.
pub fn normalize(mut payload: Value, schema: &Schema) -> Value {
    if let Some(object) = payload.as_object_mut() {
        for spec in schema.fields.iter().filter(|spec| spec.kind == FieldType::Integer) {
            if let Some(value) = object.get_mut(spec.name) {
                if let Some(n) = as_i32(value) {
                    *value = Value::from(n);
                }
            }
        }
    }
    payload
}

fn unknown_properties<'a>(object: &'a Map<String, Value>, schema: &'a Schema) -> impl Iterator<Item = &'a String> + 'a {
    object.keys().filter(move |key| !schema.fields.iter().any(|spec| spec.name == key.as_str()))
}
