//! Request validation from per-field rules.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Inbound shape with declared field rules. Rules run before typed deserialization.
pub trait Schema: DeserializeOwned {
    fn rules() -> &'static [FieldRule];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
}

impl FieldRule {
    pub const fn string(field: &'static str) -> Self {
        FieldRule {
            field,
            kind: FieldKind::String,
            required: false,
            max_length: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check every rule against the body; the first failing field is reported.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            let val = body.get(rule.field);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", rule.field)));
            }
            if let Some(v) = val {
                validate_field(rule, v)?;
            }
        }
        Ok(())
    }

    /// Validate, then deserialize into the schema type.
    pub fn parse<T: Schema>(value: Value) -> Result<T, AppError> {
        let body = match value {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        Self::validate(&body, T::rules())?;
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Validation(e.to_string()))
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    let s = match (rule.kind, v.as_str()) {
        (FieldKind::String, Some(s)) => s,
        (FieldKind::String, None) => {
            return Err(AppError::Validation(format!("{} must be a string", rule.field)));
        }
    };
    if let Some(max) = rule.max_length {
        if s.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                rule.field, max
            )));
        }
    }
    Ok(())
}
