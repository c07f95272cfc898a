//! Field checks for student payloads.

use crate::models::{FIELD_MAX_LEN, StudentFields, StudentInput};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match *self {
            Self::Required { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

/// Every field error found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summary(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(err: FieldError) -> Self {
        Self(vec![err])
    }

    pub fn details(&self) -> Vec<FieldDetail> {
        self.0
            .iter()
            .map(|err| FieldDetail {
                field: err.field(),
                message: err.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct FieldDetail {
    pub field: &'static str,
    pub message: String,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl StudentInput {
    /// Checks presence and length of every field and collects all failures
    /// rather than stopping at the first.
    pub fn validate(self) -> Result<StudentFields, ValidationErrors> {
        let mut errors = Vec::new();

        let first_name = required("firstName", self.first_name, &mut errors);
        let last_name = required("lastName", self.last_name, &mut errors);
        let program = self.program;
        if let Some(value) = &program {
            check_len("program", value, &mut errors);
        }

        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) if errors.is_empty() => Ok(StudentFields {
                first_name,
                last_name,
                program,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn required(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => {
            check_len(field, &value, errors);
            Some(value)
        }
        _ => {
            errors.push(FieldError::Required { field });
            None
        }
    }
}

fn check_len(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.chars().count() > FIELD_MAX_LEN {
        errors.push(FieldError::TooLong {
            field,
            max: FIELD_MAX_LEN,
        });
    }
}
