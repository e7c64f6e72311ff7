//! Manifest attribute validation
//!
//! Two passes, first failure wins and nothing is aggregated:
//!
//! 1. every submitted name must exist in the schema;
//! 2. schema order drives the per-definition checks (required presence,
//!    non-empty value, text length, choice membership).
//!
//! A required definition that is absent reports "Field Required"; an
//! absent-or-empty value otherwise reports "Missing Required Attribute",
//! even for definitions marked optional. That conflation is deployed
//! behavior the CLI depends on, kept as is.

use tracing::debug;
use zonegate_core::GateError;

use crate::schema::{AttributeDefinition, AttributeKind, AttributeSet};

/// Longest accepted free-text value
const MAX_TEXT_LENGTH: usize = 100;

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Submitted name is not defined by the schema
    InvalidAttribute,
    /// Required attribute was not submitted
    FieldRequired,
    /// Attribute value was absent or empty
    MissingRequiredAttribute,
    /// Free-text value exceeds the length limit
    TextTooLong,
    /// Value is not one of the permitted choices
    InvalidChoice,
}

/// First validation failure encountered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Failure category
    pub kind: ValidationErrorKind,
    /// Templated human-readable message
    pub message: String,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl From<ValidationError> for GateError {
    fn from(err: ValidationError) -> Self {
        GateError::invalid(err.message)
    }
}

/// Validates submitted attributes against an ordered schema
///
/// Stateless; `validate` may be called concurrently with any inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestValidator;

impl ManifestValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Check a submission against a schema, returning the first failure
    pub fn validate(
        &self,
        submitted: &AttributeSet,
        schema: &[AttributeDefinition],
    ) -> Result<(), ValidationError> {
        self.check_names(submitted, schema)?;
        for definition in schema {
            self.check_presence(submitted, definition)?;
            self.check_value(submitted, definition)?;
        }
        Ok(())
    }

    /// Every submitted name must be defined by the schema
    fn check_names(
        &self,
        submitted: &AttributeSet,
        schema: &[AttributeDefinition],
    ) -> Result<(), ValidationError> {
        for name in submitted.keys() {
            if !schema.iter().any(|def| def.name == *name) {
                debug!(name, "submitted attribute not in schema");
                return Err(ValidationError::new(
                    ValidationErrorKind::InvalidAttribute,
                    format!("invalid attribute {name}"),
                ));
            }
        }
        Ok(())
    }

    /// Required-presence and non-empty checks for one definition
    fn check_presence(
        &self,
        submitted: &AttributeSet,
        definition: &AttributeDefinition,
    ) -> Result<(), ValidationError> {
        let name = &definition.name;
        let value = submitted.get(name);
        if !definition.optional && value.is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::FieldRequired,
                format!("Field Required {name}"),
            ));
        }
        // Absent and present-but-empty fail alike here, optional or not.
        if value.map_or(true, |v| v.is_empty()) {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingRequiredAttribute,
                format!("Missing Required Attribute {name}"),
            ));
        }
        Ok(())
    }

    /// Kind-specific value checks for one definition
    fn check_value(
        &self,
        submitted: &AttributeSet,
        definition: &AttributeDefinition,
    ) -> Result<(), ValidationError> {
        let name = &definition.name;
        let Some(value) = submitted.get(name) else {
            // check_presence already rejected absent values.
            return Ok(());
        };
        match definition.kind {
            AttributeKind::Text => {
                if value.chars().count() > MAX_TEXT_LENGTH {
                    return Err(ValidationError::new(
                        ValidationErrorKind::TextTooLong,
                        format!("Text Too Long {name}"),
                    ));
                }
            }
            AttributeKind::MultipleChoice => {
                if !definition.allowed_values.contains(value) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::InvalidChoice,
                        format!("Invalid Choice Field {name}"),
                    ));
                }
            }
        }
        Ok(())
    }
}
