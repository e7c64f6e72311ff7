//! # Zonegate Manifest
//!
//! Validates caller-supplied metadata attributes against the ordered
//! attribute schema of a project manifest. The schema comes from the
//! external template service; this crate only models it and checks
//! submissions against it, always reporting the first failure encountered.

pub mod schema;
pub mod validator;

pub use schema::{AttributeDefinition, AttributeKind, AttributeSet};
pub use validator::{ManifestValidator, ValidationError, ValidationErrorKind};
