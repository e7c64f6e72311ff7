//! Attribute schema model
//!
//! Field names mirror the template service's JSON payload (`type`,
//! `options`), so a fetched manifest deserializes directly into
//! [`AttributeDefinition`] values. Schema order is significant: it decides
//! validation order and therefore which error a caller sees first.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Submitted attribute map, iterated in insertion order
pub type AttributeSet = IndexMap<String, String>;

/// Value kind of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Free text, at most 100 characters
    Text,
    /// One value out of a fixed option list
    MultipleChoice,
}

/// One attribute definition from a manifest template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name submissions are keyed by
    pub name: String,
    /// Value kind
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    /// Whether a submission may omit this attribute
    #[serde(default)]
    pub optional: bool,
    /// Permitted values for multiple-choice attributes
    #[serde(rename = "options", default)]
    pub allowed_values: Vec<String>,
}

impl AttributeDefinition {
    /// Free-text definition
    pub fn text(name: &str, optional: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::Text,
            optional,
            allowed_values: Vec::new(),
        }
    }

    /// Multiple-choice definition with its permitted values
    pub fn multiple_choice(name: &str, optional: bool, allowed: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: AttributeKind::MultipleChoice,
            optional,
            allowed_values: allowed.iter().map(|v| v.to_string()).collect(),
        }
    }
}
