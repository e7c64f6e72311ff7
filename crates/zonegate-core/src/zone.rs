//! The two-tier zone model and transfer actions
//!
//! Exactly two zones exist: a restricted intake tier where unvalidated data
//! lands, and a validated tier holding approved data. The display labels are
//! deployment configuration; the variants here are fixed at compile time.

use serde::{Deserialize, Serialize};

/// Trust-isolation tier for stored data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Restricted intake tier (upstream "greenroom")
    Restricted,
    /// Validated production tier (upstream "core")
    Validated,
}

impl Zone {
    /// All zones, in tier order
    pub const ALL: [Zone; 2] = [Zone::Restricted, Zone::Validated];

    /// Stable numeric index of this zone
    ///
    /// Used both for policy-table addressing and as the namespace index the
    /// listing services expect (restricted 0, validated 1).
    pub fn index(self) -> usize {
        match self {
            Zone::Restricted => 0,
            Zone::Validated => 1,
        }
    }
}

/// Data-movement action a caller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Move data into the target zone
    Upload,
    /// Retrieve data from the target zone
    Download,
}

impl Action {
    /// Phrase used in policy denial messages
    pub fn attempt_phrase(self) -> &'static str {
        match self {
            Action::Upload => "upload to",
            Action::Download => "download from",
        }
    }
}
