//! Explicit configuration for gate components
//!
//! Configuration is a plain value constructed once at process start and
//! passed by reference into each component's constructor. Validation happens
//! here, at construction, so a malformed deployment fails fast instead of
//! surfacing later as a spurious policy deny.

use serde::{Deserialize, Serialize};

use crate::errors::{GateError, GateResult};
use crate::zone::Zone;

/// Deployment labels for the two zones
///
/// Labels are opaque deployment choices (upstream uses "greenroom" and
/// "core"); all lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Label of the restricted intake tier
    pub restricted_label: String,
    /// Label of the validated production tier
    pub validated_label: String,
}

impl ZoneConfig {
    /// Build a zone configuration, normalizing labels to lowercase
    ///
    /// Fails if either label is empty or if the two labels collide.
    pub fn new(restricted_label: &str, validated_label: &str) -> GateResult<Self> {
        let restricted = restricted_label.trim().to_lowercase();
        let validated = validated_label.trim().to_lowercase();
        if restricted.is_empty() || validated.is_empty() {
            return Err(GateError::config("zone labels must be non-empty"));
        }
        if restricted == validated {
            return Err(GateError::config(format!(
                "zone labels must be distinct, both are '{restricted}'"
            )));
        }
        Ok(Self {
            restricted_label: restricted,
            validated_label: validated,
        })
    }

    /// Resolve a label to its zone, case-insensitively
    pub fn zone_for_label(&self, label: &str) -> Option<Zone> {
        let label = label.to_lowercase();
        if label == self.restricted_label {
            Some(Zone::Restricted)
        } else if label == self.validated_label {
            Some(Zone::Validated)
        } else {
            None
        }
    }

    /// The configured label for a zone
    pub fn label(&self, zone: Zone) -> &str {
        match zone {
            Zone::Restricted => &self.restricted_label,
            Zone::Validated => &self.validated_label,
        }
    }

    /// Numeric namespace index for a label, defaulting to the restricted tier
    ///
    /// Mirrors the listing services' namespace parameter: unknown labels fall
    /// back to the restricted index rather than erroring.
    pub fn zone_index(&self, label: &str) -> usize {
        self.zone_for_label(label)
            .unwrap_or(Zone::Restricted)
            .index()
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            restricted_label: "greenroom".to_string(),
            validated_label: "core".to_string(),
        }
    }
}

/// Full configuration surface for the authorization gate
///
/// Key and secret material is loaded once and is immutable afterwards.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Zone display labels
    pub zones: ZoneConfig,
    /// PEM-encoded RSA public key used to verify attestation tokens
    pub attestation_public_key_pem: String,
    /// Base64 shared secret for the encrypted-zone-claim path
    pub shared_secret_b64: String,
}

impl GateConfig {
    /// Assemble a gate configuration from its parts
    ///
    /// Key material is validated by the components that consume it
    /// (`AttestationVerifier`, `EnvelopeCipher`); this constructor only
    /// checks that something was supplied.
    pub fn new(
        zones: ZoneConfig,
        attestation_public_key_pem: &str,
        shared_secret_b64: &str,
    ) -> GateResult<Self> {
        if attestation_public_key_pem.trim().is_empty() {
            return Err(GateError::config("attestation public key is required"));
        }
        if shared_secret_b64.trim().is_empty() {
            return Err(GateError::config("shared secret is required"));
        }
        Ok(Self {
            zones,
            attestation_public_key_pem: attestation_public_key_pem.to_string(),
            shared_secret_b64: shared_secret_b64.to_string(),
        })
    }
}
