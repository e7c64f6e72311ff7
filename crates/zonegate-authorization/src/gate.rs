//! The authorization gate
//!
//! One decision per request: handlers call [`AuthorizationGate`] first and
//! short-circuit on a deny. Two entry points cover the two ways a caller
//! can assert its current zone:
//!
//! - [`AuthorizationGate::authorize_transfer`] — attestation-token path used
//!   by the file transfer endpoints, with an unattested fallback.
//! - [`AuthorizationGate::authorize_environment`] — encrypted-zone-claim
//!   path used by the environment validation endpoint.
//!
//! The gate holds only immutable startup state (policy table, verifier,
//! envelope cipher, zone labels) and is safe to share across requests.

use tracing::{debug, warn};
use zonegate_core::{Action, GateConfig, GateError, Zone, ZoneConfig};
use zonegate_crypto::EnvelopeCipher;

use crate::attestation::AttestationVerifier;
use crate::policy::ZonePolicyTable;

/// Outcome of an authorization check
///
/// Denials carry the HTTP status the request layer should answer with and a
/// human-readable message; the gate itself never touches the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Request may proceed
    Allow,
    /// Request must be rejected
    Deny {
        /// HTTP status for the request layer
        status: u16,
        /// Human-readable denial message
        message: String,
    },
}

impl Decision {
    fn deny(status: u16, message: impl Into<String>) -> Self {
        Self::Deny {
            status,
            message: message.into(),
        }
    }

    /// True when the request may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Orchestrates attestation or envelope decryption plus policy evaluation
pub struct AuthorizationGate {
    zones: ZoneConfig,
    policy: ZonePolicyTable,
    verifier: AttestationVerifier,
    envelope: EnvelopeCipher,
}

impl AuthorizationGate {
    /// Build the gate from the deployment configuration
    ///
    /// Fails fast on malformed key material; a bad deployment never turns
    /// into per-request denials.
    pub fn new(config: &GateConfig) -> Result<Self, GateError> {
        let verifier = AttestationVerifier::new(&config.attestation_public_key_pem)?;
        let envelope = EnvelopeCipher::new(&config.shared_secret_b64)?;
        Ok(Self {
            zones: config.zones.clone(),
            policy: ZonePolicyTable::new(),
            verifier,
            envelope,
        })
    }

    /// Zone labels the gate was configured with
    pub fn zones(&self) -> &ZoneConfig {
        &self.zones
    }

    /// Authorize an upload/download request on the transfer path
    ///
    /// `forwarded_for` is the raw comma-separated forwarded-address chain;
    /// its first entry is treated as the source IP. When no attestation
    /// token is present the caller is not an attested VM: it is implicitly
    /// trusted for everything except uploading into the validated zone.
    pub fn authorize_transfer(
        &self,
        action: Action,
        target_zone_label: &str,
        attestation_token: Option<&str>,
        forwarded_for: &str,
        project_code: &str,
    ) -> Decision {
        let Some(target) = self.zones.zone_for_label(target_zone_label) else {
            return Decision::deny(400, format!("Invalid zone: {target_zone_label}"));
        };

        match attestation_token {
            Some(token) => {
                let observed_ip = first_forwarded_ip(forwarded_for);
                let verified =
                    match self
                        .verifier
                        .verify(token, project_code, observed_ip, &self.zones)
                    {
                        Ok(verified) => verified,
                        Err(err) => {
                            warn!(project_code, "attestation rejected: {err}");
                            return Decision::deny(403, err.to_string());
                        }
                    };
                self.evaluate(verified.zone, action, target)
            }
            None => {
                if action == Action::Upload && target == Zone::Validated {
                    let validated = self.zones.label(Zone::Validated);
                    return Decision::deny(403, format!("Cannot upload to {validated} zone"));
                }
                Decision::Allow
            }
        }
    }

    /// Authorize an action on the environment validation path
    ///
    /// The caller asserts its current zone by presenting a claim encrypted
    /// under the deployment shared secret. With no claim at all the caller
    /// is assumed to sit in the validated zone.
    pub fn authorize_environment(
        &self,
        action: Action,
        target_zone_label: &str,
        encrypted_claim: Option<&str>,
    ) -> Decision {
        let Some(target) = self.zones.zone_for_label(target_zone_label) else {
            return Decision::deny(400, format!("Invalid zone: {target_zone_label}"));
        };

        let current = match encrypted_claim {
            Some(ciphertext) => {
                let label = match self.envelope.decrypt(ciphertext) {
                    Ok(label) => label,
                    Err(err) => {
                        warn!("environment claim rejected");
                        return Decision::deny(400, err.to_string());
                    }
                };
                match self.zones.zone_for_label(&label) {
                    Some(zone) => zone,
                    // Decrypted claims come from provisioning tooling; an
                    // unknown label means a stale or foreign claim.
                    None => return Decision::deny(400, format!("Invalid zone: {label}")),
                }
            }
            None => Zone::Validated,
        };

        self.evaluate(current, action, target)
    }

    fn evaluate(&self, current: Zone, action: Action, target: Zone) -> Decision {
        if self.policy.permits(current, action, target) {
            debug!(?current, ?action, ?target, "zone policy allow");
            return Decision::Allow;
        }
        let message = format!(
            "Invalid action: {} {} in {}",
            action.attempt_phrase(),
            self.zones.label(target),
            self.zones.label(current),
        );
        debug!(?current, ?action, ?target, "zone policy deny");
        Decision::deny(403, message)
    }
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("zones", &self.zones)
            .finish_non_exhaustive()
    }
}

/// First entry of a comma-separated forwarded-address chain
///
/// Untrusted network metadata; the attestation check compares it against the
/// token's IP claim as-is.
fn first_forwarded_ip(forwarded_for: &str) -> &str {
    forwarded_for.split(',').next().unwrap_or("").trim()
}
