//! Attestation token verification
//!
//! Attested VMs carry a header token: an RS256-signed JWT asserting the
//! VM's source IP, project binding, and zone. Verification is strict about
//! the signature scheme (RS256 only, no fallback) and produces fresh claims
//! per request; nothing is cached.
//!
//! The observed source IP comes from the first entry of the forwarded
//! address chain, which is untrusted network metadata. The check binds the
//! token to what the caller reported, not to an independently verified
//! address.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zonegate_core::{GateError, Zone, ZoneConfig};

/// Claims carried by an attestation token
///
/// Field names match the provisioning authority's token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationClaims {
    /// Source IP the VM was provisioned with
    pub ip: String,
    /// Project binding of the VM
    pub project_code: String,
    /// Zone label the VM runs in
    pub zone: String,
}

/// Verification failures, each terminal for the request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttestationError {
    /// Token was malformed, mis-signed, or carried an unusable zone claim
    #[error("Invalid attestation token")]
    InvalidToken,
    /// Token IP claim does not match the observed source IP
    #[error("The ip of VM does not matched with source ip")]
    SourceIpMismatch,
    /// Token project claim does not contain the expected project code
    #[error("The project of VM does not matched with query")]
    ProjectCodeMismatch,
}

impl From<AttestationError> for GateError {
    fn from(err: AttestationError) -> Self {
        GateError::permission_denied(err.to_string())
    }
}

/// Verifies attestation tokens against the configured public key
pub struct AttestationVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AttestationVerifier {
    /// Load the verifier from a PEM-encoded RSA public key
    ///
    /// A key that fails to parse is a fatal configuration error.
    pub fn new(public_key_pem: &str) -> Result<Self, GateError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| GateError::config(format!("invalid attestation public key: {e}")))?;

        // RS256 only; attestation tokens carry no registered claims such as
        // exp, so none are required.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a token and enforce its IP, project, and zone bindings
    ///
    /// `observed_source_ip` is the first entry of the forwarded address
    /// chain. The project check is substring containment: the expected code
    /// must appear within the token's project claim.
    pub fn verify(
        &self,
        token: &str,
        expected_project_code: &str,
        observed_source_ip: &str,
        zones: &ZoneConfig,
    ) -> Result<VerifiedAttestation, AttestationError> {
        let decoded =
            jsonwebtoken::decode::<AttestationClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| {
                    debug!(error = %e, "attestation token rejected");
                    AttestationError::InvalidToken
                })?;
        let claims = decoded.claims;

        if claims.ip != observed_source_ip {
            return Err(AttestationError::SourceIpMismatch);
        }

        if !claims.project_code.contains(expected_project_code) {
            return Err(AttestationError::ProjectCodeMismatch);
        }

        // An unrecognized zone label is input validation, not a policy
        // outcome; reject it here so the policy table never sees it.
        let zone = zones
            .zone_for_label(&claims.zone)
            .ok_or(AttestationError::InvalidToken)?;

        Ok(VerifiedAttestation { claims, zone })
    }
}

impl std::fmt::Debug for AttestationVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttestationVerifier").finish_non_exhaustive()
    }
}

/// Successful verification outcome: raw claims plus the resolved zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAttestation {
    /// Claims exactly as decoded from the token
    pub claims: AttestationClaims,
    /// Zone the claims' label resolved to
    pub zone: Zone,
}
