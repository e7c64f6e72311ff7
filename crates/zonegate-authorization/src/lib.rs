//! # Zonegate Authorization
//!
//! Decides whether a caller may move data between the two trust-isolated
//! storage zones. Three pieces compose into one decision per request:
//!
//! - [`policy::ZonePolicyTable`] — the fixed (zone, action, target) decision
//!   table, built once at startup.
//! - [`attestation::AttestationVerifier`] — verifies a signed claim of the
//!   caller's zone, source IP, and project binding.
//! - [`gate::AuthorizationGate`] — orchestrates verification or envelope
//!   decryption plus policy evaluation into a single allow/deny.
//!
//! The gate is an explicit guard: handlers call it first and short-circuit
//! on a deny, so the control flow is visible at the call site rather than
//! hidden in wrapping machinery. Everything here is pure over per-request
//! inputs and safe to call concurrently.

pub mod attestation;
pub mod gate;
pub mod policy;

pub use attestation::{
    AttestationClaims, AttestationError, AttestationVerifier, VerifiedAttestation,
};
pub use gate::{AuthorizationGate, Decision};
pub use policy::ZonePolicyTable;
