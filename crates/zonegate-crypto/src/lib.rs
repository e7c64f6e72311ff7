//! # Zonegate Crypto
//!
//! Shared-secret envelope encryption for zone claims. A caller that is not
//! running as an attested VM can assert its current zone by presenting a
//! value encrypted under a per-deployment shared secret; this crate owns
//! that cipher.

pub mod envelope;

pub use envelope::{EnvelopeCipher, EnvelopeError};
