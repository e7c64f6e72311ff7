//! Authenticated envelope cipher for zone claims
//!
//! The wire format is standard base64 wrapping a Fernet token (AES-128-CBC
//! with an HMAC-SHA256 integrity tag). The Fernet key is derived once at
//! construction with PBKDF2-HMAC-SHA256 from the deployment's shared secret.
//!
//! # Security
//!
//! The KDF passphrase is a fixed application constant; the salt is the
//! base64-decoded shared secret. Confidentiality of this path therefore
//! rests entirely on the shared secret staying secret. This matches the
//! deployed CLI counterpart and must not be changed unilaterally, or
//! existing claims stop decrypting.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use fernet::Fernet;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::debug;
use zonegate_core::GateError;

/// Fixed KDF passphrase shared with the CLI counterpart
const KDF_PASSPHRASE: &[u8] = b"SECRETKEYPASSWORD";

/// PBKDF2 iteration count
const KDF_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes
const KDF_KEY_LEN: usize = 32;

/// Error returned by [`EnvelopeCipher::decrypt`]
///
/// Every failure mode collapses into this single opaque value: bad base64,
/// bad padding, and integrity-tag mismatch are indistinguishable to the
/// caller, and no partial plaintext ever escapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// Ciphertext could not be decrypted
    #[error("Invalid encryption, could not decrypt message")]
    InvalidEncryption,
}

impl From<EnvelopeError> for GateError {
    fn from(err: EnvelopeError) -> Self {
        GateError::crypto(err.to_string())
    }
}

/// Symmetric cipher for encrypted zone claims
///
/// Construct once at startup; the key derivation is CPU-bound (100k PBKDF2
/// iterations) and deliberately happens here rather than per request.
pub struct EnvelopeCipher {
    fernet: Fernet,
}

impl EnvelopeCipher {
    /// Derive the envelope key from the deployment shared secret
    ///
    /// The secret must be valid standard base64; anything else is a fatal
    /// configuration error, not a per-request failure.
    pub fn new(shared_secret_b64: &str) -> Result<Self, GateError> {
        let salt = STANDARD
            .decode(shared_secret_b64)
            .map_err(|e| GateError::config(format!("shared secret is not valid base64: {e}")))?;

        let mut key = [0u8; KDF_KEY_LEN];
        pbkdf2_hmac::<Sha256>(KDF_PASSPHRASE, &salt, KDF_ITERATIONS, &mut key);

        let fernet_key = URL_SAFE.encode(key);
        let fernet = Fernet::new(&fernet_key)
            .ok_or_else(|| GateError::config("derived envelope key was rejected"))?;

        Ok(Self { fernet })
    }

    /// Decrypt an encrypted zone claim to its plaintext label
    pub fn decrypt(&self, ciphertext_b64: &str) -> Result<String, EnvelopeError> {
        let token_bytes = STANDARD.decode(ciphertext_b64).map_err(|_| {
            debug!("envelope claim is not valid base64");
            EnvelopeError::InvalidEncryption
        })?;
        let token = String::from_utf8(token_bytes).map_err(|_| {
            debug!("envelope claim does not wrap a token");
            EnvelopeError::InvalidEncryption
        })?;
        let plaintext = self.fernet.decrypt(&token).map_err(|_| {
            debug!("envelope token failed authenticated decryption");
            EnvelopeError::InvalidEncryption
        })?;
        String::from_utf8(plaintext).map_err(|_| EnvelopeError::InvalidEncryption)
    }

    /// Encrypt a plaintext value into the base64 claim format
    ///
    /// Counterpart used by provisioning tooling and tests; the output is
    /// what [`Self::decrypt`] consumes.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let token = self.fernet.encrypt(plaintext.as_bytes());
        STANDARD.encode(token)
    }
}

impl std::fmt::Debug for EnvelopeCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material through Debug
        f.debug_struct("EnvelopeCipher").finish_non_exhaustive()
    }
}
