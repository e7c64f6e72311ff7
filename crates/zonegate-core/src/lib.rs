//! # Zonegate Core
//!
//! Shared foundation for the zonegate workspace: the two-tier zone model,
//! the unified error type, identity data supplied by the external auth
//! service, and the explicit configuration value that every component
//! receives at construction time.
//!
//! Nothing in this crate performs I/O. Configuration is built once at
//! process start and passed by reference; there is no ambient global state.

pub mod config;
pub mod errors;
pub mod identity;
pub mod zone;

pub use config::{GateConfig, ZoneConfig};
pub use errors::{GateError, GateResult};
pub use identity::Identity;
pub use zone::{Action, Zone};
