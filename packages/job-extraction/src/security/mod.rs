//! Credential handling.

pub mod credentials;

pub use credentials::{is_placeholder, Credential};
