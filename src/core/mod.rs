//! Core ECIES types and operations.
//!
//! This module provides the building blocks of the engine:
//!
//! - [`curve`] - Supported curve domains
//! - [`error`] - Error types for session operations
//! - [`types`] - Keys, parameters and modes
//! - [`operations`] - Agreement, KDF, MAC, cipher, framing and the engine
//! - [`session`] - The `init -> feed -> finish` state machine

pub mod curve;
pub mod error;
pub mod operations;
pub mod session;
pub mod types;

// Re-export commonly used items
pub use error::{EciesError, EciesResult};
pub use session::CipherSession;
