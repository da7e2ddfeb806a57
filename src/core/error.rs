//! Error types for ECIES sessions.
//!
//! This module provides a unified error type for all session operations.
//! Parameter and key errors carry a description because they are raised
//! before any secret-dependent work happens. Everything on the decryption
//! data path collapses into [`EciesError::AuthenticationFailed`] so that a
//! caller probing ciphertexts cannot learn why a message was rejected.

use thiserror::Error;

/// Errors that can occur when driving an ECIES session.
#[derive(Debug, Error)]
pub enum EciesError {
    /// The session parameters are unusable for the configured engine
    /// (missing or wrong-length nonce, unsupported key sizes).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The supplied key does not fit the requested role, or the local and
    /// remote keys live on different curves.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The session was used before a successful `init`.
    #[error("Session not initialized")]
    Uninitialized,

    /// Decryption was rejected.
    /// Intentionally vague for security: covers tag mismatch, bad padding,
    /// truncated input and malformed ephemeral keys alike.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// An underlying primitive reported an unexpected failure.
    /// Only the name of the primitive is exposed.
    #[error("Cryptographic primitive failed: {0}")]
    Primitive(&'static str),
}

/// Result type alias for ECIES operations.
pub type EciesResult<T> = Result<T, EciesError>;
