//! Ergonomic layer for ECIES sessions.
//!
//! The prelude module re-exports the session API together with a parameter
//! builder and named engine presets for the common digest and cipher
//! combinations.
//!
//! # Usage
//!
//! ```rust
//! use ecies_session::prelude::*;
//!
//! let engine = ecies_with_sha256_and_aes_cbc();
//! assert_eq!(engine.iv_len(), 16);
//! ```

mod builders;
mod presets;

pub use builders::SessionParametersBuilder;
pub use presets::*;

// Re-export core types for convenience
pub use crate::core::curve::CurveDomain;
pub use crate::core::error::{EciesError, EciesResult};
pub use crate::core::operations::{BlockCipherAlgorithm, DigestAlgorithm, IesEngine};
pub use crate::core::session::CipherSession;
pub use crate::core::types::{
    CipherMode, EcPrivateKey, EcPublicKey, KeyMaterial, SessionMode, SessionParameters,
};

#[cfg(feature = "p256")]
pub use crate::core::curve::NIST_P256;
#[cfg(feature = "p384")]
pub use crate::core::curve::NIST_P384;
#[cfg(feature = "k256")]
pub use crate::core::curve::SECP256K1;
