//! ECIES hybrid public-key encryption with a multi-call session API.
//!
//! A [`CipherSession`] is initialized with a mode, key material and
//! [`SessionParameters`](core::types::SessionParameters), accepts input in
//! any number of `feed` calls, and produces the whole result in one `finish`.
//! Ciphertexts are authenticated with an HMAC tag over the encrypted body.
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "p256", feature = "prelude"))]
//! # fn main() -> Result<(), ecies_session::EciesError> {
//! use ecies_session::prelude::*;
//!
//! let recipient = EcPrivateKey::generate(&NIST_P256, &mut rand_core::OsRng);
//! let params = SessionParametersBuilder::new().build();
//!
//! // Sender: ephemeral agreement against the recipient's public key
//! let mut sender = CipherSession::new(ecies_with_sha256());
//! sender.init(CipherMode::Encrypt, recipient.public_key()?.into(), None, params.clone())?;
//! sender.feed(b"hello")?;
//! let ciphertext = sender.finish()?;
//! assert_eq!(ciphertext.len(), 65 + 5 + 32);
//!
//! // Recipient: the ephemeral key is read from the ciphertext prefix
//! let mut receiver = CipherSession::new(ecies_with_sha256());
//! receiver.init(CipherMode::Decrypt, recipient.into(), None, params)?;
//! assert_eq!(receiver.finish_with(&ciphertext)?, b"hello");
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "p256", feature = "prelude")))]
//! # fn main() {}
//! ```
//!
//! # Wire Format
//!
//! | Agreement | Layout |
//! |-----------|--------|
//! | ephemeral | `ephemeral point (SEC1) \|\| ciphertext \|\| tag` |
//! | static | `ciphertext \|\| tag` |
//!
//! There are no length fields or version bytes.
//!
//! # Curves
//!
//! - **P-256** (`p256` feature)
//! - **P-384** (`p384` feature)
//! - **secp256k1** (`k256` feature)
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! ecies-session = "0.1"                                                    # all curves, prelude
//! ecies-session = { version = "0.1", default-features = false, features = ["p256"] }
//! ecies-session = { version = "0.1", features = ["tdes"] }                 # legacy DESede presets
//! ```
//!
//! # Security
//!
//! - Key material, shared secrets and derived keys are zeroized on drop
//! - Debug output redacts private keys and buffered input
//! - Tags are compared in constant time and checked before decryption
//! - Every decryption failure is the same opaque `AuthenticationFailed`
//! - No unsafe code
//!
//! # Modules
//!
//! - [`core`] - Core types and operations
//! - [`prelude`] - Ergonomic imports, builders and presets (requires `prelude` feature)

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use core::curve::CurveDomain;
pub use core::error::{EciesError, EciesResult};
pub use core::operations::{BlockCipherAlgorithm, DigestAlgorithm, IesEngine};
pub use core::session::CipherSession;
pub use core::types::{
    CipherMode, EcPrivateKey, EcPublicKey, KeyMaterial, SessionMode, SessionParameters,
};

#[cfg(feature = "p256")]
pub use core::curve::NIST_P256;
#[cfg(feature = "p384")]
pub use core::curve::NIST_P384;
#[cfg(feature = "k256")]
pub use core::curve::SECP256K1;
