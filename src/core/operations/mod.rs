//! Cryptographic operations composed by the engine.
//!
//! - [`agreement`] - ECDH and ephemeral key generation
//! - [`kdf`] - Counter-mode hash key derivation
//! - [`mac`] - HMAC tag computation and verification
//! - [`cipher`] - Optional CBC block cipher for the message body
//! - [`framing`] - Wire layout and size arithmetic
//! - [`engine`] - The parameterized IES engine tying them together

pub mod agreement;
pub mod cipher;
pub mod digest;
pub mod engine;
pub mod framing;
pub mod kdf;
pub mod mac;

pub use agreement::{agree, generate_ephemeral, EphemeralKeyPair};
pub use cipher::BlockCipherAlgorithm;
pub use digest::DigestAlgorithm;
pub use engine::{IesEngine, KeyBinding};
pub use mac::MacEngine;
