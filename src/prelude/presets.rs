//! Named engine configurations.
//!
//! One function per common combination instead of one type per
//! combination. KDF and MAC always share a digest here; build an
//! [`IesEngine`] directly to mix them.
//!
//! | Preset | Digest | Body cipher |
//! |--------|--------|-------------|
//! | `ecies()` | SHA-1 | XOR keystream |
//! | `ecies_with_sha256()` | SHA-256 | XOR keystream |
//! | `ecies_with_sha384()` | SHA-384 | XOR keystream |
//! | `ecies_with_sha512()` | SHA-512 | XOR keystream |
//! | `ecies_with_aes_cbc()` | SHA-1 | AES/CBC |
//! | `ecies_with_sha256_and_aes_cbc()` | SHA-256 | AES/CBC |
//! | `ecies_with_sha384_and_aes_cbc()` | SHA-384 | AES/CBC |
//! | `ecies_with_sha512_and_aes_cbc()` | SHA-512 | AES/CBC |
//!
//! With the `tdes` feature, the `*_desede_cbc` variants use Triple-DES in
//! place of AES.

use crate::core::operations::{BlockCipherAlgorithm, DigestAlgorithm, IesEngine};

const fn stream(digest: DigestAlgorithm) -> IesEngine {
    IesEngine::new(digest, digest)
}

const fn block(digest: DigestAlgorithm, cipher: BlockCipherAlgorithm) -> IesEngine {
    IesEngine::with_cipher(digest, digest, cipher)
}

/// SHA-1 KDF and HMAC, XOR keystream.
///
/// SHA-1 is kept as the default for compatibility with existing peers.
/// Prefer a SHA-2 preset for new deployments.
#[must_use]
pub const fn ecies() -> IesEngine {
    stream(DigestAlgorithm::Sha1)
}

/// SHA-256 KDF and HMAC, XOR keystream.
#[must_use]
pub const fn ecies_with_sha256() -> IesEngine {
    stream(DigestAlgorithm::Sha256)
}

/// SHA-384 KDF and HMAC, XOR keystream.
#[must_use]
pub const fn ecies_with_sha384() -> IesEngine {
    stream(DigestAlgorithm::Sha384)
}

/// SHA-512 KDF and HMAC, XOR keystream.
#[must_use]
pub const fn ecies_with_sha512() -> IesEngine {
    stream(DigestAlgorithm::Sha512)
}

/// SHA-1 KDF and HMAC, AES/CBC body.
#[must_use]
pub const fn ecies_with_aes_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha1, BlockCipherAlgorithm::AesCbc)
}

/// SHA-256 KDF and HMAC, AES/CBC body.
#[must_use]
pub const fn ecies_with_sha256_and_aes_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha256, BlockCipherAlgorithm::AesCbc)
}

/// SHA-384 KDF and HMAC, AES/CBC body.
#[must_use]
pub const fn ecies_with_sha384_and_aes_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha384, BlockCipherAlgorithm::AesCbc)
}

/// SHA-512 KDF and HMAC, AES/CBC body.
#[must_use]
pub const fn ecies_with_sha512_and_aes_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha512, BlockCipherAlgorithm::AesCbc)
}

/// SHA-1 KDF and HMAC, DESede/CBC body.
#[cfg(feature = "tdes")]
#[must_use]
pub const fn ecies_with_desede_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha1, BlockCipherAlgorithm::DesEdeCbc)
}

/// SHA-256 KDF and HMAC, DESede/CBC body.
#[cfg(feature = "tdes")]
#[must_use]
pub const fn ecies_with_sha256_and_desede_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha256, BlockCipherAlgorithm::DesEdeCbc)
}

/// SHA-384 KDF and HMAC, DESede/CBC body.
#[cfg(feature = "tdes")]
#[must_use]
pub const fn ecies_with_sha384_and_desede_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha384, BlockCipherAlgorithm::DesEdeCbc)
}

/// SHA-512 KDF and HMAC, DESede/CBC body.
#[cfg(feature = "tdes")]
#[must_use]
pub const fn ecies_with_sha512_and_desede_cbc() -> IesEngine {
    block(DigestAlgorithm::Sha512, BlockCipherAlgorithm::DesEdeCbc)
}
