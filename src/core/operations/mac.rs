//! HMAC tag computation and verification.
//!
//! The tag covers `nonce || ciphertext || encoding_vector`, where the nonce
//! and the encoding vector are only included when present.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::core::error::{EciesError, EciesResult};
use crate::core::operations::digest::DigestAlgorithm;

/// Computes and verifies tags for a fixed HMAC digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacEngine {
    digest: DigestAlgorithm,
}

impl MacEngine {
    /// Creates an HMAC engine over `digest`.
    #[must_use]
    pub const fn new(digest: DigestAlgorithm) -> Self {
        Self { digest }
    }

    /// Tag length in bytes.
    #[must_use]
    pub const fn tag_size(&self) -> usize {
        self.digest.output_size()
    }

    /// Computes the tag over `nonce? || ciphertext || encoding_vector?`.
    ///
    /// # Errors
    ///
    /// Returns `Primitive` if the HMAC implementation rejects the key.
    pub fn compute(
        &self,
        key: &[u8],
        nonce: Option<&[u8]>,
        ciphertext: &[u8],
        encoding_vector: Option<&[u8]>,
    ) -> EciesResult<Vec<u8>> {
        let parts = [
            nonce.unwrap_or_default(),
            ciphertext,
            encoding_vector.unwrap_or_default(),
        ];
        match self.digest {
            DigestAlgorithm::Sha1 => hmac_parts::<Hmac<Sha1>>(key, &parts),
            DigestAlgorithm::Sha256 => hmac_parts::<Hmac<Sha256>>(key, &parts),
            DigestAlgorithm::Sha384 => hmac_parts::<Hmac<Sha384>>(key, &parts),
            DigestAlgorithm::Sha512 => hmac_parts::<Hmac<Sha512>>(key, &parts),
        }
    }

    /// Recomputes the tag and compares it with `tag` in constant time.
    ///
    /// A tag of the wrong length is rejected before any comparison.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` on any mismatch.
    pub fn verify(
        &self,
        key: &[u8],
        nonce: Option<&[u8]>,
        ciphertext: &[u8],
        encoding_vector: Option<&[u8]>,
        tag: &[u8],
    ) -> EciesResult<()> {
        if tag.len() != self.tag_size() {
            return Err(EciesError::AuthenticationFailed);
        }

        let expected = self
            .compute(key, nonce, ciphertext, encoding_vector)
            .map_err(|_| EciesError::AuthenticationFailed)?;

        if bool::from(expected.ct_eq(tag)) {
            Ok(())
        } else {
            Err(EciesError::AuthenticationFailed)
        }
    }
}

fn hmac_parts<M: Mac + KeyInit>(key: &[u8], parts: &[&[u8]]) -> EciesResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| EciesError::Primitive("hmac"))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}
