//! ECDH key agreement and ephemeral key generation.

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::core::curve::CurveDomain;
use crate::core::error::{EciesError, EciesResult};
use crate::core::types::{EcPrivateKey, EcPublicKey};

/// Computes the ECDH shared secret between a private and a public key.
///
/// The result is the x-coordinate of the shared point, big-endian,
/// exactly `field_size` bytes.
///
/// # Errors
///
/// Returns `InvalidKey` if the keys are on different curves.
pub fn agree(local: &EcPrivateKey, remote: &EcPublicKey) -> EciesResult<Zeroizing<Vec<u8>>> {
    if !local.domain().same_as(remote.domain()) {
        return Err(EciesError::InvalidKey(format!(
            "cannot agree between {} and {} keys",
            local.domain(),
            remote.domain()
        )));
    }
    local.domain().shared_secret(local.scalar(), remote.as_bytes())
}

/// A one-time key pair generated for a single encryption.
///
/// The private half is used for one agreement and then dropped (and
/// zeroized); the encoded public half becomes the ciphertext prefix.
pub struct EphemeralKeyPair {
    private: EcPrivateKey,
    encoded_public: Vec<u8>,
}

impl EphemeralKeyPair {
    /// The ephemeral private key.
    #[must_use]
    pub fn private_key(&self) -> &EcPrivateKey {
        &self.private
    }

    /// Consumes the pair, returning the SEC1 encoding of the public key as
    /// placed in the frame.
    #[must_use]
    pub fn into_encoded_public(self) -> Vec<u8> {
        self.encoded_public
    }
}

/// Generates a fresh key pair on `domain`, encoding its public point.
///
/// # Errors
///
/// Only fails if the curve backend rejects a scalar it produced itself.
pub fn generate_ephemeral<R: CryptoRngCore>(
    domain: &'static CurveDomain,
    rng: &mut R,
    compressed: bool,
) -> EciesResult<EphemeralKeyPair> {
    let private = EcPrivateKey::generate(domain, rng);
    let encoded_public = private.public_key()?.to_sec1_bytes(compressed)?;
    Ok(EphemeralKeyPair {
        private,
        encoded_public,
    })
}
