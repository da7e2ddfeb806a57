//! Key material bound to a session.
//!
//! Keys are stored as canonical byte encodings next to a reference to their
//! [`CurveDomain`]. Construction validates the encoding against the curve, so
//! every key reaching the engine is known to be usable.

use core::fmt::{self, Debug};

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::core::curve::CurveDomain;
use crate::core::error::EciesResult;

/// A public point on a supported curve.
///
/// The point is held in uncompressed SEC1 form; [`EcPublicKey::to_sec1_bytes`]
/// produces either encoding.
#[derive(Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    point: Vec<u8>,
    domain: &'static CurveDomain,
}

impl EcPublicKey {
    /// Parses a compressed or uncompressed SEC1 point.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the bytes do not encode a non-identity point
    /// on `domain`.
    pub fn from_sec1_bytes(domain: &'static CurveDomain, bytes: &[u8]) -> EciesResult<Self> {
        let point = domain.decode_point(bytes)?;
        Ok(Self { point, domain })
    }

    /// Wraps an already-validated uncompressed point.
    pub(crate) fn from_validated(domain: &'static CurveDomain, point: Vec<u8>) -> Self {
        Self { point, domain }
    }

    /// The curve this key lives on.
    #[must_use]
    pub fn domain(&self) -> &'static CurveDomain {
        self.domain
    }

    /// The uncompressed SEC1 encoding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.point
    }

    /// Encodes the point, optionally compressed.
    ///
    /// # Errors
    ///
    /// Only fails if the curve backend rejects its own encoding.
    pub fn to_sec1_bytes(&self, compressed: bool) -> EciesResult<Vec<u8>> {
        if compressed {
            self.domain.encode_point(&self.point, true)
        } else {
            Ok(self.point.clone())
        }
    }
}

impl Debug for EcPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPublicKey")
            .field("domain", &self.domain.name())
            .field("point_len", &self.point.len())
            .finish()
    }
}

/// A private scalar on a supported curve.
///
/// # Security
///
/// - The scalar is zeroized on drop
/// - Debug output redacts the scalar
/// - Equality comparison is constant-time
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct EcPrivateKey {
    /// Big-endian scalar, exactly `field_size` bytes.
    scalar: Vec<u8>,
    #[zeroize(skip)]
    domain: &'static CurveDomain,
}

impl EcPrivateKey {
    /// Parses a big-endian scalar in `[1, order - 1]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if the scalar is zero or not below the group order.
    pub fn from_bytes(domain: &'static CurveDomain, bytes: &[u8]) -> EciesResult<Self> {
        let canonical = domain.canonical_scalar(bytes)?;
        Ok(Self {
            scalar: canonical.to_vec(),
            domain,
        })
    }

    /// Generates a fresh private key from a cryptographically secure source.
    pub fn generate<R: CryptoRngCore>(domain: &'static CurveDomain, rng: &mut R) -> Self {
        let scalar = domain.random_scalar(rng);
        Self {
            scalar: scalar.to_vec(),
            domain,
        }
    }

    /// The curve this key lives on.
    #[must_use]
    pub fn domain(&self) -> &'static CurveDomain {
        self.domain
    }

    /// Returns a copy of the big-endian scalar.
    #[must_use]
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.scalar.clone())
    }

    /// Computes the matching public key.
    ///
    /// # Errors
    ///
    /// Only fails if the curve backend rejects a scalar it validated earlier.
    pub fn public_key(&self) -> EciesResult<EcPublicKey> {
        let point = self.domain.public_point(&self.scalar)?;
        Ok(EcPublicKey::from_validated(self.domain, point))
    }

    pub(crate) fn scalar(&self) -> &[u8] {
        &self.scalar
    }
}

impl Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("domain", &self.domain.name())
            .field("scalar", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for EcPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.domain.same_as(other.domain) && bool::from(self.scalar.ct_eq(&other.scalar))
    }
}

impl Eq for EcPrivateKey {}

/// Either half of an EC key pair, as handed to `CipherSession::init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// A public point.
    Public(EcPublicKey),
    /// A private scalar.
    Private(EcPrivateKey),
}

impl KeyMaterial {
    /// The curve this key lives on.
    #[must_use]
    pub fn domain(&self) -> &'static CurveDomain {
        match self {
            Self::Public(key) => key.domain(),
            Self::Private(key) => key.domain(),
        }
    }

    /// Short role name used in error messages.
    pub(crate) fn role(&self) -> &'static str {
        match self {
            Self::Public(_) => "public",
            Self::Private(_) => "private",
        }
    }
}

impl From<EcPublicKey> for KeyMaterial {
    fn from(key: EcPublicKey) -> Self {
        Self::Public(key)
    }
}

impl From<EcPrivateKey> for KeyMaterial {
    fn from(key: EcPrivateKey) -> Self {
        Self::Private(key)
    }
}
