//! Elliptic-curve domains.
//!
//! Each supported curve is exposed as a `'static` [`CurveDomain`] that every
//! key on that curve references. The domain carries the field size used for
//! framing arithmetic and dispatches point encoding, scalar validation and
//! Diffie-Hellman to the matching `RustCrypto` curve implementation.
//!
//! Curves are enabled with feature flags:
//!
//! - `p256` - NIST P-256 (secp256r1)
//! - `p384` - NIST P-384 (secp384r1)
//! - `k256` - secp256k1

use core::fmt::{self, Display};

use elliptic_curve::ecdh::diffie_hellman;
use elliptic_curve::sec1::{FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey, SecretKey};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::core::error::{EciesError, EciesResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CurveId {
    #[cfg(feature = "p256")]
    P256,
    #[cfg(feature = "p384")]
    P384,
    #[cfg(feature = "k256")]
    K256,
}

/// Shared, read-only domain parameters of a supported curve.
///
/// Keys hold a `&'static CurveDomain`; two keys are on the same curve when
/// they reference the same domain.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CurveDomain {
    id: CurveId,
    name: &'static str,
    field_size: usize,
}

/// NIST P-256 (secp256r1).
#[cfg(feature = "p256")]
pub static NIST_P256: CurveDomain = CurveDomain {
    id: CurveId::P256,
    name: "P-256",
    field_size: 32,
};

/// NIST P-384 (secp384r1).
#[cfg(feature = "p384")]
pub static NIST_P384: CurveDomain = CurveDomain {
    id: CurveId::P384,
    name: "P-384",
    field_size: 48,
};

/// secp256k1.
#[cfg(feature = "k256")]
pub static SECP256K1: CurveDomain = CurveDomain {
    id: CurveId::K256,
    name: "secp256k1",
    field_size: 32,
};

/// Dispatches a generic curve helper to the concrete curve type of `$id`.
macro_rules! with_curve {
    ($id:expr, $f:ident ( $($arg:expr),* )) => {
        match $id {
            #[cfg(feature = "p256")]
            CurveId::P256 => $f::<p256::NistP256>($($arg),*),
            #[cfg(feature = "p384")]
            CurveId::P384 => $f::<p384::NistP384>($($arg),*),
            #[cfg(feature = "k256")]
            CurveId::K256 => $f::<k256::Secp256k1>($($arg),*),
        }
    };
}

impl CurveDomain {
    /// Human-readable curve name (e.g. `"P-256"`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Size of a field element in bytes.
    #[must_use]
    pub const fn field_size(&self) -> usize {
        self.field_size
    }

    /// Size of a field element in bits.
    #[must_use]
    pub const fn field_size_bits(&self) -> usize {
        self.field_size * 8
    }

    /// Length of a SEC1 point encoding on this curve.
    ///
    /// `1 + field_size` when compressed, `1 + 2 * field_size` otherwise.
    #[must_use]
    pub const fn encoded_point_len(&self, compressed: bool) -> usize {
        if compressed {
            1 + self.field_size
        } else {
            1 + 2 * self.field_size
        }
    }

    /// Returns `true` if `other` is the same curve domain.
    #[must_use]
    pub fn same_as(&self, other: &CurveDomain) -> bool {
        core::ptr::eq(self, other) || self.id == other.id
    }

    /// Validates a big-endian scalar and returns its canonical fixed-length form.
    pub(crate) fn canonical_scalar(&self, scalar: &[u8]) -> EciesResult<Zeroizing<Vec<u8>>> {
        with_curve!(self.id, canonical_scalar(scalar))
    }

    /// Draws a uniformly random non-zero scalar.
    pub(crate) fn random_scalar<R: CryptoRngCore>(&self, rng: &mut R) -> Zeroizing<Vec<u8>> {
        match self.id {
            #[cfg(feature = "p256")]
            CurveId::P256 => random_scalar::<p256::NistP256, R>(rng),
            #[cfg(feature = "p384")]
            CurveId::P384 => random_scalar::<p384::NistP384, R>(rng),
            #[cfg(feature = "k256")]
            CurveId::K256 => random_scalar::<k256::Secp256k1, R>(rng),
        }
    }

    /// Computes the uncompressed public point of a validated scalar.
    pub(crate) fn public_point(&self, scalar: &[u8]) -> EciesResult<Vec<u8>> {
        with_curve!(self.id, public_point(scalar))
    }

    /// Decodes a compressed or uncompressed SEC1 point into uncompressed form.
    pub(crate) fn decode_point(&self, encoded: &[u8]) -> EciesResult<Vec<u8>> {
        with_curve!(self.id, decode_point(encoded))
    }

    /// Re-encodes an uncompressed point, compressing it on request.
    pub(crate) fn encode_point(&self, point: &[u8], compressed: bool) -> EciesResult<Vec<u8>> {
        with_curve!(self.id, encode_point(point, compressed))
    }

    /// Diffie-Hellman: the x-coordinate of `scalar * point`, `field_size` bytes.
    pub(crate) fn shared_secret(
        &self,
        scalar: &[u8],
        point: &[u8],
    ) -> EciesResult<Zeroizing<Vec<u8>>> {
        with_curve!(self.id, shared_secret(scalar, point))
    }
}

impl Display for CurveDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// Generic helpers over RustCrypto curves
// =============================================================================

fn canonical_scalar<C>(scalar: &[u8]) -> EciesResult<Zeroizing<Vec<u8>>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret = SecretKey::<C>::from_slice(scalar)
        .map_err(|_| EciesError::InvalidKey("scalar out of range for curve".to_string()))?;
    Ok(Zeroizing::new(secret.to_bytes().to_vec()))
}

fn random_scalar<C, R>(rng: &mut R) -> Zeroizing<Vec<u8>>
where
    C: CurveArithmetic,
    R: CryptoRngCore,
{
    let secret = SecretKey::<C>::random(rng);
    Zeroizing::new(secret.to_bytes().to_vec())
}

fn public_point<C>(scalar: &[u8]) -> EciesResult<Vec<u8>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret = SecretKey::<C>::from_slice(scalar)
        .map_err(|_| EciesError::InvalidKey("scalar out of range for curve".to_string()))?;
    Ok(secret.public_key().to_encoded_point(false).as_bytes().to_vec())
}

fn decode_point<C>(encoded: &[u8]) -> EciesResult<Vec<u8>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let public = PublicKey::<C>::from_sec1_bytes(encoded)
        .map_err(|_| EciesError::InvalidKey("point is not on the curve".to_string()))?;
    Ok(public.to_encoded_point(false).as_bytes().to_vec())
}

fn encode_point<C>(point: &[u8], compressed: bool) -> EciesResult<Vec<u8>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let public =
        PublicKey::<C>::from_sec1_bytes(point).map_err(|_| EciesError::Primitive("sec1"))?;
    Ok(public.to_encoded_point(compressed).as_bytes().to_vec())
}

fn shared_secret<C>(scalar: &[u8], point: &[u8]) -> EciesResult<Zeroizing<Vec<u8>>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let secret = SecretKey::<C>::from_slice(scalar).map_err(|_| EciesError::Primitive("ecdh"))?;
    let public = PublicKey::<C>::from_sec1_bytes(point).map_err(|_| EciesError::Primitive("ecdh"))?;

    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    Ok(Zeroizing::new(shared.raw_secret_bytes().to_vec()))
}
