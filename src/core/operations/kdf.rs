//! Counter-mode hash key derivation.
//!
//! Block `i` (starting at 1) is `H(be32(i) || secret || derivation_vector)`;
//! blocks are concatenated and truncated to the requested length. The
//! output is fully determined by its inputs, which is what makes static-key
//! sessions reproducible.

use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::core::error::{EciesError, EciesResult};
use crate::core::operations::digest::DigestAlgorithm;

/// Derives `out_len` bytes from a shared secret.
///
/// # Errors
///
/// Returns `Primitive` if `out_len` would overflow the 32-bit block counter.
pub fn derive(
    digest: DigestAlgorithm,
    secret: &[u8],
    derivation_vector: Option<&[u8]>,
    out_len: usize,
) -> EciesResult<Zeroizing<Vec<u8>>> {
    let blocks = out_len.div_ceil(digest.output_size());
    if u32::try_from(blocks).is_err() {
        return Err(EciesError::Primitive("kdf"));
    }

    let vector = derivation_vector.unwrap_or_default();
    let output = match digest {
        DigestAlgorithm::Sha1 => expand::<Sha1>(secret, vector, out_len),
        DigestAlgorithm::Sha256 => expand::<Sha256>(secret, vector, out_len),
        DigestAlgorithm::Sha384 => expand::<Sha384>(secret, vector, out_len),
        DigestAlgorithm::Sha512 => expand::<Sha512>(secret, vector, out_len),
    };
    Ok(output)
}

fn expand<D: Digest>(secret: &[u8], vector: &[u8], out_len: usize) -> Zeroizing<Vec<u8>> {
    let mut output = Zeroizing::new(Vec::with_capacity(out_len));
    let mut counter: u32 = 1;

    while output.len() < out_len {
        let block = D::new()
            .chain_update(counter.to_be_bytes())
            .chain_update(secret)
            .chain_update(vector)
            .finalize();
        let take = (out_len - output.len()).min(block.len());
        output.extend_from_slice(&block[..take]);
        counter = counter.wrapping_add(1);
    }

    output
}

/// Keys derived for one message, split cipher key first.
pub(crate) struct DerivedKeys {
    material: Zeroizing<Vec<u8>>,
    cipher_key_len: usize,
}

impl DerivedKeys {
    /// Derives `cipher_key_len + mac_key_len` bytes and splits them.
    pub(crate) fn derive(
        digest: DigestAlgorithm,
        secret: &[u8],
        derivation_vector: Option<&[u8]>,
        cipher_key_len: usize,
        mac_key_len: usize,
    ) -> EciesResult<Self> {
        let material = derive(digest, secret, derivation_vector, cipher_key_len + mac_key_len)?;
        Ok(Self {
            material,
            cipher_key_len,
        })
    }

    pub(crate) fn cipher_key(&self) -> &[u8] {
        &self.material[..self.cipher_key_len]
    }

    pub(crate) fn mac_key(&self) -> &[u8] {
        &self.material[self.cipher_key_len..]
    }
}
