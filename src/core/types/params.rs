//! Session parameters agreed between sender and receiver out of band.

use core::fmt::{self, Debug};

/// Immutable parameters fixed at `init`.
///
/// Both sides of an exchange must use identical values; nothing here is
/// transmitted in the ciphertext.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionParameters {
    derivation_vector: Option<Vec<u8>>,
    encoding_vector: Option<Vec<u8>>,
    mac_key_bits: usize,
    cipher_key_bits: usize,
    nonce: Option<Vec<u8>>,
    point_compression: bool,
}

impl SessionParameters {
    /// Creates parameters with explicit key sizes and no optional inputs.
    #[must_use]
    pub fn new(mac_key_bits: usize, cipher_key_bits: usize) -> Self {
        Self {
            derivation_vector: None,
            encoding_vector: None,
            mac_key_bits,
            cipher_key_bits,
            nonce: None,
            point_compression: false,
        }
    }

    /// Sets the KDF derivation vector.
    #[must_use]
    pub fn with_derivation_vector(mut self, vector: impl Into<Vec<u8>>) -> Self {
        self.derivation_vector = Some(vector.into());
        self
    }

    /// Sets the MAC encoding vector.
    #[must_use]
    pub fn with_encoding_vector(mut self, vector: impl Into<Vec<u8>>) -> Self {
        self.encoding_vector = Some(vector.into());
        self
    }

    /// Sets the cipher nonce (IV).
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<Vec<u8>>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Selects compressed ephemeral point encoding.
    #[must_use]
    pub fn with_point_compression(mut self, compressed: bool) -> Self {
        self.point_compression = compressed;
        self
    }

    /// Context bytes mixed into the KDF.
    #[must_use]
    pub fn derivation_vector(&self) -> Option<&[u8]> {
        self.derivation_vector.as_deref()
    }

    /// Context bytes appended to the MAC input.
    #[must_use]
    pub fn encoding_vector(&self) -> Option<&[u8]> {
        self.encoding_vector.as_deref()
    }

    /// MAC key size in bits.
    #[must_use]
    pub fn mac_key_bits(&self) -> usize {
        self.mac_key_bits
    }

    /// Cipher key size in bits.
    #[must_use]
    pub fn cipher_key_bits(&self) -> usize {
        self.cipher_key_bits
    }

    /// MAC key size in bytes.
    #[must_use]
    pub fn mac_key_len(&self) -> usize {
        self.mac_key_bits / 8
    }

    /// Cipher key size in bytes.
    #[must_use]
    pub fn cipher_key_len(&self) -> usize {
        self.cipher_key_bits / 8
    }

    /// The cipher nonce, if any.
    #[must_use]
    pub fn nonce(&self) -> Option<&[u8]> {
        self.nonce.as_deref()
    }

    /// Whether ephemeral points are encoded compressed.
    #[must_use]
    pub fn point_compression(&self) -> bool {
        self.point_compression
    }
}

impl Debug for SessionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionParameters")
            .field("derivation_vector_len", &self.derivation_vector.as_ref().map(Vec::len))
            .field("encoding_vector_len", &self.encoding_vector.as_ref().map(Vec::len))
            .field("mac_key_bits", &self.mac_key_bits)
            .field("cipher_key_bits", &self.cipher_key_bits)
            .field("nonce_len", &self.nonce.as_ref().map(Vec::len))
            .field("point_compression", &self.point_compression)
            .finish()
    }
}
