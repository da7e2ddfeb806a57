//! Builder patterns for session parameters.
//!
//! This module provides a fluent builder for [`SessionParameters`] with
//! defaults suitable for most exchanges.
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | MAC key | 128 bits |
//! | Cipher key | 128 bits |
//! | Derivation vector | none |
//! | Encoding vector | none |
//! | Nonce | none |
//! | Point compression | off |
//!
//! # Example
//!
//! ```rust
//! use ecies_session::prelude::*;
//!
//! // Defaults for an XOR keystream engine
//! let params = SessionParametersBuilder::new().build();
//! assert_eq!(params.mac_key_bits(), 128);
//!
//! // AES-256/CBC with context binding
//! let params = SessionParametersBuilder::new()
//!     .cipher_key_bits(256)
//!     .mac_key_bits(256)
//!     .derivation_vector(b"app-v1")
//!     .encoding_vector(b"header")
//!     .nonce([0u8; 16])
//!     .build();
//! assert_eq!(params.cipher_key_len(), 32);
//! ```

use crate::core::types::SessionParameters;

/// Default MAC key size in bits.
pub const DEFAULT_MAC_KEY_BITS: usize = 128;

/// Default cipher key size in bits.
pub const DEFAULT_CIPHER_KEY_BITS: usize = 128;

/// Builder for [`SessionParameters`].
///
/// Nothing is validated here; the engine checks the parameters against its
/// configuration when a session is initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParametersBuilder {
    mac_key_bits: usize,
    cipher_key_bits: usize,
    derivation_vector: Option<Vec<u8>>,
    encoding_vector: Option<Vec<u8>>,
    nonce: Option<Vec<u8>>,
    point_compression: bool,
}

impl Default for SessionParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionParametersBuilder {
    /// Creates a builder with the default key sizes and no optional inputs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_key_bits: DEFAULT_MAC_KEY_BITS,
            cipher_key_bits: DEFAULT_CIPHER_KEY_BITS,
            derivation_vector: None,
            encoding_vector: None,
            nonce: None,
            point_compression: false,
        }
    }

    /// Sets the MAC key size in bits.
    ///
    /// # Arguments
    ///
    /// * `bits` - A non-zero multiple of 8
    #[must_use]
    pub const fn mac_key_bits(mut self, bits: usize) -> Self {
        self.mac_key_bits = bits;
        self
    }

    /// Sets the cipher key size in bits.
    ///
    /// With a block cipher this selects the key variant (AES-128/192/256,
    /// two- or three-key DESede). Without one it sizes the keystream key.
    #[must_use]
    pub const fn cipher_key_bits(mut self, bits: usize) -> Self {
        self.cipher_key_bits = bits;
        self
    }

    /// Sets the KDF derivation vector.
    #[must_use]
    pub fn derivation_vector(mut self, vector: impl Into<Vec<u8>>) -> Self {
        self.derivation_vector = Some(vector.into());
        self
    }

    /// Sets the encoding vector appended to the MAC input.
    #[must_use]
    pub fn encoding_vector(mut self, vector: impl Into<Vec<u8>>) -> Self {
        self.encoding_vector = Some(vector.into());
        self
    }

    /// Sets the nonce, used as the cipher IV and bound into the MAC.
    #[must_use]
    pub fn nonce(mut self, nonce: impl Into<Vec<u8>>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Encodes the ephemeral public key in compressed SEC1 form.
    #[must_use]
    pub const fn point_compression(mut self, compressed: bool) -> Self {
        self.point_compression = compressed;
        self
    }

    /// Returns the configured MAC key size in bits.
    #[must_use]
    pub const fn get_mac_key_bits(&self) -> usize {
        self.mac_key_bits
    }

    /// Returns the configured cipher key size in bits.
    #[must_use]
    pub const fn get_cipher_key_bits(&self) -> usize {
        self.cipher_key_bits
    }

    /// Builds the parameters.
    #[must_use]
    pub fn build(self) -> SessionParameters {
        let mut params = SessionParameters::new(self.mac_key_bits, self.cipher_key_bits)
            .with_point_compression(self.point_compression);
        if let Some(vector) = self.derivation_vector {
            params = params.with_derivation_vector(vector);
        }
        if let Some(vector) = self.encoding_vector {
            params = params.with_encoding_vector(vector);
        }
        if let Some(nonce) = self.nonce {
            params = params.with_nonce(nonce);
        }
        params
    }
}

impl From<SessionParametersBuilder> for SessionParameters {
    fn from(builder: SessionParametersBuilder) -> Self {
        builder.build()
    }
}
