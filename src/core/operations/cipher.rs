//! Block cipher integration (CBC with PKCS#7 padding).
//!
//! The engine delegates padding to the cipher mode. Unpadding failures are
//! reported as `AuthenticationFailed` so they cannot be told apart from a
//! tag mismatch.

use core::fmt::{self, Display};

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::core::error::{EciesError, EciesResult};

/// Block cipher used for the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCipherAlgorithm {
    /// AES in CBC mode; AES-128/192/256 chosen by the cipher key length.
    AesCbc,
    /// Triple-DES (EDE) in CBC mode; two- or three-key chosen by key length.
    ///
    /// 64-bit block size. Legacy interoperability only.
    #[cfg(feature = "tdes")]
    DesEdeCbc,
}

impl BlockCipherAlgorithm {
    /// Block size in bytes.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::AesCbc => 16,
            #[cfg(feature = "tdes")]
            Self::DesEdeCbc => 8,
        }
    }

    /// Required IV length in bytes.
    #[must_use]
    pub const fn iv_len(self) -> usize {
        self.block_size()
    }

    /// Supported key lengths in bytes.
    #[must_use]
    pub const fn key_lens(self) -> &'static [usize] {
        match self {
            Self::AesCbc => &[16, 24, 32],
            #[cfg(feature = "tdes")]
            Self::DesEdeCbc => &[16, 24],
        }
    }

    /// Ciphertext length for `len` bytes of plaintext, or `None` if it
    /// does not fit in a `usize`.
    ///
    /// PKCS#7 always appends between one and `block_size` bytes.
    #[must_use]
    pub const fn encrypted_len(self, len: usize) -> Option<usize> {
        let block = self.block_size();
        (len / block + 1).checked_mul(block)
    }

    /// Encrypts and pads `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns `Primitive` if the key or IV length is not supported.
    pub fn encrypt(self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> EciesResult<Vec<u8>> {
        match (self, key.len()) {
            (Self::AesCbc, 16) => cbc_encrypt::<cbc::Encryptor<aes::Aes128>>(key, iv, plaintext),
            (Self::AesCbc, 24) => cbc_encrypt::<cbc::Encryptor<aes::Aes192>>(key, iv, plaintext),
            (Self::AesCbc, 32) => cbc_encrypt::<cbc::Encryptor<aes::Aes256>>(key, iv, plaintext),
            #[cfg(feature = "tdes")]
            (Self::DesEdeCbc, 16) => cbc_encrypt::<cbc::Encryptor<des::TdesEde2>>(key, iv, plaintext),
            #[cfg(feature = "tdes")]
            (Self::DesEdeCbc, 24) => cbc_encrypt::<cbc::Encryptor<des::TdesEde3>>(key, iv, plaintext),
            _ => Err(EciesError::Primitive("cbc")),
        }
    }

    /// Decrypts and unpads `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the padding is invalid or the
    /// ciphertext is not a whole number of blocks, and `Primitive` if the
    /// key or IV length is not supported.
    pub fn decrypt(self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> EciesResult<Vec<u8>> {
        match (self, key.len()) {
            (Self::AesCbc, 16) => cbc_decrypt::<cbc::Decryptor<aes::Aes128>>(key, iv, ciphertext),
            (Self::AesCbc, 24) => cbc_decrypt::<cbc::Decryptor<aes::Aes192>>(key, iv, ciphertext),
            (Self::AesCbc, 32) => cbc_decrypt::<cbc::Decryptor<aes::Aes256>>(key, iv, ciphertext),
            #[cfg(feature = "tdes")]
            (Self::DesEdeCbc, 16) => cbc_decrypt::<cbc::Decryptor<des::TdesEde2>>(key, iv, ciphertext),
            #[cfg(feature = "tdes")]
            (Self::DesEdeCbc, 24) => cbc_decrypt::<cbc::Decryptor<des::TdesEde3>>(key, iv, ciphertext),
            _ => Err(EciesError::Primitive("cbc")),
        }
    }
}

impl Display for BlockCipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AesCbc => "AES/CBC/PKCS7Padding",
            #[cfg(feature = "tdes")]
            Self::DesEdeCbc => "DESede/CBC/PKCS7Padding",
        };
        f.write_str(name)
    }
}

fn cbc_encrypt<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> EciesResult<Vec<u8>>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let cipher = E::new_from_slices(key, iv).map_err(|_| EciesError::Primitive("cbc"))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> EciesResult<Vec<u8>>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let cipher = D::new_from_slices(key, iv).map_err(|_| EciesError::Primitive("cbc"))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| EciesError::AuthenticationFailed)
}
