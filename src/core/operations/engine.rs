//! The parameterized IES engine.
//!
//! [`IesEngine`] is a small configuration record (KDF digest, MAC digest,
//! optional block cipher) that runs the encryption and decryption
//! algorithms for a bound set of keys and [`SessionParameters`].
//!
//! # Encryption
//!
//! 1. Pick the agreement keys: a fresh ephemeral pair against the
//!    recipient, or the pre-bound static pair
//! 2. `Z = ECDH(local, remote)`; the KDF secret is `V || Z` with `V` the
//!    encoded ephemeral point, or `Z` alone for static keys
//! 3. `K = KDF(secret, derivation_vector)`, split into cipher and MAC keys
//! 4. Encrypt the body (block cipher, or XOR with a derived pad)
//! 5. `tag = HMAC(mac_key, nonce? || ciphertext || encoding_vector?)`
//! 6. Output `ephemeral_point? || ciphertext || tag`
//!
//! Decryption verifies the tag before touching the cipher, and reports
//! every failure on that path as `AuthenticationFailed`.

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::core::curve::CurveDomain;
use crate::core::error::{EciesError, EciesResult};
use crate::core::operations::agreement::{agree, generate_ephemeral};
use crate::core::operations::cipher::BlockCipherAlgorithm;
use crate::core::operations::digest::DigestAlgorithm;
use crate::core::operations::framing;
use crate::core::operations::kdf::{self, DerivedKeys};
use crate::core::operations::mac::MacEngine;
use crate::core::types::{EcPrivateKey, EcPublicKey, SessionParameters};

/// Keys bound to a session, resolved into their agreement roles.
#[derive(Debug, Clone)]
pub enum KeyBinding {
    /// Encrypt against `recipient` with a fresh ephemeral key per message.
    Ephemeral {
        /// The recipient's public key.
        recipient: EcPublicKey,
    },
    /// Decrypt messages whose ephemeral key is framed in front.
    EphemeralPrefix {
        /// The recipient's private key.
        recipient: EcPrivateKey,
    },
    /// Pre-agreed static keys; no point is framed.
    Static {
        /// Our private key.
        local: EcPrivateKey,
        /// The peer's public key.
        remote: EcPublicKey,
    },
}

impl KeyBinding {
    /// Returns `true` when the frame carries an ephemeral point.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        !matches!(self, Self::Static { .. })
    }

    /// Curve of the bound keys.
    #[must_use]
    pub fn domain(&self) -> &'static CurveDomain {
        match self {
            Self::Ephemeral { recipient } => recipient.domain(),
            Self::EphemeralPrefix { recipient } => recipient.domain(),
            Self::Static { local, .. } => local.domain(),
        }
    }
}

/// Engine configuration: `{kdf_digest, mac_digest, cipher?, iv_len}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IesEngine {
    kdf_digest: DigestAlgorithm,
    mac_digest: DigestAlgorithm,
    cipher: Option<BlockCipherAlgorithm>,
    iv_len: usize,
}

impl IesEngine {
    /// Engine without a block cipher (XOR keystream body).
    #[must_use]
    pub const fn new(kdf_digest: DigestAlgorithm, mac_digest: DigestAlgorithm) -> Self {
        Self {
            kdf_digest,
            mac_digest,
            cipher: None,
            iv_len: 0,
        }
    }

    /// Engine encrypting the body with `cipher`; the nonce becomes its IV.
    #[must_use]
    pub const fn with_cipher(
        kdf_digest: DigestAlgorithm,
        mac_digest: DigestAlgorithm,
        cipher: BlockCipherAlgorithm,
    ) -> Self {
        Self {
            kdf_digest,
            mac_digest,
            cipher: Some(cipher),
            iv_len: cipher.iv_len(),
        }
    }

    /// Digest driving the KDF.
    #[must_use]
    pub const fn kdf_digest(&self) -> DigestAlgorithm {
        self.kdf_digest
    }

    /// Digest driving the HMAC.
    #[must_use]
    pub const fn mac_digest(&self) -> DigestAlgorithm {
        self.mac_digest
    }

    /// The configured block cipher, if any.
    #[must_use]
    pub const fn cipher(&self) -> Option<BlockCipherAlgorithm> {
        self.cipher
    }

    /// Required nonce length; 0 without a cipher.
    #[must_use]
    pub const fn iv_len(&self) -> usize {
        self.iv_len
    }

    /// Tag length in bytes.
    #[must_use]
    pub const fn mac_size(&self) -> usize {
        self.mac_digest.output_size()
    }

    fn mac(&self) -> MacEngine {
        MacEngine::new(self.mac_digest)
    }

    /// Checks `params` against this engine.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a missing or wrong-length nonce, or for
    /// key sizes the engine cannot use.
    pub fn validate(&self, params: &SessionParameters) -> EciesResult<()> {
        if let Some(cipher) = self.cipher {
            match params.nonce() {
                Some(nonce) if nonce.len() == self.iv_len => {}
                Some(nonce) => {
                    return Err(EciesError::InvalidParameter(format!(
                        "nonce must be {} bytes long for {cipher}, got {}",
                        self.iv_len,
                        nonce.len()
                    )));
                }
                None => {
                    return Err(EciesError::InvalidParameter(format!(
                        "nonce of {} bytes is required for {cipher}",
                        self.iv_len
                    )));
                }
            }
        }

        if params.mac_key_bits() == 0 || params.mac_key_bits() % 8 != 0 {
            return Err(EciesError::InvalidParameter(format!(
                "MAC key size must be a positive multiple of 8 bits, got {}",
                params.mac_key_bits()
            )));
        }
        if params.cipher_key_bits() == 0 || params.cipher_key_bits() % 8 != 0 {
            return Err(EciesError::InvalidParameter(format!(
                "cipher key size must be a positive multiple of 8 bits, got {}",
                params.cipher_key_bits()
            )));
        }
        if let Some(cipher) = self.cipher {
            if !cipher.key_lens().contains(&params.cipher_key_len()) {
                return Err(EciesError::InvalidParameter(format!(
                    "{cipher} does not accept {}-bit keys",
                    params.cipher_key_bits()
                )));
            }
        }
        Ok(())
    }

    /// Length of the ephemeral point prefix for `binding`.
    #[must_use]
    pub fn prefix_len(&self, binding: &KeyBinding, params: &SessionParameters) -> usize {
        if binding.is_ephemeral() {
            binding.domain().encoded_point_len(params.point_compression())
        } else {
            0
        }
    }

    /// Output length for `input_len` bytes in the given direction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the encrypted length overflows `usize`.
    pub fn output_size(
        &self,
        encrypting: bool,
        binding: &KeyBinding,
        params: &SessionParameters,
        input_len: usize,
    ) -> EciesResult<usize> {
        let prefix_len = self.prefix_len(binding, params);
        if encrypting {
            framing::encrypted_len(input_len, prefix_len, self.mac_size(), self.cipher).ok_or_else(
                || {
                    EciesError::InvalidParameter(format!(
                        "output size for {input_len} input bytes overflows usize"
                    ))
                },
            )
        } else {
            Ok(framing::decrypted_len(input_len, prefix_len, self.mac_size()))
        }
    }

    /// Encrypts `plaintext` and returns the framed message.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for mismatched curves, `InvalidKey` if the binding
    /// is only usable for decryption, and `Primitive` if a primitive fails.
    pub fn encrypt<R: CryptoRngCore>(
        &self,
        binding: &KeyBinding,
        params: &SessionParameters,
        plaintext: &[u8],
        rng: &mut R,
    ) -> EciesResult<Vec<u8>> {
        let (secret, prefix) = match binding {
            KeyBinding::Ephemeral { recipient } => {
                let ephemeral =
                    generate_ephemeral(recipient.domain(), rng, params.point_compression())?;
                let shared = agree(ephemeral.private_key(), recipient)?;
                let encoded = ephemeral.into_encoded_public();
                (prefixed_secret(&encoded, &shared), Some(encoded))
            }
            KeyBinding::Static { local, remote } => (agree(local, remote)?, None),
            KeyBinding::EphemeralPrefix { .. } => {
                return Err(EciesError::InvalidKey(
                    "a private key alone cannot be used for encryption".to_string(),
                ));
            }
        };

        let keys = self.derive_keys(&secret, params)?;
        let ciphertext = match self.cipher {
            Some(cipher) => {
                let iv = params.nonce().unwrap_or_default();
                cipher.encrypt(keys.cipher_key(), iv, plaintext)?
            }
            None => self.xor_pad(keys.cipher_key(), plaintext)?,
        };

        let tag = self.mac().compute(
            keys.mac_key(),
            params.nonce(),
            &ciphertext,
            params.encoding_vector(),
        )?;

        Ok(framing::assemble(prefix.as_deref(), &ciphertext, &tag))
    }

    /// Verifies and decrypts a framed message.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for any malformed, truncated or
    /// tampered input, and `InvalidKey` if the binding is only usable for
    /// encryption.
    pub fn decrypt(
        &self,
        binding: &KeyBinding,
        params: &SessionParameters,
        input: &[u8],
    ) -> EciesResult<Vec<u8>> {
        if let KeyBinding::Ephemeral { .. } = binding {
            return Err(EciesError::InvalidKey(
                "a public key alone cannot be used for decryption".to_string(),
            ));
        }

        let prefix_len = self.prefix_len(binding, params);
        let frame = framing::parse(input, prefix_len, self.mac_size())?;

        let secret = match (binding, frame.ephemeral_key) {
            (KeyBinding::EphemeralPrefix { recipient }, Some(encoded)) => {
                let sender = EcPublicKey::from_sec1_bytes(recipient.domain(), encoded)
                    .map_err(|_| EciesError::AuthenticationFailed)?;
                let shared =
                    agree(recipient, &sender).map_err(|_| EciesError::AuthenticationFailed)?;
                prefixed_secret(encoded, &shared)
            }
            (KeyBinding::Static { local, remote }, None) => agree(local, remote)?,
            _ => return Err(EciesError::AuthenticationFailed),
        };

        let keys = self.derive_keys(&secret, params)?;

        self.mac().verify(
            keys.mac_key(),
            params.nonce(),
            frame.ciphertext,
            params.encoding_vector(),
            frame.tag,
        )?;

        match self.cipher {
            Some(cipher) => {
                let iv = params.nonce().unwrap_or_default();
                cipher
                    .decrypt(keys.cipher_key(), iv, frame.ciphertext)
                    .map_err(|_| EciesError::AuthenticationFailed)
            }
            None => self.xor_pad(keys.cipher_key(), frame.ciphertext),
        }
    }

    fn derive_keys(
        &self,
        secret: &Zeroizing<Vec<u8>>,
        params: &SessionParameters,
    ) -> EciesResult<DerivedKeys> {
        DerivedKeys::derive(
            self.kdf_digest,
            secret,
            params.derivation_vector(),
            params.cipher_key_len(),
            params.mac_key_len(),
        )
    }

    /// Stream body: XOR with `KDF(cipher_key)` truncated to the data length.
    fn xor_pad(&self, cipher_key: &[u8], data: &[u8]) -> EciesResult<Vec<u8>> {
        let pad = kdf::derive(self.kdf_digest, cipher_key, None, data.len())?;
        Ok(data.iter().zip(pad.iter()).map(|(d, p)| d ^ p).collect())
    }
}

/// KDF input for ephemeral agreement: `V || Z`.
///
/// `V` is the ephemeral point exactly as framed, so the derived keys (and
/// with them the tag) commit to its encoding. The x-only shared secret `Z`
/// alone is identical for `P` and `-P`.
fn prefixed_secret(encoded_point: &[u8], shared: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(Vec::with_capacity(encoded_point.len() + shared.len()));
    secret.extend_from_slice(encoded_point);
    secret.extend_from_slice(shared);
    secret
}
