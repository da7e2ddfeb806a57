//! The multi-call cipher session.
//!
//! A [`CipherSession`] wraps an [`IesEngine`] in an
//! `init -> feed* -> finish` lifecycle:
//!
//! | From | Call | To |
//! |------|------|----|
//! | any | `init(Encrypt \| Wrap, ..)` ok | `Encrypting` |
//! | any | `init(Decrypt \| Unwrap, ..)` ok | `Decrypting` |
//! | any | `init(..)` error | `Uninitialized` |
//! | `Encrypting` / `Decrypting` | `feed`, `finish` | unchanged |
//! | `Uninitialized` | `feed`, `finish`, `output_size` | error |
//!
//! `finish` always drains the buffer, whether it succeeds or not, so the
//! session can be driven again with the same keys.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "p256")]
//! # fn main() -> Result<(), ecies_session::EciesError> {
//! use ecies_session::core::curve::NIST_P256;
//! use ecies_session::core::operations::{DigestAlgorithm, IesEngine};
//! use ecies_session::core::session::CipherSession;
//! use ecies_session::core::types::{CipherMode, EcPrivateKey, KeyMaterial, SessionParameters};
//!
//! let recipient = EcPrivateKey::generate(&NIST_P256, &mut rand_core::OsRng);
//! let engine = IesEngine::new(DigestAlgorithm::Sha256, DigestAlgorithm::Sha256);
//! let params = SessionParameters::new(256, 128);
//!
//! let mut sender = CipherSession::new(engine);
//! sender.init(CipherMode::Encrypt, recipient.public_key()?.into(), None, params.clone())?;
//! sender.feed(b"hel")?;
//! sender.feed(b"lo")?;
//! let ciphertext = sender.finish()?;
//! assert_eq!(ciphertext.len(), 65 + 5 + 32);
//!
//! let mut receiver = CipherSession::new(engine);
//! receiver.init(CipherMode::Decrypt, KeyMaterial::Private(recipient), None, params)?;
//! assert_eq!(receiver.finish_with(&ciphertext)?, b"hello");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "p256"))]
//! # fn main() {}
//! ```

use core::fmt::{self, Debug};

use rand_core::{CryptoRngCore, OsRng};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::error::{EciesError, EciesResult};
use crate::core::operations::engine::{IesEngine, KeyBinding};
use crate::core::types::{CipherMode, KeyMaterial, SessionMode, SessionParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl From<CipherMode> for Direction {
    fn from(mode: CipherMode) -> Self {
        if mode.is_encrypting() {
            Self::Encrypt
        } else {
            Self::Decrypt
        }
    }
}

impl From<Direction> for SessionMode {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Encrypt => Self::Encrypting,
            Direction::Decrypt => Self::Decrypting,
        }
    }
}

enum SessionState {
    Uninitialized,
    Bound {
        direction: Direction,
        binding: KeyBinding,
        params: SessionParameters,
    },
}

/// Stateful ECIES cipher driven through `init`, `feed` and `finish`.
///
/// A session is not meant to be shared between threads while an operation
/// is in flight; independent sessions over the same keys are independent.
pub struct CipherSession<R: CryptoRngCore = OsRng> {
    engine: IesEngine,
    state: SessionState,
    buffer: Zeroizing<Vec<u8>>,
    rng: R,
}

impl CipherSession<OsRng> {
    /// Creates an uninitialized session drawing ephemeral keys from the OS.
    #[must_use]
    pub fn new(engine: IesEngine) -> Self {
        Self::with_rng(engine, OsRng)
    }
}

impl<R: CryptoRngCore> CipherSession<R> {
    /// Creates an uninitialized session with an explicit random source.
    #[must_use]
    pub fn with_rng(engine: IesEngine, rng: R) -> Self {
        Self {
            engine,
            state: SessionState::Uninitialized,
            buffer: Zeroizing::new(Vec::new()),
            rng,
        }
    }

    /// Binds keys and parameters for the given mode and clears the buffer.
    ///
    /// Key roles:
    ///
    /// | mode | `remote` | `local` | `remote` | agreement |
    /// |------|----------|---------|----------|-----------|
    /// | Encrypt | `None` | recipient public | - | ephemeral |
    /// | Encrypt | `Some` | sender private | recipient public | static |
    /// | Decrypt | `None` | recipient private | - | ephemeral |
    /// | Decrypt | `Some` | recipient private | sender public | static |
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the nonce or key sizes do not suit the engine
    /// - `InvalidKey` if the keys do not fit the roles above or sit on
    ///   different curves
    ///
    /// On error the session is left uninitialized.
    pub fn init(
        &mut self,
        mode: CipherMode,
        local: KeyMaterial,
        remote: Option<KeyMaterial>,
        params: SessionParameters,
    ) -> EciesResult<()> {
        self.state = SessionState::Uninitialized;
        self.buffer.clear();

        self.engine.validate(&params)?;
        let binding = bind_keys(mode, local, remote)?;

        let direction = Direction::from(mode);
        debug!(
            mode = %SessionMode::from(direction),
            curve = binding.domain().name(),
            ephemeral = binding.is_ephemeral(),
            "ECIES session initialized"
        );

        self.state = SessionState::Bound {
            direction,
            binding,
            params,
        };
        Ok(())
    }

    /// Appends input to the buffer. Nothing is produced until `finish`.
    ///
    /// # Errors
    ///
    /// Returns `Uninitialized` before a successful `init`.
    pub fn feed(&mut self, data: &[u8]) -> EciesResult<()> {
        if matches!(self.state, SessionState::Uninitialized) {
            return Err(EciesError::Uninitialized);
        }
        self.buffer.extend_from_slice(data);
        trace!(buffered = self.buffer.len(), "ECIES input buffered");
        Ok(())
    }

    /// Size of the output `finish` will produce if `additional_len` more
    /// bytes are fed first.
    ///
    /// Exact for encryption and for decryption without a block cipher. For
    /// decryption with a block cipher this is an upper bound that exceeds
    /// the result by the padding length.
    ///
    /// # Errors
    ///
    /// - `Uninitialized` before a successful `init`
    /// - `InvalidParameter` if the size does not fit in a `usize`
    pub fn output_size(&self, additional_len: usize) -> EciesResult<usize> {
        let SessionState::Bound {
            direction,
            binding,
            params,
        } = &self.state
        else {
            return Err(EciesError::Uninitialized);
        };

        let input_len = self.buffer.len().checked_add(additional_len).ok_or_else(|| {
            EciesError::InvalidParameter(format!(
                "{additional_len} additional bytes overflow the {}-byte buffer",
                self.buffer.len()
            ))
        })?;
        self.engine
            .output_size(*direction == Direction::Encrypt, binding, params, input_len)
    }

    /// Drains the buffer and encrypts or decrypts it.
    ///
    /// The buffer is cleared whether or not the operation succeeds; no
    /// partial output is ever returned.
    ///
    /// # Errors
    ///
    /// - `Uninitialized` before a successful `init`
    /// - `AuthenticationFailed` if a decrypted message is truncated, tampered
    ///   with, or was produced under different keys or parameters
    /// - `InvalidKey` / `Primitive` if agreement or a primitive fails
    pub fn finish(&mut self) -> EciesResult<Vec<u8>> {
        let input = Zeroizing::new(core::mem::take(&mut *self.buffer));

        let SessionState::Bound {
            direction,
            binding,
            params,
        } = &self.state
        else {
            return Err(EciesError::Uninitialized);
        };

        let result = match direction {
            Direction::Encrypt => self.engine.encrypt(binding, params, &input, &mut self.rng),
            Direction::Decrypt => self.engine.decrypt(binding, params, &input),
        };
        let mode = SessionMode::from(*direction);

        match &result {
            Ok(output) => debug!(
                %mode,
                input_len = input.len(),
                output_len = output.len(),
                "ECIES operation finished"
            ),
            Err(EciesError::AuthenticationFailed) => {
                debug!(input_len = input.len(), "ECIES decryption rejected");
            }
            Err(err) => debug!(%mode, error = %err, "ECIES operation failed"),
        }
        result
    }

    /// Feeds `input` and finishes in one call.
    ///
    /// # Errors
    ///
    /// Same as [`CipherSession::finish`].
    pub fn finish_with(&mut self, input: &[u8]) -> EciesResult<Vec<u8>> {
        self.feed(input)?;
        self.finish()
    }

    /// Current state.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        match &self.state {
            SessionState::Uninitialized => SessionMode::Uninitialized,
            SessionState::Bound { direction, .. } => SessionMode::from(*direction),
        }
    }

    /// The engine configuration.
    #[must_use]
    pub fn engine(&self) -> &IesEngine {
        &self.engine
    }

    /// Parameters bound by the last successful `init`.
    #[must_use]
    pub fn parameters(&self) -> Option<&SessionParameters> {
        match &self.state {
            SessionState::Uninitialized => None,
            SessionState::Bound { params, .. } => Some(params),
        }
    }

    /// The bound nonce, if any.
    #[must_use]
    pub fn iv(&self) -> Option<&[u8]> {
        self.parameters().and_then(SessionParameters::nonce)
    }

    /// Block size of the configured cipher; 0 without one.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.engine.cipher().map_or(0, |cipher| cipher.block_size())
    }

    /// Field size of `key`'s curve, in bits.
    #[must_use]
    pub fn key_size(&self, key: &KeyMaterial) -> usize {
        key.domain().field_size_bits()
    }

    /// Number of bytes fed since the last `init` or `finish`.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

impl<R: CryptoRngCore> Debug for CipherSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSession")
            .field("engine", &self.engine)
            .field("mode", &self.mode())
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

/// Resolves the keys handed to `init` into agreement roles.
fn bind_keys(
    mode: CipherMode,
    local: KeyMaterial,
    remote: Option<KeyMaterial>,
) -> EciesResult<KeyBinding> {
    if let Some(remote) = &remote {
        if !local.domain().same_as(remote.domain()) {
            return Err(EciesError::InvalidKey(format!(
                "local key is on {} but remote key is on {}",
                local.domain(),
                remote.domain()
            )));
        }
    }

    match (mode.is_encrypting(), local, remote) {
        (true, KeyMaterial::Public(recipient), None) => Ok(KeyBinding::Ephemeral { recipient }),
        (false, KeyMaterial::Private(recipient), None) => {
            Ok(KeyBinding::EphemeralPrefix { recipient })
        }
        (_, KeyMaterial::Private(local), Some(KeyMaterial::Public(remote))) => {
            Ok(KeyBinding::Static { local, remote })
        }
        (true, local, None) => Err(EciesError::InvalidKey(format!(
            "must be passed the recipient's public key for encryption, got a {} key",
            local.role()
        ))),
        (false, local, None) => Err(EciesError::InvalidKey(format!(
            "must be passed the recipient's private key for decryption, got a {} key",
            local.role()
        ))),
        (_, local, Some(remote)) => Err(EciesError::InvalidKey(format!(
            "static agreement needs a private local key and a public remote key, got {} and {}",
            local.role(),
            remote.role()
        ))),
    }
}
