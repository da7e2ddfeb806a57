//! Cipher modes and session states.

use core::fmt::{self, Display};

/// The operation requested at `init`.
///
/// `Wrap` and `Unwrap` run exactly the same algorithms as `Encrypt` and
/// `Decrypt`; they exist for callers that keep the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// Encrypt the buffered plaintext.
    Encrypt,
    /// Decrypt the buffered ciphertext.
    Decrypt,
    /// Alias of [`CipherMode::Encrypt`].
    Wrap,
    /// Alias of [`CipherMode::Decrypt`].
    Unwrap,
}

impl CipherMode {
    /// Returns `true` for `Encrypt` and `Wrap`.
    #[must_use]
    pub const fn is_encrypting(self) -> bool {
        matches!(self, Self::Encrypt | Self::Wrap)
    }
}

/// State of a `CipherSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// No successful `init` yet.
    Uninitialized,
    /// Bound for encryption.
    Encrypting,
    /// Bound for decryption.
    Decrypting,
}

impl Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Encrypting => "encrypting",
            Self::Decrypting => "decrypting",
        };
        f.write_str(name)
    }
}
