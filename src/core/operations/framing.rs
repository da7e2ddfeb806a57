//! Wire framing and size arithmetic.
//!
//! Format: `[ephemeral point?] || ciphertext || tag`
//!
//! There are no length fields. The point length follows from the curve and
//! the compression flag, the tag length from the MAC digest, and the
//! ciphertext is whatever remains.

use crate::core::error::{EciesError, EciesResult};
use crate::core::operations::cipher::BlockCipherAlgorithm;

/// A parsed frame borrowing from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Encoded ephemeral public key, when the frame carries one.
    pub ephemeral_key: Option<&'a [u8]>,
    /// The encrypted body.
    pub ciphertext: &'a [u8],
    /// The MAC tag.
    pub tag: &'a [u8],
}

/// Concatenates the frame components.
#[must_use]
pub fn assemble(ephemeral_key: Option<&[u8]>, ciphertext: &[u8], tag: &[u8]) -> Vec<u8> {
    let prefix = ephemeral_key.unwrap_or_default();
    let mut out = Vec::with_capacity(prefix.len() + ciphertext.len() + tag.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(tag);
    out
}

/// Splits `input` into its components.
///
/// `prefix_len` is 0 when no ephemeral key is framed.
///
/// # Errors
///
/// Returns `AuthenticationFailed` when the input is too short to hold the
/// prefix and the tag. No more specific error is ever produced.
pub fn parse(input: &[u8], prefix_len: usize, tag_len: usize) -> EciesResult<Frame<'_>> {
    if input.len() < prefix_len {
        return Err(EciesError::AuthenticationFailed);
    }
    let (prefix, rest) = input.split_at(prefix_len);

    if rest.len() < tag_len {
        return Err(EciesError::AuthenticationFailed);
    }
    let (ciphertext, tag) = rest.split_at(rest.len() - tag_len);

    Ok(Frame {
        ephemeral_key: (prefix_len > 0).then_some(prefix),
        ciphertext,
        tag,
    })
}

/// Frame length produced by encrypting `plaintext_len` bytes, or `None` if
/// it does not fit in a `usize`.
#[must_use]
pub fn encrypted_len(
    plaintext_len: usize,
    prefix_len: usize,
    tag_len: usize,
    cipher: Option<BlockCipherAlgorithm>,
) -> Option<usize> {
    let body = match cipher {
        Some(cipher) => cipher.encrypted_len(plaintext_len)?,
        None => plaintext_len,
    };
    prefix_len.checked_add(body)?.checked_add(tag_len)
}

/// Plaintext length recovered from a `frame_len`-byte frame.
///
/// Exact without a cipher. With a block cipher the padding length is only
/// known after decryption, so the ciphertext length is returned as an
/// upper bound. Frames too short to be valid yield 0.
#[must_use]
pub fn decrypted_len(frame_len: usize, prefix_len: usize, tag_len: usize) -> usize {
    frame_len.saturating_sub(prefix_len + tag_len)
}
