//! Test vector types for the ECIES known-answer tests.
//!
//! The vectors are generated by `generate.py` in this directory with the
//! Python `cryptography` package plus `hashlib` and `hmac`, and are stored as
//! JSON next to this module.

// Many fields are required for deserialization but not directly used in tests
#![allow(dead_code)]

use ecies_session::core::curve::CurveDomain;
use ecies_session::core::operations::{BlockCipherAlgorithm, DigestAlgorithm, IesEngine};
use ecies_session::core::types::SessionParameters;
use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Engine and parameter fields shared by every vector.
#[derive(Debug, Deserialize)]
pub struct EngineFields {
    pub curve: String,
    #[serde(rename = "kdf-digest")]
    pub kdf_digest: String,
    #[serde(rename = "mac-digest")]
    pub mac_digest: String,
    /// `null` for the XOR keystream body
    pub cipher: Option<String>,
    #[serde(rename = "mac-key-bits")]
    pub mac_key_bits: usize,
    #[serde(rename = "cipher-key-bits")]
    pub cipher_key_bits: usize,
    #[serde(rename = "derivation-vector")]
    pub derivation_vector: Option<String>,
    #[serde(rename = "encoding-vector")]
    pub encoding_vector: Option<String>,
    pub nonce: Option<String>,
    #[serde(rename = "point-compression", default)]
    pub point_compression: bool,
}

/// Static-key vector: encryption is deterministic.
#[derive(Debug, Deserialize)]
pub struct StaticTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(flatten)]
    pub engine: EngineFields,
    /// Hex-encoded sender scalar
    #[serde(rename = "sender-private")]
    pub sender_private: String,
    /// Hex-encoded recipient scalar
    #[serde(rename = "recipient-private")]
    pub recipient_private: String,
    pub plaintext: String,
    pub ciphertext: String,
}

/// Ephemeral-prefix vector: the frame starts with the ephemeral point.
#[derive(Debug, Deserialize)]
pub struct EphemeralTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub engine: EngineFields,
    /// Hex-encoded ephemeral scalar the frame was produced with
    #[serde(rename = "ephemeral-private")]
    pub ephemeral_private: String,
    /// Hex-encoded recipient scalar
    #[serde(rename = "recipient-private")]
    pub recipient_private: String,
    /// Expected plaintext (null for fail tests)
    pub plaintext: Option<String>,
    pub ciphertext: String,
}

impl EngineFields {
    /// Curve named by the vector, if that curve is compiled in.
    pub fn domain(&self) -> Option<&'static CurveDomain> {
        match self.curve.as_str() {
            #[cfg(feature = "p256")]
            "P-256" => Some(&ecies_session::core::curve::NIST_P256),
            #[cfg(feature = "p384")]
            "P-384" => Some(&ecies_session::core::curve::NIST_P384),
            #[cfg(feature = "k256")]
            "secp256k1" => Some(&ecies_session::core::curve::SECP256K1),
            _ => None,
        }
    }

    /// Engine described by the vector.
    pub fn engine(&self) -> IesEngine {
        let kdf = parse_digest(&self.kdf_digest);
        let mac = parse_digest(&self.mac_digest);
        match self.cipher.as_deref() {
            None => IesEngine::new(kdf, mac),
            Some("aes-cbc") => IesEngine::with_cipher(kdf, mac, BlockCipherAlgorithm::AesCbc),
            Some(other) => panic!("unknown cipher in test vector: {other}"),
        }
    }

    /// Session parameters described by the vector.
    pub fn parameters(&self) -> SessionParameters {
        let mut params = SessionParameters::new(self.mac_key_bits, self.cipher_key_bits)
            .with_point_compression(self.point_compression);
        if let Some(vector) = &self.derivation_vector {
            params = params.with_derivation_vector(hex_decode(vector).expect("valid hex"));
        }
        if let Some(vector) = &self.encoding_vector {
            params = params.with_encoding_vector(hex_decode(vector).expect("valid hex"));
        }
        if let Some(nonce) = &self.nonce {
            params = params.with_nonce(hex_decode(nonce).expect("valid hex"));
        }
        params
    }
}

fn parse_digest(name: &str) -> DigestAlgorithm {
    match name {
        "SHA-1" => DigestAlgorithm::Sha1,
        "SHA-256" => DigestAlgorithm::Sha256,
        "SHA-384" => DigestAlgorithm::Sha384,
        "SHA-512" => DigestAlgorithm::Sha512,
        other => panic!("unknown digest in test vector: {other}"),
    }
}

/// Helper to decode hex strings.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load test vectors from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(path: &str) -> TestVectorSuite<T> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {path}: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {path}: {e}"))
}
