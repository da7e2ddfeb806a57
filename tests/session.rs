//! End-to-end session tests.
//!
//! Exercises the `init -> feed -> finish` lifecycle across every preset,
//! both agreement modes and both point encodings.

// Test code legitimately uses panic patterns for test failure reporting
#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]
#![cfg(all(feature = "p256", feature = "prelude"))]

use ecies_session::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once; `RUST_LOG=ecies_session=trace` shows session events.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn all_engines() -> Vec<IesEngine> {
    vec![
        ecies(),
        ecies_with_sha256(),
        ecies_with_sha384(),
        ecies_with_sha512(),
        ecies_with_aes_cbc(),
        ecies_with_sha256_and_aes_cbc(),
        ecies_with_sha384_and_aes_cbc(),
        ecies_with_sha512_and_aes_cbc(),
        IesEngine::new(DigestAlgorithm::Sha512, DigestAlgorithm::Sha1),
    ]
}

fn parameters_for(engine: &IesEngine, compressed: bool) -> SessionParameters {
    let mut builder = SessionParametersBuilder::new()
        .mac_key_bits(256)
        .derivation_vector(b"session-test".to_vec())
        .encoding_vector(b"encoding".to_vec())
        .point_compression(compressed);
    if engine.iv_len() > 0 {
        builder = builder.nonce(vec![0x5cu8; engine.iv_len()]);
    }
    builder.build()
}

struct Parties {
    recipient: EcPrivateKey,
    sender: EcPrivateKey,
}

impl Parties {
    fn new(domain: &'static CurveDomain, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            recipient: EcPrivateKey::generate(domain, &mut rng),
            sender: EcPrivateKey::generate(domain, &mut rng),
        }
    }

    fn encrypt_keys(&self, static_mode: bool) -> (KeyMaterial, Option<KeyMaterial>) {
        let recipient_public = self.recipient.public_key().expect("public key");
        if static_mode {
            (self.sender.clone().into(), Some(recipient_public.into()))
        } else {
            (recipient_public.into(), None)
        }
    }

    fn decrypt_keys(&self, static_mode: bool) -> (KeyMaterial, Option<KeyMaterial>) {
        let remote = static_mode.then(|| self.sender.public_key().expect("public key").into());
        (self.recipient.clone().into(), remote)
    }
}

fn encrypt(
    engine: IesEngine,
    parties: &Parties,
    static_mode: bool,
    params: &SessionParameters,
    plaintext: &[u8],
) -> EciesResult<Vec<u8>> {
    let (local, remote) = parties.encrypt_keys(static_mode);
    let mut session = CipherSession::new(engine);
    session.init(CipherMode::Encrypt, local, remote, params.clone())?;
    session.feed(plaintext)?;
    session.finish()
}

fn decrypt(
    engine: IesEngine,
    parties: &Parties,
    static_mode: bool,
    params: &SessionParameters,
    ciphertext: &[u8],
) -> EciesResult<Vec<u8>> {
    let (local, remote) = parties.decrypt_keys(static_mode);
    let mut session = CipherSession::new(engine);
    session.init(CipherMode::Decrypt, local, remote, params.clone())?;
    session.finish_with(ciphertext)
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_roundtrip_all_configurations() -> EciesResult<()> {
    init_tracing();
    let parties = Parties::new(&NIST_P256, 1);

    for engine in all_engines() {
        for static_mode in [false, true] {
            for compressed in [false, true] {
                let params = parameters_for(&engine, compressed);
                for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 64, 100] {
                    let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
                    let ciphertext = encrypt(engine, &parties, static_mode, &params, &plaintext)?;
                    let decrypted = decrypt(engine, &parties, static_mode, &params, &ciphertext)?;
                    assert_eq!(
                        decrypted, plaintext,
                        "{engine:?} static={static_mode} compressed={compressed} len={len}"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
#[cfg(all(feature = "p384", feature = "k256"))]
fn test_roundtrip_other_curves() -> EciesResult<()> {
    for domain in [&NIST_P384, &SECP256K1] {
        let parties = Parties::new(domain, 2);
        for engine in [ecies_with_sha384(), ecies_with_sha256_and_aes_cbc()] {
            for compressed in [false, true] {
                let params = parameters_for(&engine, compressed);
                let ciphertext = encrypt(engine, &parties, false, &params, b"curve check")?;
                let body_len = engine
                    .cipher()
                    .map_or(Some(11), |cipher| cipher.encrypted_len(11))
                    .expect("small length");
                assert_eq!(
                    ciphertext.len(),
                    domain.encoded_point_len(compressed) + body_len + engine.mac_size()
                );
                assert_eq!(decrypt(engine, &parties, false, &params, &ciphertext)?, b"curve check");
            }
        }
    }
    Ok(())
}

#[test]
fn test_single_bit_flips_are_rejected() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 3);

    for engine in [ecies_with_sha256(), ecies_with_sha256_and_aes_cbc()] {
        for static_mode in [false, true] {
            let params = parameters_for(&engine, false);
            let ciphertext = encrypt(engine, &parties, static_mode, &params, b"hello")?;
            let prefix_len = if static_mode { 0 } else { 65 };

            for byte in prefix_len..ciphertext.len() {
                for bit in 0..8 {
                    let mut tampered = ciphertext.clone();
                    tampered[byte] ^= 1 << bit;
                    let result = decrypt(engine, &parties, static_mode, &params, &tampered);
                    assert!(
                        matches!(result, Err(EciesError::AuthenticationFailed)),
                        "flip at byte {byte} bit {bit} was accepted"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_ephemeral_prefix_tampering_is_rejected() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 4);
    let engine = ecies_with_sha256();

    for compressed in [false, true] {
        let params = parameters_for(&engine, compressed);
        let ciphertext = encrypt(engine, &parties, false, &params, b"hello")?;
        let prefix_len = NIST_P256.encoded_point_len(compressed);

        for byte in 0..prefix_len {
            let mut tampered = ciphertext.clone();
            tampered[byte] ^= 0x01;
            let result = decrypt(engine, &parties, false, &params, &tampered);
            assert!(matches!(result, Err(EciesError::AuthenticationFailed)));
        }
    }
    Ok(())
}

#[test]
fn test_compressed_point_sign_flip_is_rejected() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 12);

    for engine in [ecies_with_sha256(), ecies_with_sha256_and_aes_cbc()] {
        let params = parameters_for(&engine, true);
        let mut ciphertext = encrypt(engine, &parties, false, &params, b"hello")?;
        assert!(ciphertext[0] == 0x02 || ciphertext[0] == 0x03);

        // Same x-coordinate, opposite point
        ciphertext[0] ^= 0x01;
        let result = decrypt(engine, &parties, false, &params, &ciphertext);
        assert!(matches!(result, Err(EciesError::AuthenticationFailed)));
    }
    Ok(())
}

#[test]
fn test_output_size_rejects_overflow() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 13);

    for engine in [ecies_with_sha256(), ecies_with_sha256_and_aes_cbc()] {
        let params = parameters_for(&engine, false);
        let (local, remote) = parties.encrypt_keys(false);
        let mut session = CipherSession::new(engine);
        session.init(CipherMode::Encrypt, local, remote, params)?;
        session.feed(b"x")?;

        assert!(matches!(
            session.output_size(usize::MAX),
            Err(EciesError::InvalidParameter(_))
        ));
        assert!(matches!(
            session.output_size(usize::MAX - 1),
            Err(EciesError::InvalidParameter(_))
        ));
        // The session is still usable afterwards
        let body_len = session.engine().cipher().map_or(5, |_| 16);
        assert_eq!(session.output_size(4)?, 65 + body_len + 32);
    }
    Ok(())
}

#[test]
fn test_ephemeral_freshness() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 5);
    let engine = ecies_with_sha256();
    let params = parameters_for(&engine, false);

    let first = encrypt(engine, &parties, false, &params, b"same message")?;
    let second = encrypt(engine, &parties, false, &params, b"same message")?;
    assert_ne!(first[..65], second[..65]);
    assert_ne!(first[65..], second[65..]);
    Ok(())
}

#[test]
fn test_static_determinism() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 6);

    for engine in [ecies_with_sha256(), ecies_with_sha256_and_aes_cbc()] {
        let params = parameters_for(&engine, false);
        let mut outputs = Vec::new();
        for seed in [10u64, 10, 11] {
            let (local, remote) = parties.encrypt_keys(true);
            let mut session = CipherSession::with_rng(engine, StdRng::seed_from_u64(seed));
            session.init(CipherMode::Encrypt, local, remote, params.clone())?;
            outputs.push(session.finish_with(b"deterministic")?);
        }
        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(outputs[0], outputs[2]);
    }
    Ok(())
}

#[test]
fn test_output_size_accuracy() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 7);

    for engine in all_engines() {
        for static_mode in [false, true] {
            for compressed in [false, true] {
                let params = parameters_for(&engine, compressed);
                for (buffered, additional) in [(0usize, 0usize), (0, 5), (5, 0), (7, 9), (16, 16), (3, 40)] {
                    let plaintext = vec![0xa5u8; buffered + additional];

                    let (local, remote) = parties.encrypt_keys(static_mode);
                    let mut session = CipherSession::new(engine);
                    session.init(CipherMode::Encrypt, local, remote, params.clone())?;
                    session.feed(&plaintext[..buffered])?;
                    let expected = session.output_size(additional)?;
                    session.feed(&plaintext[buffered..])?;
                    let ciphertext = session.finish()?;
                    assert_eq!(expected, ciphertext.len());

                    let (local, remote) = parties.decrypt_keys(static_mode);
                    let mut session = CipherSession::new(engine);
                    session.init(CipherMode::Decrypt, local, remote, params.clone())?;
                    let split = ciphertext.len() / 2;
                    session.feed(&ciphertext[..split])?;
                    let predicted = session.output_size(ciphertext.len() - split)?;
                    session.feed(&ciphertext[split..])?;
                    let decrypted = session.finish()?;

                    if engine.cipher().is_some() {
                        // Padding length is unknown until decryption
                        assert!(predicted >= decrypted.len());
                        assert!(predicted - decrypted.len() <= engine.iv_len());
                    } else {
                        assert_eq!(predicted, decrypted.len());
                    }
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_uninitialized_access() {
    let mut session = CipherSession::new(ecies_with_sha256());
    assert_eq!(session.mode(), SessionMode::Uninitialized);
    assert!(matches!(session.output_size(5), Err(EciesError::Uninitialized)));
    assert!(matches!(session.feed(b"x"), Err(EciesError::Uninitialized)));
    assert!(matches!(session.finish(), Err(EciesError::Uninitialized)));
}

#[test]
fn test_session_reuse_after_finish() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 8);
    let engine = ecies_with_sha256_and_aes_cbc();
    let params = parameters_for(&engine, false);

    let (local, remote) = parties.encrypt_keys(false);
    let mut session = CipherSession::new(engine);
    session.init(CipherMode::Encrypt, local, remote, params.clone())?;

    // The binding survives finish; each message gets its own ephemeral key
    let first = session.finish_with(b"one")?;
    assert_eq!(session.mode(), SessionMode::Encrypting);
    let second = session.finish_with(b"two")?;
    assert_ne!(first[..65], second[..65]);

    assert_eq!(decrypt(engine, &parties, false, &params, &first)?, b"one");
    assert_eq!(decrypt(engine, &parties, false, &params, &second)?, b"two");
    Ok(())
}

#[test]
fn test_wrap_and_unwrap_modes() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 9);
    let engine = ecies_with_sha256();
    let params = parameters_for(&engine, true);
    let key_to_wrap = [0x3cu8; 32];

    let (local, remote) = parties.encrypt_keys(false);
    let mut session = CipherSession::new(engine);
    session.init(CipherMode::Wrap, local, remote, params.clone())?;
    assert_eq!(session.mode(), SessionMode::Encrypting);
    let wrapped = session.finish_with(&key_to_wrap)?;

    let (local, remote) = parties.decrypt_keys(false);
    let mut session = CipherSession::new(engine);
    session.init(CipherMode::Unwrap, local, remote, params)?;
    assert_eq!(session.mode(), SessionMode::Decrypting);
    assert_eq!(session.finish_with(&wrapped)?, key_to_wrap);
    Ok(())
}

#[test]
fn test_mismatched_parameters_fail_authentication() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 10);
    let engine = ecies_with_sha256();
    let params = parameters_for(&engine, false);
    let ciphertext = encrypt(engine, &parties, false, &params, b"bound context")?;

    let other_encoding = SessionParametersBuilder::new()
        .mac_key_bits(256)
        .derivation_vector(b"session-test".to_vec())
        .encoding_vector(b"different".to_vec())
        .build();
    let result = decrypt(engine, &parties, false, &other_encoding, &ciphertext);
    assert!(matches!(result, Err(EciesError::AuthenticationFailed)));

    let other_recipient = Parties::new(&NIST_P256, 11);
    let result = decrypt(engine, &other_recipient, false, &params, &ciphertext);
    assert!(matches!(result, Err(EciesError::AuthenticationFailed)));
    Ok(())
}

// =============================================================================
// Scenarios (P-256, SHA-256 tag, no block cipher, uncompressed points)
// =============================================================================

#[test]
fn test_scenario_ephemeral_hello() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 20);
    let params = SessionParametersBuilder::new().mac_key_bits(256).build();

    let ciphertext = encrypt(ecies_with_sha256(), &parties, false, &params, b"hello")?;
    assert_eq!(ciphertext.len(), 102);
    assert_eq!(ciphertext[0], 0x04);
    assert_eq!(decrypt(ecies_with_sha256(), &parties, false, &params, &ciphertext)?, b"hello");
    Ok(())
}

#[test]
fn test_scenario_tag_flip() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 21);
    let params = SessionParametersBuilder::new().mac_key_bits(256).build();

    let mut ciphertext = encrypt(ecies_with_sha256(), &parties, false, &params, b"hello")?;
    let last = ciphertext.len() - 1;
    ciphertext[last] ^= 0xff;
    let result = decrypt(ecies_with_sha256(), &parties, false, &params, &ciphertext);
    assert!(matches!(result, Err(EciesError::AuthenticationFailed)));
    Ok(())
}

#[test]
fn test_scenario_static_hello() -> EciesResult<()> {
    let parties = Parties::new(&NIST_P256, 22);
    let params = SessionParametersBuilder::new().mac_key_bits(256).build();

    let ciphertext = encrypt(ecies_with_sha256(), &parties, true, &params, b"hello")?;
    assert_eq!(ciphertext.len(), 37);
    assert_eq!(decrypt(ecies_with_sha256(), &parties, true, &params, &ciphertext)?, b"hello");
    Ok(())
}

#[test]
fn test_scenario_output_size_before_init() {
    let session = CipherSession::new(ecies_with_sha256());
    assert!(matches!(session.output_size(5), Err(EciesError::Uninitialized)));
}

#[test]
fn test_scenario_short_nonce() {
    let parties = Parties::new(&NIST_P256, 24);
    let params = SessionParametersBuilder::new().nonce(vec![0u8; 15]).build();

    let (local, remote) = parties.encrypt_keys(false);
    let mut session = CipherSession::new(ecies_with_sha256_and_aes_cbc());
    let result = session.init(CipherMode::Encrypt, local, remote, params);
    assert!(matches!(result, Err(EciesError::InvalidParameter(_))));
    assert_eq!(session.mode(), SessionMode::Uninitialized);
}
