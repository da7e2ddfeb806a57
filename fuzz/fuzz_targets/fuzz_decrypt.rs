#![no_main]

use ecies_session::core::curve::NIST_P256;
use ecies_session::core::operations::{BlockCipherAlgorithm, DigestAlgorithm, IesEngine};
use ecies_session::core::session::CipherSession;
use ecies_session::core::types::{CipherMode, EcPrivateKey, SessionParameters};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(recipient) = EcPrivateKey::from_bytes(&NIST_P256, &[0x42u8; 32]) else {
        return;
    };

    // Decrypting arbitrary frames should never panic, only fail
    let stream = IesEngine::new(DigestAlgorithm::Sha256, DigestAlgorithm::Sha256);
    let mut session = CipherSession::new(stream);
    if session
        .init(
            CipherMode::Decrypt,
            recipient.clone().into(),
            None,
            SessionParameters::new(128, 128),
        )
        .is_ok()
    {
        let _ = session.finish_with(data);
    }

    let block = IesEngine::with_cipher(
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha256,
        BlockCipherAlgorithm::AesCbc,
    );
    let mut session = CipherSession::new(block);
    let params = SessionParameters::new(128, 128).with_nonce([0u8; 16]);
    if session
        .init(CipherMode::Decrypt, recipient.into(), None, params)
        .is_ok()
    {
        let _ = session.finish_with(data);
    }
});
