#![no_main]

use ecies_session::core::curve::{NIST_P256, NIST_P384, SECP256K1};
use ecies_session::core::types::{EcPrivateKey, EcPublicKey};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try parsing on each curve - should never panic
    let _ = EcPublicKey::from_sec1_bytes(&NIST_P256, data);
    let _ = EcPublicKey::from_sec1_bytes(&NIST_P384, data);
    let _ = EcPublicKey::from_sec1_bytes(&SECP256K1, data);

    let _ = EcPrivateKey::from_bytes(&NIST_P256, data);
    let _ = EcPrivateKey::from_bytes(&NIST_P384, data);
    let _ = EcPrivateKey::from_bytes(&SECP256K1, data);
});
