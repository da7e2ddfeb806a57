//! Build script for ecies-session.
//!
//! This emits compile-time warnings for security-sensitive feature flags.

fn main() {
    // Emit a compile-time warning when the tdes feature is enabled
    #[cfg(feature = "tdes")]
    {
        // Note: Using single-colon syntax for MSRV 1.75.0 compatibility
        println!("cargo:warning=SECURITY WARNING: The 'tdes' feature is enabled.");
        println!("cargo:warning=Triple-DES has a 64-bit block and is exposed to birthday-bound attacks (Sweet32, CVE-2016-2183).");
        println!("cargo:warning=Use the AES/CBC presets for new deployments. DESede is provided only for legacy interoperability.");
    }
}
