//! Value types handed to a session.

mod key;
mod mode;
mod params;

pub use key::{EcPrivateKey, EcPublicKey, KeyMaterial};
pub use mode::{CipherMode, SessionMode};
pub use params::SessionParameters;
