//! Elliptic curve cryptography on secp256k1.
//!
//! Private/public key types and ECDSA signatures with the Bitcoin-specific
//! conventions needed for transaction signing: WIF serialization, RFC6979
//! deterministic nonces, low-S normalization, and DER encoding.

mod private_key;
mod public_key;
mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
