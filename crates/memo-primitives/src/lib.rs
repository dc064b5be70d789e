/// Memo SDK - Hashing, binary serialization, and key primitives.
///
/// This crate provides the foundational building blocks for the Memo SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Transaction hash type with byte-reversed display
/// - Binary reader/writer and variable-length integer encoding
/// - Elliptic curve cryptography (secp256k1 keys and signatures)

pub mod hash;
pub mod txhash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
