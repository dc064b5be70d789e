#![deny(missing_docs)]

//! Memo protocol transaction SDK.
//!
//! Re-exports the SDK components for convenient single-crate usage.

pub use memo_primitives as primitives;
pub use memo_script as script;
pub use memo_transaction as transaction;
