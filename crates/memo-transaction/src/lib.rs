/// Memo SDK - Transaction building, signing, and serialization.
///
/// Turns a declarative list of spend outputs (value transfers, raw data
/// outputs, and Memo protocol-tagged messages) into a fully signed,
/// broadcast-ready single-input transaction.

pub mod transaction;
pub mod input;
pub mod output;
pub mod utxo;
pub mod sighash;
pub mod p2pkh;
pub mod spend;
pub mod observe;
pub mod create;

mod error;
pub use error::TransactionError;
pub use transaction::{Transaction, TX_VERSION};
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use utxo::Utxo;
pub use spend::{SpendKind, SpendOutput};
pub use observe::BuildObserver;
pub use create::{assemble, create, create_observed};

#[cfg(test)]
mod tests;
