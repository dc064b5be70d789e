//! Previous-output reference supplied by the coin-selection collaborator.

use memo_primitives::txhash::TxHash;
use memo_script::Script;

use crate::TransactionError;

/// An unspent output selected for spending.
///
/// Immutable once constructed: the transaction hash and index identify the
/// coin, the locking script and satoshi value are needed to compute the
/// fork-aware signature hash. Which coin to spend is decided by the
/// caller; this core never queries a wallet or chain state.
#[derive(Clone, Debug)]
pub struct Utxo {
    /// Hash of the transaction that created the output.
    pub tx_hash: TxHash,
    /// Index of the output within that transaction.
    pub index: u32,
    /// The locking script protecting the output.
    pub locking_script: Script,
    /// The satoshi value of the output.
    pub satoshis: u64,
}

impl Utxo {
    /// Create a reference from already-parsed parts.
    pub fn new(tx_hash: TxHash, index: u32, locking_script: Script, satoshis: u64) -> Self {
        Utxo {
            tx_hash,
            index,
            locking_script,
            satoshis,
        }
    }

    /// Create a reference from hex-encoded parts.
    ///
    /// # Arguments
    /// * `txid_hex` - The transaction hash in display order (64 hex chars).
    /// * `index` - The output index being spent.
    /// * `script_hex` - Hex-encoded locking script of the output.
    /// * `satoshis` - The satoshi value of the output.
    ///
    /// # Returns
    /// `Ok(Utxo)` on success, or `InvalidOutpoint` if the hash or script
    /// hex is malformed.
    pub fn from_hex_parts(
        txid_hex: &str,
        index: u32,
        script_hex: &str,
        satoshis: u64,
    ) -> Result<Self, TransactionError> {
        let tx_hash = TxHash::from_hex(txid_hex)
            .map_err(|e| TransactionError::InvalidOutpoint(e.to_string()))?;
        let locking_script = Script::from_hex(script_hex)
            .map_err(|e| TransactionError::InvalidOutpoint(e.to_string()))?;
        Ok(Utxo {
            tx_hash,
            index,
            locking_script,
            satoshis,
        })
    }
}
