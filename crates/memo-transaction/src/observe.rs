//! Injectable observation of the build pipeline.
//!
//! The core itself performs no I/O. Callers that want visibility into
//! intermediate script and signature bytes implement `BuildObserver` and
//! pass it to `create_observed`; every method defaults to a no-op, and
//! the unit type is the silent observer.

use memo_primitives::txhash::TxHash;
use memo_script::Script;

use crate::output::TransactionOutput;

/// Hooks invoked at fixed points of the build pipeline.
pub trait BuildObserver {
    /// Called after each output script is built, in specification order.
    fn script_built(&self, index: usize, output: &TransactionOutput) {
        let _ = (index, output);
    }

    /// Called after an input's unlocking script is computed.
    fn input_signed(&self, input_index: usize, unlocking_script: &Script) {
        let _ = (input_index, unlocking_script);
    }

    /// Called after the signed transaction has been encoded.
    fn transaction_encoded(&self, tx_id: &TxHash, raw: &[u8]) {
        let _ = (tx_id, raw);
    }
}

/// The silent observer.
impl BuildObserver for () {}
