//! The transaction creation pipeline.
//!
//! Strictly linear: spend specifications are built into outputs, the
//! outputs are assembled with the spent coin into an unsigned transaction,
//! the single input is signed, and the result is encoded. A failure at
//! any stage aborts the whole call; no partial transaction is returned.

use memo_primitives::ec::PrivateKey;

use crate::input::TransactionInput;
use crate::observe::BuildObserver;
use crate::output::TransactionOutput;
use crate::p2pkh::{Unlocker, UnlockingTemplate};
use crate::spend::{build_spend_output, SpendOutput};
use crate::transaction::Transaction;
use crate::utxo::Utxo;
use crate::TransactionError;

/// Assemble an unsigned transaction from a spent coin and built outputs.
///
/// The transaction gets the current version, one input referencing the
/// coin (unlocking script empty, sequence finalized), the outputs in the
/// given order, and lock time 0. The coin's locking script and value are
/// attached to the input for later sighash computation.
///
/// No amount balancing is performed: the caller guarantees that the
/// output total plus fee does not exceed the coin's value.
///
/// # Arguments
/// * `utxo` - The previous output being spent.
/// * `outputs` - The ordered, already-built outputs.
///
/// # Returns
/// The unsigned transaction.
pub fn assemble(utxo: &Utxo, outputs: Vec<TransactionOutput>) -> Transaction {
    let mut input = TransactionInput::new(utxo.tx_hash, utxo.index);
    input.set_source_output(TransactionOutput::new(
        utxo.satoshis,
        utxo.locking_script.clone(),
    ));

    let mut tx = Transaction::new();
    tx.add_input(input);
    for output in outputs {
        tx.add_output(output);
    }
    tx
}

/// Build and sign a transaction from spend specifications.
///
/// # Arguments
/// * `utxo` - The previous output being spent, selected by the caller.
/// * `private_key` - The key authorized to spend the coin. Referenced
///   only for the duration of the call.
/// * `spends` - The ordered list of desired outputs.
///
/// # Returns
/// The fully signed transaction, ready to encode and broadcast, or the
/// first error encountered.
pub fn create(
    utxo: &Utxo,
    private_key: &PrivateKey,
    spends: &[SpendOutput],
) -> Result<Transaction, TransactionError> {
    create_observed(utxo, private_key, spends, &())
}

/// `create` with an observer receiving the intermediate build artifacts.
///
/// The observer is invoked after each output script is built, after the
/// input is signed, and after the final transaction is encoded.
pub fn create_observed(
    utxo: &Utxo,
    private_key: &PrivateKey,
    spends: &[SpendOutput],
    observer: &dyn BuildObserver,
) -> Result<Transaction, TransactionError> {
    let mut outputs = Vec::with_capacity(spends.len());
    for (index, spend) in spends.iter().enumerate() {
        let output = build_spend_output(spend)?;
        observer.script_built(index, &output);
        outputs.push(output);
    }

    let mut tx = assemble(utxo, outputs);

    let unlocker = Unlocker::new(private_key.clone());
    let unlocking_script = unlocker.sign(&tx, 0)?;
    observer.input_signed(0, &unlocking_script);
    tx.inputs[0].unlocking_script = Some(unlocking_script);

    let raw = tx.to_bytes();
    observer.transaction_encoded(&tx.tx_id(), &raw);

    Ok(tx)
}
