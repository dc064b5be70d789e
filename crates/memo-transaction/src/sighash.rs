//! Fork-aware signature hash computation.
//!
//! The replay-protected sighash introduced at the UAHF fork: a BIP-143
//! style digest that commits to the satoshi value of the output being
//! spent, so a signature cannot be replayed on a chain where that value
//! differs. All transactions on the forked chain sign with the FORKID
//! flag set.

use memo_primitives::hash::sha256d;
use memo_primitives::util::{ByteWriter, VarInt};

use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output at the signed input's index.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Sign only the current input, allowing other inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Replay-protection flag required on all post-fork transactions.
pub const SIGHASH_FORKID: u32 = 0x40;

/// The standard post-fork sighash type: ALL | FORKID.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

/// Mask extracting the base sighash type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

// -----------------------------------------------------------------------
// Signature hash
// -----------------------------------------------------------------------

/// Compute the fork-aware signature hash for a given input.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `prev_script` - The locking script of the output being spent.
/// * `sighash_type` - The combined sighash flags.
/// * `satoshis` - The satoshi value of the output being spent.
///
/// # Returns
/// A 32-byte double-SHA-256 hash to be signed by ECDSA.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_script: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, prev_script, sighash_type, satoshis)?;
    Ok(sha256d(&preimage))
}

/// Compute the sighash preimage bytes before double-hashing.
///
/// The preimage layout:
/// 1. version (4 bytes LE)
/// 2. hash of all outpoints (32 bytes; zero unless committing to them)
/// 3. hash of all sequences (32 bytes; zero unless committing to them)
/// 4. outpoint of the signed input (32 + 4 bytes)
/// 5. scriptCode (varint-prefixed locking script being satisfied)
/// 6. value of the spent output (8 bytes LE) - the fork-aware commitment
/// 7. sequence of the signed input (4 bytes LE)
/// 8. hash of the committed outputs (32 bytes)
/// 9. lock time (4 bytes LE)
/// 10. sighash type (4 bytes LE)
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `prev_script` - The locking script of the output being spent.
/// * `sighash_type` - The combined sighash flags.
/// * `satoshis` - The satoshi value of the output being spent.
///
/// # Returns
/// The raw preimage bytes (not yet hashed).
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    prev_script: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<Vec<u8>, TransactionError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        TransactionError::Signing(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;

    let base_type = sighash_type & SIGHASH_MASK;
    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;

    let hash_prevouts = if anyone_can_pay {
        [0u8; 32]
    } else {
        prevouts_hash(tx)
    };

    let hash_sequence =
        if anyone_can_pay || base_type == SIGHASH_SINGLE || base_type == SIGHASH_NONE {
            [0u8; 32]
        } else {
            sequence_hash(tx)
        };

    let hash_outputs = if base_type != SIGHASH_SINGLE && base_type != SIGHASH_NONE {
        outputs_hash(tx, None)
    } else if base_type == SIGHASH_SINGLE && input_index < tx.outputs.len() {
        outputs_hash(tx, Some(input_index))
    } else {
        [0u8; 32]
    };

    let mut writer = ByteWriter::with_capacity(256);
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    writer.write_bytes(input.source_tx_hash.as_bytes());
    writer.write_u32_le(input.source_index);
    writer.write_varint(VarInt::from(prev_script.len()));
    writer.write_bytes(prev_script);
    writer.write_u64_le(satoshis);
    writer.write_u32_le(input.sequence);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helpers
// -----------------------------------------------------------------------

/// Double-SHA-256 of all input outpoints concatenated (txid + vout each).
fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(input.source_tx_hash.as_bytes());
        writer.write_u32_le(input.source_index);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA-256 of all input sequence numbers concatenated.
fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

/// Double-SHA-256 of serialized outputs.
///
/// With `only` set, just the output at that index is included (the
/// SIGHASH_SINGLE case); otherwise all outputs are.
fn outputs_hash(tx: &Transaction, only: Option<usize>) -> [u8; 32] {
    let mut writer = ByteWriter::new();
    match only {
        Some(n) => writer.write_bytes(&tx.outputs[n].to_bytes()),
        None => {
            for output in &tx.outputs {
                writer.write_bytes(&output.to_bytes());
            }
        }
    }
    sha256d(writer.as_bytes())
}
