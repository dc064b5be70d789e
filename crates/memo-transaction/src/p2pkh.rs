//! Pay-to-Public-Key-Hash locking and unlocking.
//!
//! Locking: `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`.
//! Unlocking: `<DER signature + sighash flag byte> <compressed pubkey>`.

use memo_primitives::ec::PrivateKey;
use memo_script::opcodes::*;
use memo_script::Script;

use crate::sighash::SIGHASH_ALL_FORKID;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Create a P2PKH locking script over a 20-byte public key hash.
///
/// # Arguments
/// * `pkh` - The Hash160 of the destination public key.
///
/// # Returns
/// The 25-byte locking script.
pub fn lock(pkh: &[u8; 20]) -> Script {
    let mut bytes = Vec::with_capacity(25);
    bytes.push(OP_DUP);
    bytes.push(OP_HASH160);
    bytes.push(OP_DATA_20);
    bytes.extend_from_slice(pkh);
    bytes.push(OP_EQUALVERIFY);
    bytes.push(OP_CHECKSIG);
    Script::from_bytes(&bytes)
}

/// A strategy producing an unlocking script for a transaction input.
///
/// The signer receives the full transaction and the input index, computes
/// the appropriate signature hash from the source output attached to that
/// input, and returns the unlocking script. The contract is per-index so
/// that multi-input signing can be added without changing it.
pub trait UnlockingTemplate {
    /// Produce an unlocking script for the given input.
    ///
    /// # Arguments
    /// * `tx` - The transaction being signed.
    /// * `input_index` - The index of the input to sign.
    ///
    /// # Returns
    /// `Ok(Script)` containing the unlocking script, or an error on failure.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError>;
}

/// P2PKH signer holding a private key and sighash flag.
pub struct Unlocker {
    /// The private key used for ECDSA signing.
    private_key: PrivateKey,

    /// The sighash flag to use. Defaults to `SIGHASH_ALL_FORKID`.
    sighash_flag: u32,
}

impl Unlocker {
    /// Create an unlocker with the standard post-fork sighash flag.
    pub fn new(private_key: PrivateKey) -> Self {
        Unlocker {
            private_key,
            sighash_flag: SIGHASH_ALL_FORKID,
        }
    }

    /// Create an unlocker with a custom sighash flag.
    pub fn with_sighash_flag(private_key: PrivateKey, sighash_flag: u32) -> Self {
        Unlocker {
            private_key,
            sighash_flag,
        }
    }
}

impl UnlockingTemplate for Unlocker {
    /// Sign the specified input and produce the unlocking script.
    ///
    /// Computes the fork-aware signature hash for the input, signs it with
    /// RFC6979 deterministic ECDSA, and builds
    /// `<DER sig || flag byte> <compressed pubkey>`.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        let sig_hash = tx.input_signature_hash(input_index, self.sighash_flag)?;

        let signature = self
            .private_key
            .sign(&sig_hash)
            .map_err(|e| TransactionError::Signing(e.to_string()))?;

        let der_sig = signature.to_der();
        let mut sig_buf = Vec::with_capacity(der_sig.len() + 1);
        sig_buf.extend_from_slice(&der_sig);
        sig_buf.push(self.sighash_flag as u8);

        let pub_key_bytes = self.private_key.pub_key().to_compressed();

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&pub_key_bytes)?;
        Ok(script)
    }
}
