//! Core transaction type.
//!
//! A transaction is a version, an ordered list of inputs, an ordered list
//! of outputs, and a lock time. Supports canonical binary serialization,
//! strict deserialization, and transaction ID computation.

use memo_primitives::txhash::TxHash;
use memo_primitives::util::{ByteReader, ByteWriter, VarInt};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::sighash;
use crate::TransactionError;

/// The transaction format version this core emits.
pub const TX_VERSION: u32 = 1;

/// A transaction.
///
/// # Wire format
///
/// | Field        | Size                 |
/// |--------------|----------------------|
/// | version      | 4 bytes (LE)         |
/// | input count  | VarInt               |
/// | inputs       | variable (per input) |
/// | output count | VarInt               |
/// | outputs      | variable (per output)|
/// | lock_time    | 4 bytes (LE)         |
#[derive(Clone, Debug)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u32,

    /// Ordered list of inputs. Exactly one in this core's scope.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of outputs. Order is protocol-visible: it is hashed
    /// into the transaction and preserved from the spend specification
    /// list exactly.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. Zero means the transaction is immediately valid.
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with the current version and lock
    /// time 0.
    pub fn new() -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::Serialization(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must contain exactly one complete transaction; trailing
    /// data is rejected.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or an error if the data is truncated,
    /// malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::Serialization(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `ByteReader`.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let version = reader
            .read_u32_le()
            .map_err(|e| TransactionError::Serialization(format!("reading version: {}", e)))?;

        let input_count = reader
            .read_varint()
            .map_err(|e| TransactionError::Serialization(format!("reading input count: {}", e)))?;

        let mut inputs = Vec::with_capacity(input_count.value() as usize);
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader
            .read_varint()
            .map_err(|e| TransactionError::Serialization(format!("reading output count: {}", e)))?;

        let mut outputs = Vec::with_capacity(output_count.value() as usize);
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader
            .read_u32_le()
            .map_err(|e| TransactionError::Serialization(format!("reading lock time: {}", e)))?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to its canonical byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        writer.write_u32_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    /// Serialize this transaction to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Return the size of the serialized transaction in bytes.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction ID: double SHA-256 of the serialized bytes.
    ///
    /// The result is in internal byte order; use its `Display` impl (or
    /// `tx_id_hex`) for the conventional byte-reversed string.
    pub fn tx_id(&self) -> TxHash {
        TxHash::double_hash(&self.to_bytes())
    }

    /// Compute the transaction ID as the conventional display hex string.
    pub fn tx_id_hex(&self) -> String {
        self.tx_id().to_string()
    }

    // -----------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------

    /// Append an input.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Append an output.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// The number of inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// The number of outputs.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// The sum of all output satoshi values.
    pub fn total_output_satoshis(&self) -> u64 {
        self.outputs.iter().map(|o| o.satoshis).sum()
    }

    // -----------------------------------------------------------------
    // Signature hash
    // -----------------------------------------------------------------

    /// Compute the fork-aware signature hash for one of this transaction's
    /// inputs, using the source output info attached to that input.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input being signed.
    /// * `sighash_flag` - Combined sighash flags (e.g. `SIGHASH_ALL_FORKID`).
    ///
    /// # Returns
    /// The 32-byte hash to be signed, or an error if the index is out of
    /// range or the input has no source output attached.
    pub fn input_signature_hash(
        &self,
        input_index: usize,
        sighash_flag: u32,
    ) -> Result<[u8; 32], TransactionError> {
        let input = self.inputs.get(input_index).ok_or_else(|| {
            TransactionError::Signing(format!(
                "input index {} out of range (tx has {} inputs)",
                input_index,
                self.inputs.len()
            ))
        })?;

        let source_output = input.source_output().ok_or_else(|| {
            TransactionError::Signing("missing source output on input".to_string())
        })?;

        sighash::signature_hash(
            self,
            input_index,
            source_output.locking_script.to_bytes(),
            sighash_flag,
            source_output.satoshis,
        )
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
