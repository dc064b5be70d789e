//! Transaction input referencing a previous output.

use memo_primitives::txhash::TxHash;
use memo_primitives::util::{ByteReader, ByteWriter, VarInt};
use memo_script::Script;

use crate::output::TransactionOutput;
use crate::TransactionError;

/// Default sequence number indicating a finalized input.
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// A single transaction input.
///
/// References an output of a previous transaction by its hash and index.
/// The unlocking script is `None` until the input has been signed. The
/// source output's value and locking script are kept alongside for
/// signature hash computation; they are not serialized.
///
/// # Wire format
///
/// | Field            | Size          |
/// |------------------|---------------|
/// | source_tx_hash   | 32 bytes      |
/// | source_index     | 4 bytes (LE)  |
/// | script length    | VarInt        |
/// | unlocking_script | variable      |
/// | sequence         | 4 bytes (LE)  |
#[derive(Clone, Debug)]
pub struct TransactionInput {
    /// Hash of the transaction whose output is being spent, in internal
    /// byte order.
    pub source_tx_hash: TxHash,

    /// Index of the output within the source transaction.
    pub source_index: u32,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// The unlocking script proving the right to spend.
    /// `None` until the signer has run.
    pub unlocking_script: Option<Script>,

    /// The source output being spent (value and locking script), used for
    /// sighash computation. Not part of the wire format.
    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    /// Create an input spending the given outpoint, unsigned and finalized.
    pub fn new(source_tx_hash: TxHash, source_index: u32) -> Self {
        TransactionInput {
            source_tx_hash,
            source_index,
            sequence: DEFAULT_SEQUENCE,
            unlocking_script: None,
            source_output: None,
        }
    }

    /// Deserialize an input from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or an error if the data is
    /// truncated.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let hash_bytes = reader
            .read_bytes(32)
            .map_err(|e| TransactionError::Serialization(format!("reading source tx hash: {}", e)))?;
        let source_tx_hash = TxHash::from_bytes(hash_bytes)?;

        let source_index = reader
            .read_u32_le()
            .map_err(|e| TransactionError::Serialization(format!("reading output index: {}", e)))?;

        let script_len = reader
            .read_varint()
            .map_err(|e| TransactionError::Serialization(format!("reading script length: {}", e)))?;

        let script_bytes = reader
            .read_bytes(script_len.value() as usize)
            .map_err(|e| TransactionError::Serialization(format!("reading unlocking script: {}", e)))?;

        let sequence = reader
            .read_u32_le()
            .map_err(|e| TransactionError::Serialization(format!("reading sequence: {}", e)))?;

        let unlocking_script = if script_bytes.is_empty() {
            None
        } else {
            Some(Script::from_bytes(script_bytes))
        };

        Ok(TransactionInput {
            source_tx_hash,
            source_index,
            sequence,
            unlocking_script,
            source_output: None,
        })
    }

    /// Serialize this input into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self.source_tx_hash.as_bytes());
        writer.write_u32_le(self.source_index);

        match &self.unlocking_script {
            Some(script) => {
                let script_bytes = script.to_bytes();
                writer.write_varint(VarInt::from(script_bytes.len()));
                writer.write_bytes(script_bytes);
            }
            None => writer.write_varint(VarInt(0)),
        }

        writer.write_u32_le(self.sequence);
    }

    /// Attach the source output being spent.
    ///
    /// Provides the satoshi value and locking script needed for sighash
    /// computation during signing.
    pub fn set_source_output(&mut self, output: TransactionOutput) {
        self.source_output = Some(output);
    }

    /// The source output being spent, if attached.
    pub fn source_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serialize-then-parse reproduces the input; an unsigned input has a
    /// zero-length script on the wire.
    #[test]
    fn test_wire_roundtrip_unsigned() {
        let hash = TxHash::from_bytes(&[0xab; 32]).unwrap();
        let input = TransactionInput::new(hash, 3);

        let mut writer = ByteWriter::new();
        input.write_to(&mut writer);
        let bytes = writer.into_bytes();
        // 32 (hash) + 4 (index) + 1 (varint 0) + 4 (sequence)
        assert_eq!(bytes.len(), 41);

        let mut reader = ByteReader::new(&bytes);
        let parsed = TransactionInput::read_from(&mut reader).unwrap();
        assert_eq!(parsed.source_tx_hash, hash);
        assert_eq!(parsed.source_index, 3);
        assert_eq!(parsed.sequence, DEFAULT_SEQUENCE);
        assert!(parsed.unlocking_script.is_none());
    }

    /// A signed input carries its unlocking script through the wire format.
    #[test]
    fn test_wire_roundtrip_signed() {
        let hash = TxHash::from_bytes(&[0x01; 32]).unwrap();
        let mut input = TransactionInput::new(hash, 0);
        input.unlocking_script = Some(Script::from_bytes(&[0x51, 0x52]));

        let mut writer = ByteWriter::new();
        input.write_to(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let parsed = TransactionInput::read_from(&mut reader).unwrap();
        assert_eq!(
            parsed.unlocking_script.as_ref().map(|s| s.to_bytes().to_vec()),
            Some(vec![0x51, 0x52])
        );
    }

    /// The attached source output is not serialized.
    #[test]
    fn test_source_output_not_on_wire() {
        let hash = TxHash::from_bytes(&[0x02; 32]).unwrap();
        let mut with_source = TransactionInput::new(hash, 0);
        with_source.set_source_output(TransactionOutput::new(1000, Script::new()));
        let without_source = TransactionInput::new(hash, 0);

        let mut w1 = ByteWriter::new();
        with_source.write_to(&mut w1);
        let mut w2 = ByteWriter::new();
        without_source.write_to(&mut w2);
        assert_eq!(w1.into_bytes(), w2.into_bytes());
    }
}
