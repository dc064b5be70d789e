//! Transaction output: a satoshi value and a locking script.

use memo_primitives::util::{ByteReader, ByteWriter, VarInt};
use memo_script::Script;

use crate::TransactionError;

/// A single transaction output.
///
/// # Wire format
///
/// | Field          | Size         |
/// |----------------|--------------|
/// | satoshis       | 8 bytes (LE) |
/// | script length  | VarInt       |
/// | locking_script | variable     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The number of satoshis locked by this output. Always 0 for
    /// unspendable data outputs.
    pub satoshis: u64,

    /// The locking script defining the spending conditions.
    pub locking_script: Script,
}

impl TransactionOutput {
    /// Create a new output with the given value and locking script.
    pub fn new(satoshis: u64, locking_script: Script) -> Self {
        TransactionOutput {
            satoshis,
            locking_script,
        }
    }

    /// Deserialize an output from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or an error if the data is
    /// truncated.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let satoshis = reader
            .read_u64_le()
            .map_err(|e| TransactionError::Serialization(format!("reading satoshis: {}", e)))?;

        let script_len = reader
            .read_varint()
            .map_err(|e| TransactionError::Serialization(format!("reading script length: {}", e)))?;

        let script_bytes = reader
            .read_bytes(script_len.value() as usize)
            .map_err(|e| TransactionError::Serialization(format!("reading locking script: {}", e)))?;

        Ok(TransactionOutput {
            satoshis,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this output into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.satoshis);
        let script_bytes = self.locking_script.to_bytes();
        writer.write_varint(VarInt::from(script_bytes.len()));
        writer.write_bytes(script_bytes);
    }

    /// Serialize this output to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serialize-then-parse reproduces the output.
    #[test]
    fn test_wire_roundtrip() {
        let output = TransactionOutput::new(
            5000,
            Script::from_hex("76a914eb0bd5edba389198e73f8efabddfc61666969ff788ac").unwrap(),
        );
        let bytes = output.to_bytes();
        // 8 (value) + 1 (varint) + 25 (script)
        assert_eq!(bytes.len(), 34);

        let mut reader = ByteReader::new(&bytes);
        let parsed = TransactionOutput::read_from(&mut reader).unwrap();
        assert_eq!(parsed, output);
        assert_eq!(reader.remaining(), 0);
    }

    /// Truncated data fails with a serialization error.
    #[test]
    fn test_read_truncated() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        assert!(TransactionOutput::read_from(&mut reader).is_err());
    }
}
