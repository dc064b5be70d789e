//! Script chunk parsing and push encoding.
//!
//! A chunk is either a standalone opcode or a data push with its bytes.
//! Decoding walks raw script bytes into structured chunks; encoding
//! prepends the minimal OP_PUSHDATA prefix for a payload length.
//!
//! Unlike a full interpreter, OP_RETURN is decoded as an ordinary opcode
//! chunk so that the pushes following it (Memo protocol tag and payloads)
//! remain individually visible.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
///
/// Either a standalone opcode (like OP_DUP) or a data push carrying the
/// opcode byte and the pushed bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles direct pushes (1-75 bytes) and OP_PUSHDATA1/2/4.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// A vector of parsed chunks, or `DataTooSmall` if a push is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];

        match op {
            OP_PUSHDATA1 => {
                if bytes.len() < pos + 2 {
                    return Err(ScriptError::DataTooSmall);
                }
                let length = bytes[pos + 1] as usize;
                pos += 2;
                if bytes.len() < pos + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..pos + length].to_vec()),
                });
                pos += length;
            }
            OP_PUSHDATA2 => {
                if bytes.len() < pos + 3 {
                    return Err(ScriptError::DataTooSmall);
                }
                let length = u16::from_le_bytes([bytes[pos + 1], bytes[pos + 2]]) as usize;
                pos += 3;
                if bytes.len() < pos + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..pos + length].to_vec()),
                });
                pos += length;
            }
            OP_PUSHDATA4 => {
                if bytes.len() < pos + 5 {
                    return Err(ScriptError::DataTooSmall);
                }
                let length = u32::from_le_bytes([
                    bytes[pos + 1],
                    bytes[pos + 2],
                    bytes[pos + 3],
                    bytes[pos + 4],
                ]) as usize;
                pos += 5;
                if bytes.len() < pos + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..pos + length].to_vec()),
                });
                pos += length;
            }
            OP_DATA_1..=OP_DATA_75 => {
                let length = op as usize;
                if bytes.len() < pos + 1 + length {
                    return Err(ScriptError::DataTooSmall);
                }
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos + 1..pos + 1 + length].to_vec()),
                });
                pos += 1 + length;
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
            }
        }
    }

    Ok(chunks)
}

/// Compute the minimal push prefix for a payload of the given length.
///
/// Direct push for 1-75 bytes, OP_PUSHDATA1 for up to 255, OP_PUSHDATA2
/// for up to 65535, OP_PUSHDATA4 beyond that.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The prefix bytes, or `DataTooBig` if the length exceeds u32 range.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}
