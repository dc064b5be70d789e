//! Script opcode constants.
//!
//! Only the opcodes this SDK emits or inspects are defined here: the push
//! data family, the P2PKH template opcodes, and the data-output markers.

/// Push an empty array onto the stack.
pub const OP_0: u8 = 0x00;
/// Alias of OP_0.
pub const OP_FALSE: u8 = 0x00;

/// Lowest direct-push opcode: push 1 byte.
pub const OP_DATA_1: u8 = 0x01;
/// Direct push of 20 bytes, the length of a public key hash.
pub const OP_DATA_20: u8 = 0x14;
/// Highest direct-push opcode: push 75 bytes.
pub const OP_DATA_75: u8 = 0x4b;

/// Push data with a 1-byte length prefix.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Push data with a 2-byte little-endian length prefix.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push data with a 4-byte little-endian length prefix.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Mark an output as unspendable; the remainder of the script is data.
pub const OP_RETURN: u8 = 0x6a;

/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;

/// Check equality of the top two stack items.
pub const OP_EQUAL: u8 = 0x87;
/// Check equality and fail the script on mismatch.
pub const OP_EQUALVERIFY: u8 = 0x88;

/// Replace the top stack item with its Hash160.
pub const OP_HASH160: u8 = 0xa9;

/// Verify an ECDSA signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
