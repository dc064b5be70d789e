/// Error types for script operations.
///
/// Covers push encoding failures, chunk parsing, and address validation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Attempted to use append_opcodes for a push data opcode.
    #[error("use append_push_data for push data opcodes: {0:#04x}")]
    InvalidOpcodeType(u8),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid address length after Base58 decoding.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte is not a supported P2PKH prefix.
    #[error("address version not supported for '{0}'")]
    UnsupportedAddress(String),

    /// Base58Check checksum does not match.
    #[error("address checksum failed")]
    ChecksumFailed,

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Script is empty when a non-empty script was expected.
    #[error("script is empty")]
    EmptyScript,

    /// Script is not a P2PKH script.
    #[error("not a P2PKH script")]
    NotP2pkh,

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds the maximum size encodable by OP_PUSHDATA4.
    #[error("data too big")]
    DataTooBig,

    /// Error from the primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] memo_primitives::PrimitivesError),
}
