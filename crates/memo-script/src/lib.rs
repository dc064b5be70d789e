/// Memo SDK - Script construction, parsing, and address handling.
///
/// Provides the Script type, opcode constants, script chunk parsing with
/// minimal-push encoding, and Base58Check P2PKH address handling.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{Address, Network};
pub use chunk::ScriptChunk;
