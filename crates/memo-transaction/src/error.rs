/// Error types for transaction building and signing.
///
/// All variants are terminal for the current call: nothing is retried and
/// no partial transaction is returned. Validation failures carry the kind
/// and limit of the violated constraint.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// A spend payload exceeds the kind-specific size limit.
    #[error("{kind} payload of {len} bytes exceeds the {limit}-byte limit")]
    DataTooLarge {
        /// The spend kind whose limit was violated.
        kind: &'static str,
        /// The supplied payload length.
        len: usize,
        /// The maximum allowed length.
        limit: usize,
    },

    /// A spend is missing a payload that its kind requires.
    #[error("{kind} requires a non-empty {field}")]
    EmptyPayload {
        /// The spend kind with the missing payload.
        kind: &'static str,
        /// Which payload field is empty.
        field: &'static str,
    },

    /// A value-transfer spend has no destination hash.
    #[error("pay-to-address output requires a destination public key hash")]
    MissingDestination,

    /// Signature computation failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// Binary or hex serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The previous output reference is malformed.
    #[error("invalid previous output reference: {0}")]
    InvalidOutpoint(String),

    /// An underlying script error.
    #[error("script error: {0}")]
    Script(#[from] memo_script::ScriptError),

    /// An underlying primitives error.
    #[error("primitives error: {0}")]
    Primitives(#[from] memo_primitives::PrimitivesError),
}
