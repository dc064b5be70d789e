//! Spend output specifications and the Memo protocol script builder.
//!
//! A `SpendOutput` is the plain-data description of one desired output.
//! `build_spend_output` maps it to a value and locking script, enforcing
//! the per-kind payload constraints of the deployed Memo protocol.
//!
//! Memo outputs are unspendable OP_RETURN scripts tagged with the protocol
//! prefix `0x6d` and a one-byte action code, followed by the payload(s) as
//! individual data pushes. Downstream indexers rely on the exact byte
//! values below; they must not change.

use memo_primitives::txhash::TxHash;
use memo_script::opcodes::OP_RETURN;
use memo_script::{Address, Script};

use crate::output::TransactionOutput;
use crate::p2pkh;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Protocol constants
// -----------------------------------------------------------------------

/// First byte of every Memo protocol tag.
pub const PROTOCOL_PREFIX: u8 = 0x6d;

/// Action code: set display name.
pub const CODE_SET_NAME: u8 = 0x01;
/// Action code: post a message.
pub const CODE_POST: u8 = 0x02;
/// Action code: reply to a post.
pub const CODE_REPLY: u8 = 0x03;
/// Action code: like / tip a post.
pub const CODE_LIKE: u8 = 0x04;
/// Action code: set profile text.
pub const CODE_SET_PROFILE: u8 = 0x05;
/// Action code: follow a user.
pub const CODE_FOLLOW: u8 = 0x06;
/// Action code: unfollow a user.
pub const CODE_UNFOLLOW: u8 = 0x07;
/// Action code: post a topic message.
pub const CODE_TOPIC_POST: u8 = 0x0c;

/// Maximum payload size for posts, names, profiles, and target references.
pub const MAX_POST_SIZE: usize = 217;
/// Maximum message size for replies (the 32-byte target hash is separate).
pub const MAX_REPLY_SIZE: usize = 184;
/// Maximum combined topic-name + message size for topic posts.
pub const MAX_TAG_MESSAGE_SIZE: usize = 204;

/// Chain-defined minimum value for a spendable output.
///
/// Exported for callers; this core does not enforce it.
pub const DUST_LIMIT: u64 = 546;

// -----------------------------------------------------------------------
// Spend kinds
// -----------------------------------------------------------------------

/// The kind of output to build. A closed enumeration; each variant has
/// its own validation and construction rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpendKind {
    /// Standard value transfer to a public key hash.
    PayToAddress,
    /// Untagged unspendable data output.
    DataReturn,
    /// Memo post.
    Post,
    /// Memo set display name.
    SetName,
    /// Memo follow (payload is the followed user's address hash).
    Follow,
    /// Memo unfollow.
    Unfollow,
    /// Memo like (payload is the liked transaction hash).
    Like,
    /// Memo reply (reference payload is the target transaction hash).
    Reply,
    /// Memo set profile text (empty payload clears the profile).
    SetProfile,
    /// Memo topic post (reference payload is the topic name).
    TopicPost,
}

impl SpendKind {
    /// The Memo action code for protocol-tagged kinds, `None` otherwise.
    pub fn protocol_code(&self) -> Option<u8> {
        match self {
            SpendKind::Post => Some(CODE_POST),
            SpendKind::SetName => Some(CODE_SET_NAME),
            SpendKind::Follow => Some(CODE_FOLLOW),
            SpendKind::Unfollow => Some(CODE_UNFOLLOW),
            SpendKind::Like => Some(CODE_LIKE),
            SpendKind::Reply => Some(CODE_REPLY),
            SpendKind::SetProfile => Some(CODE_SET_PROFILE),
            SpendKind::TopicPost => Some(CODE_TOPIC_POST),
            SpendKind::PayToAddress | SpendKind::DataReturn => None,
        }
    }

    /// Short name used in error messages.
    fn name(&self) -> &'static str {
        match self {
            SpendKind::PayToAddress => "pay-to-address",
            SpendKind::DataReturn => "data",
            SpendKind::Post => "post",
            SpendKind::SetName => "set-name",
            SpendKind::Follow => "follow",
            SpendKind::Unfollow => "unfollow",
            SpendKind::Like => "like",
            SpendKind::Reply => "reply",
            SpendKind::SetProfile => "set-profile",
            SpendKind::TopicPost => "topic-post",
        }
    }
}

// -----------------------------------------------------------------------
// Spend output specification
// -----------------------------------------------------------------------

/// The plain-data description of one desired output.
///
/// Supplied by the caller in the order the outputs should appear in the
/// transaction; that order is preserved exactly.
#[derive(Clone, Debug)]
pub struct SpendOutput {
    /// Which kind of output to build.
    pub kind: SpendKind,
    /// Satoshi value. Only used by `PayToAddress`; forced to 0 for data
    /// and protocol-tagged kinds.
    pub amount: u64,
    /// The primary payload (message text, name, target hash bytes).
    pub data: Vec<u8>,
    /// The reference payload for `Reply` (target tx hash) and `TopicPost`
    /// (topic name). Empty means absent.
    pub ref_data: Vec<u8>,
    /// Destination public key hash for `PayToAddress`.
    pub to_hash: Option<[u8; 20]>,
}

impl SpendOutput {
    /// A value transfer to a raw 20-byte public key hash.
    pub fn pay(to_hash: [u8; 20], amount: u64) -> Self {
        SpendOutput {
            kind: SpendKind::PayToAddress,
            amount,
            data: Vec::new(),
            ref_data: Vec::new(),
            to_hash: Some(to_hash),
        }
    }

    /// A value transfer to an address.
    pub fn pay_to_address(address: &Address, amount: u64) -> Self {
        Self::pay(address.public_key_hash, amount)
    }

    /// An untagged data output.
    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        SpendOutput {
            kind: SpendKind::DataReturn,
            amount: 0,
            data: data.into(),
            ref_data: Vec::new(),
            to_hash: None,
        }
    }

    /// A Memo post.
    pub fn post(message: impl Into<Vec<u8>>) -> Self {
        Self::tagged(SpendKind::Post, message.into(), Vec::new())
    }

    /// A Memo set-name action.
    pub fn set_name(name: impl Into<Vec<u8>>) -> Self {
        Self::tagged(SpendKind::SetName, name.into(), Vec::new())
    }

    /// A Memo follow action targeting a user's address hash.
    pub fn follow(address_hash: [u8; 20]) -> Self {
        Self::tagged(SpendKind::Follow, address_hash.to_vec(), Vec::new())
    }

    /// A Memo unfollow action targeting a user's address hash.
    pub fn unfollow(address_hash: [u8; 20]) -> Self {
        Self::tagged(SpendKind::Unfollow, address_hash.to_vec(), Vec::new())
    }

    /// A Memo like targeting a post's transaction hash.
    pub fn like(post_tx_hash: &TxHash) -> Self {
        Self::tagged(SpendKind::Like, post_tx_hash.as_bytes().to_vec(), Vec::new())
    }

    /// A Memo reply to a post's transaction hash.
    pub fn reply(post_tx_hash: &TxHash, message: impl Into<Vec<u8>>) -> Self {
        Self::tagged(
            SpendKind::Reply,
            message.into(),
            post_tx_hash.as_bytes().to_vec(),
        )
    }

    /// A Memo set-profile action. An empty text clears the profile.
    pub fn set_profile(text: impl Into<Vec<u8>>) -> Self {
        Self::tagged(SpendKind::SetProfile, text.into(), Vec::new())
    }

    /// A Memo post into a named topic.
    pub fn topic_post(topic: impl Into<Vec<u8>>, message: impl Into<Vec<u8>>) -> Self {
        Self::tagged(SpendKind::TopicPost, message.into(), topic.into())
    }

    fn tagged(kind: SpendKind, data: Vec<u8>, ref_data: Vec<u8>) -> Self {
        SpendOutput {
            kind,
            amount: 0,
            data,
            ref_data,
            to_hash: None,
        }
    }
}

// -----------------------------------------------------------------------
// Builder
// -----------------------------------------------------------------------

/// Build the locking script and value for one spend specification.
///
/// Dispatches on the kind to its validation-and-build function. Any
/// constraint violation fails the whole call; no partial output is
/// produced.
///
/// # Arguments
/// * `spend` - The spend specification to build.
///
/// # Returns
/// The built output, or `DataTooLarge` / `EmptyPayload` /
/// `MissingDestination` naming the violated constraint.
pub fn build_spend_output(spend: &SpendOutput) -> Result<TransactionOutput, TransactionError> {
    match spend.kind {
        SpendKind::PayToAddress => build_pay_to_address(spend),
        SpendKind::DataReturn => build_data_return(spend),
        SpendKind::Post => build_tagged_single(spend, CODE_POST),
        SpendKind::SetName => build_tagged_single(spend, CODE_SET_NAME),
        SpendKind::Follow => build_tagged_single(spend, CODE_FOLLOW),
        SpendKind::Unfollow => build_tagged_single(spend, CODE_UNFOLLOW),
        SpendKind::Like => build_tagged_single(spend, CODE_LIKE),
        SpendKind::Reply => build_reply(spend),
        SpendKind::SetProfile => build_set_profile(spend),
        SpendKind::TopicPost => build_topic_post(spend),
    }
}

/// Build the full ordered output list for a slice of specifications.
///
/// Output order equals specification order exactly. The first failing
/// specification aborts the call; no partial list is returned.
pub fn build_spend_outputs(
    spends: &[SpendOutput],
) -> Result<Vec<TransactionOutput>, TransactionError> {
    spends.iter().map(build_spend_output).collect()
}

/// Value transfer: standard P2PKH lock over the destination hash.
fn build_pay_to_address(spend: &SpendOutput) -> Result<TransactionOutput, TransactionError> {
    let to_hash = spend.to_hash.ok_or(TransactionError::MissingDestination)?;
    Ok(TransactionOutput::new(spend.amount, p2pkh::lock(&to_hash)))
}

/// Untagged data output: OP_RETURN + one push. No size constraint beyond
/// what push encoding can express; value forced to 0.
fn build_data_return(spend: &SpendOutput) -> Result<TransactionOutput, TransactionError> {
    let script = data_script(&[&spend.data], None)?;
    Ok(TransactionOutput::new(0, script))
}

/// Single-payload tagged kinds (post, set-name, follow, unfollow, like):
/// payload must be non-empty and at most MAX_POST_SIZE bytes.
fn build_tagged_single(
    spend: &SpendOutput,
    code: u8,
) -> Result<TransactionOutput, TransactionError> {
    require_non_empty(spend.kind, "payload", &spend.data)?;
    require_within(spend.kind, spend.data.len(), MAX_POST_SIZE)?;
    let script = data_script(&[&spend.data], Some(code))?;
    Ok(TransactionOutput::new(0, script))
}

/// Reply: message at most MAX_REPLY_SIZE bytes, both the message and the
/// target reference non-empty; the reference is pushed before the message.
fn build_reply(spend: &SpendOutput) -> Result<TransactionOutput, TransactionError> {
    require_non_empty(spend.kind, "payload", &spend.data)?;
    require_non_empty(spend.kind, "reference payload", &spend.ref_data)?;
    require_within(spend.kind, spend.data.len(), MAX_REPLY_SIZE)?;
    let script = data_script(&[&spend.ref_data, &spend.data], Some(CODE_REPLY))?;
    Ok(TransactionOutput::new(0, script))
}

/// Set-profile: payload at most MAX_POST_SIZE bytes, empty allowed
/// (clears the profile).
fn build_set_profile(spend: &SpendOutput) -> Result<TransactionOutput, TransactionError> {
    require_within(spend.kind, spend.data.len(), MAX_POST_SIZE)?;
    let script = data_script(&[&spend.data], Some(CODE_SET_PROFILE))?;
    Ok(TransactionOutput::new(0, script))
}

/// Topic post: combined topic + message at most MAX_TAG_MESSAGE_SIZE
/// bytes, both non-empty; the topic is pushed before the message.
fn build_topic_post(spend: &SpendOutput) -> Result<TransactionOutput, TransactionError> {
    require_non_empty(spend.kind, "payload", &spend.data)?;
    require_non_empty(spend.kind, "reference payload", &spend.ref_data)?;
    require_within(
        spend.kind,
        spend.data.len() + spend.ref_data.len(),
        MAX_TAG_MESSAGE_SIZE,
    )?;
    let script = data_script(&[&spend.ref_data, &spend.data], Some(CODE_TOPIC_POST))?;
    Ok(TransactionOutput::new(0, script))
}

/// Assemble an unspendable data script: OP_RETURN, the two-byte protocol
/// tag when a code is given, then each part as its own data push.
fn data_script(parts: &[&[u8]], code: Option<u8>) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.append_opcodes(&[OP_RETURN])?;
    if let Some(code) = code {
        script.append_push_data(&[PROTOCOL_PREFIX, code])?;
    }
    for part in parts {
        script.append_push_data(part)?;
    }
    Ok(script)
}

fn require_non_empty(
    kind: SpendKind,
    field: &'static str,
    data: &[u8],
) -> Result<(), TransactionError> {
    if data.is_empty() {
        return Err(TransactionError::EmptyPayload {
            kind: kind.name(),
            field,
        });
    }
    Ok(())
}

fn require_within(kind: SpendKind, len: usize, limit: usize) -> Result<(), TransactionError> {
    if len > limit {
        return Err(TransactionError::DataTooLarge {
            kind: kind.name(),
            len,
            limit,
        });
    }
    Ok(())
}
