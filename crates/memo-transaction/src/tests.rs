//! End-to-end tests for the memo-transaction crate.
//!
//! Covers the full create pipeline (build, assemble, sign, encode),
//! serialization round trips, txid computation, output ordering, and the
//! observer hooks.

use std::cell::RefCell;

use memo_primitives::ec::{PrivateKey, Signature};
use memo_primitives::txhash::TxHash;
use memo_script::opcodes::OP_RETURN;
use memo_script::Script;

use crate::create::{assemble, create, create_observed};
use crate::observe::BuildObserver;
use crate::output::TransactionOutput;
use crate::sighash::SIGHASH_ALL_FORKID;
use crate::spend::{SpendOutput, CODE_POST, MAX_REPLY_SIZE, PROTOCOL_PREFIX};
use crate::transaction::Transaction;
use crate::utxo::Utxo;
use crate::TransactionError;

/// A fixed test key (the scalar 1 generator key).
const TEST_KEY_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000001";

/// A fixed previous transaction id in display order.
const PREV_TXID: &str = "45be95d2f2c64e99518ffbbce03fb15a7758f20ee5eecf0df07938d977add71d";

/// Build the UTXO the test key is allowed to spend: a P2PKH output locked
/// to the key's own public key hash.
fn test_utxo(key: &PrivateKey, satoshis: u64) -> Utxo {
    let pkh = key.pub_key().hash160();
    Utxo::from_hex_parts(
        PREV_TXID,
        0,
        &crate::p2pkh::lock(&pkh).to_hex(),
        satoshis,
    )
    .unwrap()
}

// -----------------------------------------------------------------------
// Create pipeline
// -----------------------------------------------------------------------

/// A single post output: one input, one output, with the script starting
/// OP_RETURN, protocol tag, then the message bytes.
#[test]
fn test_create_single_post() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);

    let tx = create(&utxo, &key, &[SpendOutput::post("hello")]).unwrap();

    assert_eq!(tx.input_count(), 1);
    assert_eq!(tx.output_count(), 1);
    assert_eq!(tx.version, crate::TX_VERSION);
    assert_eq!(tx.lock_time, 0);

    // Input references exactly the supplied previous output.
    assert_eq!(tx.inputs[0].source_tx_hash.to_string(), PREV_TXID);
    assert_eq!(tx.inputs[0].source_index, 0);
    assert!(tx.inputs[0].unlocking_script.is_some());

    // OP_RETURN, <6d02>, "hello".
    let script = &tx.outputs[0].locking_script;
    assert_eq!(script.to_bytes()[0], OP_RETURN);
    assert_eq!(script.to_hex(), "6a026d020568656c6c6f");
    assert_eq!(tx.outputs[0].satoshis, 0);
}

/// An oversized reply fails with DataTooLarge and no transaction is
/// returned.
#[test]
fn test_create_oversized_reply_fails() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);

    let target = TxHash::new([0x55; 32]);
    let spend = SpendOutput::reply(&target, vec![b'x'; 600_000]);

    let result = create(&utxo, &key, &[spend]);
    assert!(matches!(
        result,
        Err(TransactionError::DataTooLarge { limit: MAX_REPLY_SIZE, .. })
    ));
}

/// A value transfer signed with a fixed key over a fixed previous output
/// is fully deterministic: two runs produce byte-identical transactions.
#[test]
fn test_create_value_transfer_deterministic() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);
    let spends = [SpendOutput::pay([0x1d; 20], 5000)];

    let tx1 = create(&utxo, &key, &spends).unwrap();
    let tx2 = create(&utxo, &key, &spends).unwrap();

    assert_eq!(tx1.to_hex(), tx2.to_hex());
    assert_eq!(tx1.tx_id_hex(), tx2.tx_id_hex());
    assert_eq!(
        tx1.inputs[0].unlocking_script.as_ref().unwrap().to_bytes(),
        tx2.inputs[0].unlocking_script.as_ref().unwrap().to_bytes()
    );
    assert_eq!(tx1.outputs[0].satoshis, 5000);
    assert!(tx1.outputs[0].locking_script.is_p2pkh());
}

/// The signature produced by the pipeline verifies against the sighash
/// and the signer's public key.
#[test]
fn test_created_signature_verifies() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 250_000);

    let tx = create(&utxo, &key, &[SpendOutput::pay([0x2a; 20], 9000)]).unwrap();

    let chunks = tx.inputs[0].unlocking_script.as_ref().unwrap().chunks().unwrap();
    assert_eq!(chunks.len(), 2);
    let sig_bytes = chunks[0].data.as_ref().unwrap();
    let pubkey_bytes = chunks[1].data.as_ref().unwrap();
    assert_eq!(pubkey_bytes.as_slice(), &key.pub_key().to_compressed());

    // Last byte of the signature push is the sighash flag.
    assert_eq!(*sig_bytes.last().unwrap() as u32, SIGHASH_ALL_FORKID);

    let sig = Signature::from_der(&sig_bytes[..sig_bytes.len() - 1]).unwrap();
    let sig_hash = tx.input_signature_hash(0, SIGHASH_ALL_FORKID).unwrap();
    assert!(sig.verify(&sig_hash, &key.pub_key()));
}

/// Output order in the built transaction equals specification order, for
/// a permuted mix of kinds.
#[test]
fn test_create_preserves_output_order() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 500_000);

    let spends = vec![
        SpendOutput::post("first"),
        SpendOutput::pay([0x0a; 20], 1000),
        SpendOutput::set_name("bob"),
        SpendOutput::pay([0x0b; 20], 2000),
    ];

    let tx = create(&utxo, &key, &spends).unwrap();
    assert_eq!(tx.output_count(), 4);
    assert!(tx.outputs[0].locking_script.is_data_output());
    assert_eq!(tx.outputs[1].locking_script.public_key_hash().unwrap(), [0x0a; 20]);
    assert!(tx.outputs[2].locking_script.is_data_output());
    assert_eq!(tx.outputs[3].locking_script.public_key_hash().unwrap(), [0x0b; 20]);
    assert_eq!(tx.total_output_satoshis(), 3000);
}

/// A failing spend aborts create before any signing happens.
#[test]
fn test_create_fail_fast() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);

    let empty: Vec<u8> = Vec::new();
    let spends = vec![SpendOutput::post("ok"), SpendOutput::post(empty)];
    assert!(matches!(
        create(&utxo, &key, &spends),
        Err(TransactionError::EmptyPayload { .. })
    ));
}

// -----------------------------------------------------------------------
// Encoding round trips
// -----------------------------------------------------------------------

/// Re-parsing an encoded transaction and re-encoding it yields the same
/// bytes and the same transaction id.
#[test]
fn test_encode_roundtrip_same_id() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);

    let tx = create(
        &utxo,
        &key,
        &[
            SpendOutput::post("roundtrip"),
            SpendOutput::pay([0x33; 20], 4000),
        ],
    )
    .unwrap();

    let bytes = tx.to_bytes();
    let parsed = Transaction::from_bytes(&bytes).unwrap();

    assert_eq!(parsed.to_bytes(), bytes);
    assert_eq!(parsed.tx_id(), tx.tx_id());
    assert_eq!(parsed.tx_id_hex(), tx.tx_id_hex());
}

/// The txid display form is the byte-reversed double hash of the
/// serialization.
#[test]
fn test_tx_id_display_form() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);
    let tx = create(&utxo, &key, &[SpendOutput::post("id check")]).unwrap();

    let id = tx.tx_id();
    let mut reversed = *id.as_bytes();
    reversed.reverse();
    assert_eq!(hex::encode(reversed), tx.tx_id_hex());
    assert_eq!(tx.tx_id_hex().len(), 64);
}

/// Trailing bytes after a complete transaction are rejected.
#[test]
fn test_from_bytes_rejects_trailing_data() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);
    let tx = create(&utxo, &key, &[SpendOutput::post("strict")]).unwrap();

    let mut bytes = tx.to_bytes();
    bytes.extend_from_slice(&[0xde, 0xad]);
    assert!(Transaction::from_bytes(&bytes).is_err());
}

/// Invalid and empty hex are rejected.
#[test]
fn test_from_hex_errors() {
    assert!(Transaction::from_hex("not_valid_hex").is_err());
    assert!(Transaction::from_bytes(&[]).is_err());
}

// -----------------------------------------------------------------------
// Assembly
// -----------------------------------------------------------------------

/// assemble() fixes version and lock time, leaves the input unsigned, and
/// attaches the coin's script and value for sighash computation.
#[test]
fn test_assemble_shape() {
    let utxo = Utxo::from_hex_parts(
        PREV_TXID,
        2,
        "76a914c7c6987b6e2345a6b138e3384141520a0fbc18c588ac",
        77_000,
    )
    .unwrap();

    let outputs = vec![TransactionOutput::new(100, Script::new())];
    let tx = assemble(&utxo, outputs);

    assert_eq!(tx.version, crate::TX_VERSION);
    assert_eq!(tx.lock_time, 0);
    assert_eq!(tx.input_count(), 1);
    assert!(tx.inputs[0].unlocking_script.is_none());
    assert_eq!(tx.inputs[0].source_index, 2);

    let source = tx.inputs[0].source_output().unwrap();
    assert_eq!(source.satoshis, 77_000);
    assert_eq!(source.locking_script, utxo.locking_script);
}

// -----------------------------------------------------------------------
// Observer
// -----------------------------------------------------------------------

/// An observer recording pipeline events.
#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl BuildObserver for Recorder {
    fn script_built(&self, index: usize, output: &TransactionOutput) {
        self.events
            .borrow_mut()
            .push(format!("built:{}:{}", index, output.locking_script.to_hex()));
    }

    fn input_signed(&self, input_index: usize, _unlocking_script: &Script) {
        self.events.borrow_mut().push(format!("signed:{}", input_index));
    }

    fn transaction_encoded(&self, tx_id: &TxHash, raw: &[u8]) {
        self.events
            .borrow_mut()
            .push(format!("encoded:{}:{}", tx_id, raw.len()));
    }
}

/// The observer sees one built event per output (in order), then the
/// signing event, then the encoding event.
#[test]
fn test_observer_sees_pipeline_events() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);

    let recorder = Recorder::default();
    let tx = create_observed(
        &utxo,
        &key,
        &[SpendOutput::post("hi"), SpendOutput::pay([0x44; 20], 600)],
        &recorder,
    )
    .unwrap();

    let events = recorder.events.borrow();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], format!("built:0:{}", tx.outputs[0].locking_script.to_hex()));
    assert_eq!(events[1], format!("built:1:{}", tx.outputs[1].locking_script.to_hex()));
    assert_eq!(events[2], "signed:0");
    assert_eq!(
        events[3],
        format!("encoded:{}:{}", tx.tx_id_hex(), tx.to_bytes().len())
    );
}

/// A failing build invokes no further hooks and returns no transaction.
#[test]
fn test_observer_not_called_past_failure() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);

    let recorder = Recorder::default();
    let empty: Vec<u8> = Vec::new();
    let result = create_observed(&utxo, &key, &[SpendOutput::set_name(empty)], &recorder);

    assert!(result.is_err());
    assert!(recorder.events.borrow().is_empty());
}

// -----------------------------------------------------------------------
// Protocol tag sanity
// -----------------------------------------------------------------------

/// The post tag bytes seen on the wire match the deployed protocol.
#[test]
fn test_post_tag_bytes_on_wire() {
    let key = PrivateKey::from_hex(TEST_KEY_HEX).unwrap();
    let utxo = test_utxo(&key, 100_000);
    let tx = create(&utxo, &key, &[SpendOutput::post("m")]).unwrap();

    let script = tx.outputs[0].locking_script.to_bytes();
    assert_eq!(script[0], OP_RETURN);
    assert_eq!(script[1], 0x02); // push of the 2-byte tag
    assert_eq!(script[2], PROTOCOL_PREFIX);
    assert_eq!(script[3], CODE_POST);
}
