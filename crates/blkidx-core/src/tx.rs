//! Segwit-aware transaction decoding.
//!
//! The state machine follows the Python reference implementation's
//! `parse_transaction_sync` byte-for-byte (marker/flag detection, legacy-vs-segwit
//! txid computation); no Rust source in the pack attempts this, since the pack's
//! `LegacyTx`/`WitnessTx` types are built for signing and sighash, not decode-and-move-on.

use crate::address::NetworkParams;
use crate::error::DecodeError;
use crate::hash::{hash256, reversed_hex};
use crate::script;
use crate::varint::{read_exact_vec, read_hash32, read_u32_le, read_u64_le, read_varint, write_varint};
use serde::Serialize;
use std::io::{Cursor, Read};

#[derive(Debug, Clone, Serialize)]
pub struct VIn {
    pub prev_txid: String,
    pub prev_vout: u32,
    pub script_sig: String,
    pub sequence: u32,
    pub witness: Option<Vec<String>>,
    pub is_coinbase: bool,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VOut {
    pub n: u32,
    pub value: f64,
    pub script_pub_key: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tx {
    pub txid: String,
    pub version: u32,
    pub vin: Vec<VIn>,
    pub vout: Vec<VOut>,
    pub locktime: u32,
}

const COINBASE_PREV_TXID: [u8; 32] = [0u8; 32];
const COINBASE_PREV_VOUT: u32 = 0xFFFF_FFFF;

/// Reads one transaction from `reader`, which must be positioned at the
/// transaction's first byte and must not run out of bytes before the end of this
/// transaction (the block framing in `reader.rs` guarantees this: a whole block body
/// is read into memory before any transaction in it is parsed).
///
/// Takes a rewindable cursor rather than a generic `Read` because the marker/flag
/// probe (step 2 below) sometimes has to undo itself: a `0x00` byte followed by
/// anything other than `0x01` was never a segwit marker at all, it was the first
/// byte of a (zero-input) vin-count varint, and parsing has to resume from there.
pub fn read_tx(reader: &mut Cursor<&[u8]>, params: NetworkParams) -> Result<Tx, DecodeError> {
    // The whole transaction is re-read into a buffer as we go, so the legacy-form
    // bytes can be hashed without a second pass over the wire stream.
    let mut legacy_bytes: Vec<u8> = Vec::new();

    let version = read_u32_le(reader)?;
    legacy_bytes.extend_from_slice(&version.to_le_bytes());

    let mut is_segwit = false;
    let mut marker = [0u8; 1];
    reader.read_exact(&mut marker).map_err(|_| DecodeError::UnexpectedEof)?;
    if marker[0] == 0x00 {
        let mut flag = [0u8; 1];
        reader.read_exact(&mut flag).map_err(|_| DecodeError::UnexpectedEof)?;
        if flag[0] == 0x01 {
            is_segwit = true;
        } else {
            // Not actually a segwit marker: rewind both probed bytes and parse the
            // first of them (0x00) as a minimal one-byte vin-count varint of zero.
            let pos = reader.position();
            reader.set_position(pos - 2);
        }
    } else {
        // Not a marker byte either; rewind the single probed byte and let the normal
        // vin-count varint read pick it up as its first byte.
        let pos = reader.position();
        reader.set_position(pos - 1);
    }

    let vin_count = read_varint(reader)?;
    read_tx_body(reader, params, version, vin_count, is_segwit, &mut legacy_bytes)
}

fn read_tx_body(
    reader: &mut Cursor<&[u8]>,
    params: NetworkParams,
    version: u32,
    vin_count: u64,
    is_segwit: bool,
    legacy_bytes: &mut Vec<u8>,
) -> Result<Tx, DecodeError> {
    write_varint(legacy_bytes, vin_count);

    let mut vin = Vec::with_capacity(vin_count as usize);
    for index in 0..vin_count {
        let prev_txid_raw = read_hash32(reader)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;
        let prev_vout = read_u32_le(reader)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;
        let script_len = read_varint(reader)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;
        let script_sig = read_exact_vec(reader, script_len as usize)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;
        let sequence = read_u32_le(reader)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;

        legacy_bytes.extend_from_slice(&prev_txid_raw);
        legacy_bytes.extend_from_slice(&prev_vout.to_le_bytes());
        write_varint(legacy_bytes, script_len);
        legacy_bytes.extend_from_slice(&script_sig);
        legacy_bytes.extend_from_slice(&sequence.to_le_bytes());

        let is_coinbase = prev_txid_raw == COINBASE_PREV_TXID && prev_vout == COINBASE_PREV_VOUT;
        let address = if is_coinbase {
            Some("coinbase".to_string())
        } else {
            script::address_for_script_sig(&script_sig, params)
        };

        vin.push(VIn {
            prev_txid: reversed_hex(&prev_txid_raw),
            prev_vout,
            script_sig: hex::encode(&script_sig),
            sequence,
            witness: None,
            is_coinbase,
            address,
        });
    }

    let vout_count = read_varint(reader)?;
    write_varint(legacy_bytes, vout_count);

    let mut vout = Vec::with_capacity(vout_count as usize);
    for index in 0..vout_count {
        let value_sats = read_u64_le(reader)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;
        let script_len = read_varint(reader)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;
        let script_pub_key = read_exact_vec(reader, script_len as usize)
            .map_err(|e| DecodeError::TransactionDecode { index: index as usize, source: Box::new(e) })?;

        legacy_bytes.extend_from_slice(&value_sats.to_le_bytes());
        write_varint(legacy_bytes, script_len);
        legacy_bytes.extend_from_slice(&script_pub_key);

        let address = script::address_for_script_pubkey(&script_pub_key, params);

        vout.push(VOut {
            n: index as u32,
            value: value_sats as f64 / 100_000_000.0,
            script_pub_key: hex::encode(&script_pub_key),
            address,
        });
    }

    if is_segwit {
        for input in vin.iter_mut() {
            let item_count = read_varint(reader)?;
            let mut items = Vec::with_capacity(item_count as usize);
            for _ in 0..item_count {
                let item_len = read_varint(reader)?;
                let item = read_exact_vec(reader, item_len as usize)?;
                items.push(hex::encode(item));
            }
            input.witness = Some(items);
        }
    }

    let locktime = read_u32_le(reader)?;
    legacy_bytes.extend_from_slice(&locktime.to_le_bytes());

    let txid = reversed_hex(&hash256(legacy_bytes));

    Ok(Tx {
        txid,
        version,
        vin,
        vout,
        locktime,
    })
}
