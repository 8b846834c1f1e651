//! Combines header, transaction, and height decoding into one `BlockRecord`.
//!
//! Grounded on the Python reference's `parse_block_sync`, which is the only place in
//! the original that stitches header + transactions + height together; nothing in
//! this crate's header/transaction decoding owns this role on its own, since each
//! decodes its own piece in isolation rather than producing a flat persisted record.

use crate::coin::Coin;
use crate::error::DecodeError;
use crate::header::Header;
use crate::script::extract_bip34_height;
use crate::tx::Tx;
use crate::varint::read_varint;
use serde::Serialize;
use std::io::Cursor;

#[derive(Debug, Clone, Serialize)]
pub struct BlockRecord {
    pub height: Option<u32>,
    pub hash: String,
    pub coin: Coin,
    pub timestamp: u32,
    pub tx_count: u32,
    pub header: Header,
    pub tx: Vec<Tx>,
}

/// Decodes one already-framed block body (the payload handed back by
/// `BlockFileReader::next_frame`). `height`, if known ahead of time (e.g. the caller
/// tracks file-to-height mapping externally), is used as-is; otherwise it is inferred
/// from the first transaction's coinbase scriptSig via BIP-34.
///
/// A transaction that fails to decode aborts the block's remaining transactions: the
/// transactions parsed so far are kept, `tx_count` reflects only those, and the error
/// is not propagated — matching the original's "remaining bytes are probably
/// misaligned, stop here" recovery.
pub fn decode_block(raw: &[u8], coin: Coin, height: Option<u32>) -> Result<BlockRecord, DecodeError> {
    let mut cursor = Cursor::new(raw);
    let (header, hash) = Header::read(&mut cursor)?;

    let tx_count = read_varint(&mut cursor)?;
    let mut txs = Vec::with_capacity(tx_count as usize);
    for _ in 0..tx_count {
        let remaining = &raw[cursor.position() as usize..];
        let mut tx_cursor = Cursor::new(remaining);
        match crate::tx::read_tx(&mut tx_cursor, coin.network_params()) {
            Ok(tx) => {
                let consumed = tx_cursor.position();
                cursor.set_position(cursor.position() + consumed);
                txs.push(tx);
            }
            // A mid-transaction decode error aborts the block's remaining
            // transactions (the body is likely misaligned from here on); the
            // transactions parsed so far are kept and returned, never propagated.
            Err(_) => break,
        }
    }

    let height = height.or_else(|| {
        txs.first().and_then(|coinbase| {
            let script_sig = coinbase.vin.first()?;
            let raw_script = hex::decode(&script_sig.script_sig).ok()?;
            extract_bip34_height(&raw_script)
        })
    });

    Ok(BlockRecord {
        height,
        hash,
        coin,
        timestamp: header.timestamp,
        tx_count: txs.len() as u32,
        header,
        tx: txs,
    })
}
