//! Bitcoin-style VarInt (CompactSize) and fixed-width little-endian primitives.
//!
//! Follows the `ByteFormat` convention of free functions plus a small decoding
//! cursor, generalized to the one shape this crate actually needs: reading out of an
//! already-framed, fully-buffered block body.

use crate::error::DecodeError;
use std::io::Read;

/// Calculates the minimum prefix length for a VarInt encoding of `number`.
pub fn prefix_byte_len(number: u64) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x10000..=0xffff_ffff => 5,
        _ => 9,
    }
}

fn prefix_len_from_first_byte(b: u8) -> u8 {
    match b {
        0..=0xfc => 1,
        0xfd => 3,
        0xfe => 5,
        0xff => 9,
    }
}

/// Reads a Bitcoin-style VarInt, rejecting non-minimal encodings.
pub fn read_varint<R: Read>(reader: &mut R) -> Result<u64, DecodeError> {
    let mut prefix = [0u8; 1];
    reader
        .read_exact(&mut prefix)
        .map_err(|_| DecodeError::UnexpectedEof)?;
    let prefix_len = prefix_len_from_first_byte(prefix[0]);

    let number = if prefix_len > 1 {
        let mut buf = [0u8; 8];
        reader
            .read_exact(&mut buf[..prefix_len as usize - 1])
            .map_err(|_| DecodeError::UnexpectedEof)?;
        u64::from_le_bytes(buf)
    } else {
        prefix[0] as u64
    };

    if prefix_byte_len(number) < prefix_len {
        Err(DecodeError::NonMinimalVarInt)
    } else {
        Ok(number)
    }
}

/// Writes a Bitcoin-style VarInt. Used only when re-serializing a transaction for
/// legacy-txid computation — real wire writing is out of scope for a decoder.
pub fn write_varint(out: &mut Vec<u8>, number: u64) {
    match prefix_byte_len(number) {
        1 => out.push(number as u8),
        3 => {
            out.push(0xfd);
            out.extend_from_slice(&(number as u16).to_le_bytes());
        }
        5 => {
            out.push(0xfe);
            out.extend_from_slice(&(number as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&number.to_le_bytes());
        }
    }
}

pub fn read_u32_le<R: Read>(reader: &mut R) -> Result<u32, DecodeError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|_| DecodeError::UnexpectedEof)?;
    Ok(u32::from_le_bytes(buf))
}

pub fn read_u64_le<R: Read>(reader: &mut R) -> Result<u64, DecodeError> {
    let mut buf = [0u8; 8];
    reader
        .read_exact(&mut buf)
        .map_err(|_| DecodeError::UnexpectedEof)?;
    Ok(u64::from_le_bytes(buf))
}

pub fn read_exact_vec<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|_| DecodeError::UnexpectedEof)?;
    Ok(buf)
}

/// Reads a 32-byte hash, returning it in on-wire (not display) byte order.
pub fn read_hash32<R: Read>(reader: &mut R) -> Result<[u8; 32], DecodeError> {
    let mut buf = [0u8; 32];
    reader
        .read_exact(&mut buf)
        .map_err(|_| DecodeError::UnexpectedEof)?;
    Ok(buf)
}
