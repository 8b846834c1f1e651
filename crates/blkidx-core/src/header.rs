//! Fixed 80-byte block header decoding.
//!
//! Grounded on `RawHeader([u8; 80])` (`provider/src/types.rs`), which reads/writes
//! exactly 80 bytes with no sub-field parsing; here the six header fields are
//! additionally decoded, since the indexer needs them individually.

use crate::error::DecodeError;
use crate::hash::{hash256, reversed_hex};
use crate::varint::{read_hash32, read_u32_le};
use serde::Serialize;
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version: u32,
    /// Byte-reversed display hex of the previous block's hash.
    pub previous_block_hash: String,
    /// Byte-reversed display hex of the merkle root.
    pub merkle_root: String,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

pub const HEADER_LEN: usize = 80;

impl Header {
    /// Reads exactly 80 bytes and decodes the header, returning the header alongside
    /// its byte-reversed double-SHA256 hash (the block hash).
    pub fn read<R: Read>(reader: &mut R) -> Result<(Header, String), DecodeError> {
        let mut raw = [0u8; HEADER_LEN];
        reader
            .read_exact(&mut raw)
            .map_err(|_| DecodeError::UnexpectedEof)?;

        let mut cursor = std::io::Cursor::new(&raw[..]);
        let version = read_u32_le(&mut cursor)?;
        let previous_block_hash = reversed_hex(&read_hash32(&mut cursor)?);
        let merkle_root = reversed_hex(&read_hash32(&mut cursor)?);
        let timestamp = read_u32_le(&mut cursor)?;
        let bits = read_u32_le(&mut cursor)?;
        let nonce = read_u32_le(&mut cursor)?;

        let hash = reversed_hex(&hash256(&raw));

        Ok((
            Header {
                version,
                previous_block_hash,
                merkle_root,
                timestamp,
                bits,
                nonce,
            },
            hash,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_fixtures::GENESIS_FRAME;

    #[test]
    fn decodes_genesis_header() {
        // Skip the 4-byte magic and 4-byte size prefix; the header is the next 80 bytes.
        let header_bytes = &GENESIS_FRAME[8..88];
        let mut cursor = std::io::Cursor::new(header_bytes);
        let (header, hash) = Header::read(&mut cursor).unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(
            header.previous_block_hash,
            "0000000000000000000000000000000000000000000000000000000000000000"[..64]
        );
        assert_eq!(
            header.merkle_root,
            "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"[..64]
        );
        assert_eq!(header.timestamp, 1231006505);
        assert_eq!(header.bits, 0x1d00ffff);
        assert_eq!(header.nonce, 2083236893);
        assert_eq!(
            hash,
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
    }
}
