use std::io;
use thiserror::Error;

/// Errors arising while decoding the binary contents of a single `blk*.dat` frame.
///
/// These are always scoped to one block file: an error here ends iteration over that
/// file, but never propagates further up.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The four bytes at the cursor do not match the coin's configured network magic.
    /// Expected for trailing padding or the tail of a still-growing file.
    #[error("invalid magic bytes: expected {expected:?}, got {got:?}")]
    InvalidMagic { expected: [u8; 4], got: [u8; 4] },

    /// Fewer bytes remain in the file than the frame's declared size.
    #[error("truncated frame: wanted {wanted} bytes, {available} available")]
    TruncatedFrame { wanted: u64, available: u64 },

    /// `Read` returned an I/O error while consuming a frame or block body.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A transaction failed to parse; earlier transactions in the block are still valid.
    #[error("transaction decode error at tx index {index}: {source}")]
    TransactionDecode {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },

    /// A VarInt prefix byte implied a non-minimal encoding.
    #[error("non-minimal varint encoding")]
    NonMinimalVarInt,

    /// Ran out of bytes mid-structure; distinct from `TruncatedFrame` because it can
    /// happen inside an already-framed, in-memory block body (a corrupt body, not a
    /// short file).
    #[error("unexpected end of buffer")]
    UnexpectedEof,
}

/// Errors from address encoding (Base58Check / Bech32).
#[derive(Debug, Error)]
pub enum AddressEncodeError {
    #[error("base58check encode error")]
    Base58,

    #[error("bech32 hrp or payload mismatch")]
    Segwit,

    #[error(transparent)]
    Bech32(#[from] bech32::Error),
}
