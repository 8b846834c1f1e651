//! Magic-framed reader over a `blk*.dat` file.
//!
//! Grounded on the synchronous `File`-backed readers in `provider/src/rpc/http.rs`'s
//! buffered-read style and, for the framing protocol
//! itself, the independent block-parser's `BlockchainRead::read_block` (see
//! `other_examples/97036e90_gcarq-rusty-blockparser__src-blockchain-parser-reader.rs.rs`):
//! four-byte magic, four-byte little-endian size, then the payload.

use crate::coin::Coin;
use crate::error::DecodeError;
use std::io::Read;

/// Iterates the magic-framed blocks inside one open `blk*.dat` file, yielding each
/// frame's payload as an owned byte buffer. A short read anywhere in the 8-byte frame
/// prefix is end-of-file, not an error: the node may still be appending to this file.
pub struct BlockFileReader<R> {
    inner: R,
    magic: [u8; 4],
    ended: bool,
}

impl<R: Read> BlockFileReader<R> {
    pub fn new(inner: R, coin: Coin) -> Self {
        BlockFileReader {
            inner,
            magic: coin.magic(),
            ended: false,
        }
    }

    /// Reads the next frame's payload, or `None` on clean end-of-file (no more bytes,
    /// or fewer than 4 bytes of magic remain — both are normal tails of a file the
    /// node may still be writing).
    ///
    /// A `DecodeError::InvalidMagic` or `DecodeError::TruncatedFrame` also ends
    /// iteration (subsequent calls return `None`): a malformed frame terminates this
    /// file, it does not propagate past the reader.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, DecodeError> {
        if self.ended {
            return Ok(None);
        }

        let mut magic = [0u8; 4];
        match read_fill(&mut self.inner, &mut magic)? {
            Fill::Empty => {
                self.ended = true;
                return Ok(None);
            }
            Fill::Partial => {
                self.ended = true;
                return Ok(None);
            }
            Fill::Full => {}
        }

        if magic != self.magic {
            self.ended = true;
            return Err(DecodeError::InvalidMagic {
                expected: self.magic,
                got: magic,
            });
        }

        let mut size_buf = [0u8; 4];
        match read_fill(&mut self.inner, &mut size_buf)? {
            Fill::Full => {}
            _ => {
                self.ended = true;
                return Ok(None);
            }
        }
        let size = u32::from_le_bytes(size_buf) as u64;

        let mut payload = vec![0u8; size as usize];
        let read = read_as_much_as_possible(&mut self.inner, &mut payload)?;
        if (read as u64) < size {
            self.ended = true;
            return Err(DecodeError::TruncatedFrame {
                wanted: size,
                available: read as u64,
            });
        }

        Ok(Some(payload))
    }
}

impl<R: Read> Iterator for BlockFileReader<R> {
    type Item = Result<Vec<u8>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_frame() {
            Ok(Some(payload)) => Some(Ok(payload)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

enum Fill {
    Full,
    Partial,
    Empty,
}

fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<Fill, DecodeError> {
    let read = read_as_much_as_possible(reader, buf)?;
    if read == 0 {
        Ok(Fill::Empty)
    } else if read < buf.len() {
        Ok(Fill::Partial)
    } else {
        Ok(Fill::Full)
    }
}

fn read_as_much_as_possible<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, DecodeError> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..])? {
            0 => break,
            n => total += n,
        }
    }
    Ok(total)
}
