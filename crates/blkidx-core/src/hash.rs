//! Double-SHA256 ("Hash256"), the hash used for block and transaction identifiers.

use sha2::{Digest as Sha2Digest, Sha256};
use std::io::{Result as IoResult, Write};

/// A `Write` sink that accumulates a double-SHA256 digest, mirroring `Hash256Writer`:
/// one `Sha256` pass while bytes are written, a second pass over the first digest on
/// `finish`.
#[derive(Default)]
pub struct Hash256Writer {
    internal: Sha256,
}

impl Write for Hash256Writer {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.internal.write(buf)
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

impl Hash256Writer {
    /// Consumes the writer and returns the 32-byte digest in on-wire byte order.
    pub fn finish(self) -> [u8; 32] {
        let first = self.internal.finalize();
        let second = Sha256::digest(first);
        let mut out = [0u8; 32];
        out.copy_from_slice(&second);
        out
    }
}

/// Double-SHA256 of `data`, in on-wire byte order.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    let mut w = Hash256Writer::default();
    w.write_all(data).expect("writing to an in-memory hasher never fails");
    w.finish()
}

/// SHA256 followed by RIPEMD160, used to derive a P2PKH-style hash from a raw public
/// key. Output scripts already carry the hash elsewhere in this pack, so this is new
/// code grounded directly on the `sha2`/`ripemd` crates already in the workspace
/// dependency table.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    use ripemd::Ripemd160;
    let sha = Sha256::digest(data);
    let rmd = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&rmd);
    out
}

/// Renders a 32-byte hash the way block/tx identifiers are conventionally displayed:
/// byte-reversed, lowercase hex.
pub fn reversed_hex(hash: &[u8; 32]) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}
