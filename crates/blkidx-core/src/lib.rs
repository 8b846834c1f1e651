//! Binary decoder for Bitcoin-family `blk*.dat` block files: magic-framed reading,
//! header and segwit-aware transaction decoding, and script-to-address derivation.
//!
//! Grounded on the source repo's crate-per-concern layout (`provider`, `bitcoin`,
//! `core`), generalised here into one crate since decode-only concerns don't need a
//! separate builder/signer/verifier split.

pub mod address;
pub mod block;
pub mod coin;
pub mod error;
pub mod hash;
pub mod header;
pub mod reader;
pub mod script;
pub mod tx;
pub mod varint;

#[cfg(test)]
mod test_fixtures;

pub use block::{decode_block, BlockRecord};
pub use coin::Coin;
pub use error::{AddressEncodeError, DecodeError};
pub use header::Header;
pub use reader::BlockFileReader;
pub use tx::{Tx, VIn, VOut};
