//! Base58Check and Bech32 address encoding, parameterized over per-coin version bytes.
//!
//! Grounded on `enc::bases` (`encode_base58`/`decode_base58` via the `base58check`
//! crate, `encode_bech32`/`decode_bech32` via the `bech32` crate) and its
//! `NetworkParams`/`BitcoinEncoder<P>` parameterization in `enc::encoder`. Here,
//! segwit addresses are built from witness version + program directly (BIP-173),
//! rather than bech32-encoding the raw script bytes — see the bech32 decision in
//! DESIGN.md.

use crate::error::AddressEncodeError;
use base58check::{FromBase58Check, ToBase58Check};
use bech32::{u5, FromBase32, ToBase32, Variant};

/// Per-coin address-encoding parameters. Bitcoin and Litecoin differ only in these
/// constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    pub hrp: &'static str,
    pub pkh_version: u8,
    pub sh_version: u8,
}

pub const BITCOIN_MAINNET: NetworkParams = NetworkParams {
    hrp: "bc",
    pkh_version: 0x00,
    sh_version: 0x05,
};

pub const LITECOIN_MAINNET: NetworkParams = NetworkParams {
    hrp: "ltc",
    pkh_version: 0x30,
    sh_version: 0x32,
};

/// Base58Check-encodes `hash` with the given version byte.
pub fn encode_base58(version: u8, hash: &[u8]) -> String {
    hash.to_base58check(version)
}

/// Decodes a Base58Check string, checking the version byte matches `expected_version`.
pub fn decode_base58(expected_version: u8, s: &str) -> Result<Vec<u8>, AddressEncodeError> {
    let (version, data) = s
        .from_base58check()
        .map_err(|_| AddressEncodeError::Base58)?;
    if version != expected_version {
        return Err(AddressEncodeError::Base58);
    }
    Ok(data)
}

/// Bech32-encodes a segwit witness program (BIP-173): witness version as the leading
/// 5-bit group, followed by the base32 conversion of the program bytes.
pub fn encode_segwit(hrp: &str, witver: u8, program: &[u8]) -> Result<String, AddressEncodeError> {
    let mut data = vec![u5::try_from_u8(witver).map_err(AddressEncodeError::Bech32)?];
    data.extend(program.to_base32());
    Ok(bech32::encode(hrp, data, Variant::Bech32).map_err(AddressEncodeError::Bech32)?)
}

/// Decodes a segwit bech32 address, returning `(witness_version, program)`.
pub fn decode_segwit(expected_hrp: &str, s: &str) -> Result<(u8, Vec<u8>), AddressEncodeError> {
    let (hrp, data, _variant) = bech32::decode(s).map_err(AddressEncodeError::Bech32)?;
    if hrp != expected_hrp {
        return Err(AddressEncodeError::Segwit);
    }
    let (witver, program) = data.split_first().ok_or(AddressEncodeError::Segwit)?;
    let program = Vec::<u8>::from_base32(program).map_err(AddressEncodeError::Bech32)?;
    Ok((witver.to_u8(), program))
}
