use crate::address::{NetworkParams, BITCOIN_MAINNET, LITECOIN_MAINNET};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The coins this crate knows how to decode. Adding a coin means adding a magic,
/// network params, and (if it differs) a BIP-34 activation height — nothing else in
/// the decoder is coin-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Bitcoin,
    Litecoin,
}

impl Coin {
    /// The four-byte magic that opens every frame in this coin's `blk*.dat` files.
    pub const fn magic(self) -> [u8; 4] {
        match self {
            Coin::Bitcoin => [0xF9, 0xBE, 0xB4, 0xD9],
            Coin::Litecoin => [0xFB, 0xC0, 0xB6, 0xDB],
        }
    }

    pub const fn network_params(self) -> NetworkParams {
        match self {
            Coin::Bitcoin => BITCOIN_MAINNET,
            Coin::Litecoin => LITECOIN_MAINNET,
        }
    }

    /// Height at which BIP-34 (mandatory coinbase height push) activated. The
    /// original indexer defines this map but never actually gates on it — it
    /// extracts the height unconditionally whenever the push is well-formed. We
    /// keep the constant for callers that want to cross-check, but `TxDecoder`
    /// does not consult it (see DESIGN.md open question).
    pub const fn bip34_activation_height(self) -> u32 {
        match self {
            Coin::Bitcoin => 227_835,
            Coin::Litecoin => 32_000,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coin::Bitcoin => write!(f, "bitcoin"),
            Coin::Litecoin => write!(f, "litecoin"),
        }
    }
}

impl std::str::FromStr for Coin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" => Ok(Coin::Bitcoin),
            "litecoin" => Ok(Coin::Litecoin),
            other => Err(format!("unrecognized coin: {other}")),
        }
    }
}
