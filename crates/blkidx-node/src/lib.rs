//! Read-only node-height queries (`NodeInfo`).
//!
//! Grounded on the `provider/src/rpc` module (JSON-RPC request/response envelope,
//! `reqwest`-backed transport, `secrecy`-wrapped credentials); the CLI-subprocess
//! backend has no counterpart there and is ported from the Python reference's
//! `core/node/cli.py`.

pub mod cli;
pub mod rpc;

use async_trait::async_trait;
use blkidx_core::Coin;
use thiserror::Error;

/// The height bounds returned by a single bootstrap query, used by the pipeline to
/// size its progress bar and reporting range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockchainInfo {
    pub blocks: u32,
    pub prune_height: u32,
}

/// Fatal at startup if the height range cannot be determined.
#[derive(Debug, Error)]
pub enum NodeInfoError {
    #[error("node RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node RPC returned an error response: {0}")]
    RpcError(String),

    #[error("node response could not be parsed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to launch node CLI subprocess: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("node CLI subprocess exited with an error: {0}")]
    CliFailure(String),
}

/// Read-only capability used once at pipeline start to learn the indexable height
/// range. A capability set, not a class hierarchy: the RPC and CLI-subprocess
/// implementations share nothing but this trait.
#[async_trait]
pub trait NodeInfo: Send + Sync {
    async fn blockchain_info(&self, coin: Coin) -> Result<BlockchainInfo, NodeInfoError>;
}
