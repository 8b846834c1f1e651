//! CLI-subprocess-backed `NodeInfo`, ported from the Python reference's
//! `core/node/cli.py`: shells out to the coin's `bitcoin-cli`/`litecoin-cli` binary
//! and parses its JSON stdout. No Rust source in the pack does this — the RPC client
//! in this crate talks HTTP, never a subprocess — so this is grounded on the Python
//! original's `_run_cli`/`get_blockchain_info`.

use crate::{BlockchainInfo, NodeInfo, NodeInfoError};
use async_trait::async_trait;
use blkidx_core::Coin;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::process::Command;

#[derive(Deserialize)]
struct GetBlockchainInfoResult {
    blocks: u32,
    #[serde(default)]
    pruned: bool,
    #[serde(default)]
    pruneheight: u32,
}

/// Queries each configured coin's node by invoking its CLI binary as a subprocess.
pub struct CliNodeInfo {
    cli_paths: HashMap<Coin, String>,
}

impl CliNodeInfo {
    pub fn new(cli_paths: HashMap<Coin, String>) -> Self {
        CliNodeInfo { cli_paths }
    }

    async fn run(&self, coin: Coin, args: &[&str]) -> Result<String, NodeInfoError> {
        let path = self
            .cli_paths
            .get(&coin)
            .ok_or_else(|| NodeInfoError::CliFailure(format!("no CLI path configured for {coin}")))?;

        let output = Command::new(path).args(args).output().await?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(NodeInfoError::CliFailure(message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl NodeInfo for CliNodeInfo {
    async fn blockchain_info(&self, coin: Coin) -> Result<BlockchainInfo, NodeInfoError> {
        let stdout = self.run(coin, &["getblockchaininfo"]).await?;
        let result: GetBlockchainInfoResult = serde_json::from_str(&stdout)?;
        Ok(BlockchainInfo {
            blocks: result.blocks,
            prune_height: if result.pruned { result.pruneheight } else { 0 },
        })
    }
}
