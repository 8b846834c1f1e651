//! JSON-RPC-backed `NodeInfo`, grounded on `provider/src/rpc/{http,common}.rs`: the
//! same request-envelope shape (`id`/`jsonrpc`/`method`/`params`), the same tagged
//! success-or-error response enum, and the same `secrecy`-wrapped Basic Auth
//! credentials — generalized from a Bitcoin-signing RPC surface down to the one
//! read-only call this indexer needs.

use crate::{BlockchainInfo, NodeInfo, NodeInfoError};
use async_trait::async_trait;
use blkidx_core::Coin;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RpcCredentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
}

/// Queries each configured coin's node over HTTP JSON-RPC. One client serves every
/// coin it has credentials for; coins without an entry in `credentials` report
/// `NodeInfoError::RpcError`.
pub struct RpcNodeInfo {
    client: reqwest::Client,
    credentials: HashMap<Coin, RpcCredentials>,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct Request<'a> {
    id: u64,
    jsonrpc: &'a str,
    method: &'a str,
    params: Vec<Value>,
}

#[derive(Deserialize)]
struct Response<T> {
    #[serde(flatten)]
    data: ResponseData<T>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseData<T> {
    Error { error: RpcError },
    Success { result: T },
}

#[derive(Deserialize, Debug)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct GetBlockchainInfoResult {
    blocks: u32,
    #[serde(default)]
    pruned: bool,
    #[serde(default)]
    pruneheight: u32,
}

impl RpcNodeInfo {
    pub fn new(credentials: HashMap<Coin, RpcCredentials>, timeout: Duration) -> Self {
        RpcNodeInfo {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            credentials,
            next_id: AtomicU64::new(0),
        }
    }

    fn url(&self, creds: &RpcCredentials) -> String {
        format!("http://{}:{}", creds.host, creds.port)
    }

    async fn call<R: for<'a> Deserialize<'a>>(
        &self,
        coin: Coin,
        method: &str,
        params: Vec<Value>,
    ) -> Result<R, NodeInfoError> {
        let creds = self
            .credentials
            .get(&coin)
            .ok_or_else(|| NodeInfoError::RpcError(format!("no RPC credentials configured for {coin}")))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let payload = Request {
            id,
            jsonrpc: "2.0",
            method,
            params,
        };

        let body = self
            .client
            .post(self.url(creds))
            .basic_auth(&creds.user, Some(creds.password.expose_secret()))
            .json(&payload)
            .send()
            .await?
            .text()
            .await?;

        let response: Response<R> = serde_json::from_str(&body)?;
        match response.data {
            ResponseData::Success { result } => Ok(result),
            ResponseData::Error { error } => Err(NodeInfoError::RpcError(format!(
                "({}) {}",
                error.code, error.message
            ))),
        }
    }
}

#[async_trait]
impl NodeInfo for RpcNodeInfo {
    async fn blockchain_info(&self, coin: Coin) -> Result<BlockchainInfo, NodeInfoError> {
        let result: GetBlockchainInfoResult =
            self.call(coin, "getblockchaininfo", Vec::new()).await?;
        Ok(BlockchainInfo {
            blocks: result.blocks,
            prune_height: if result.pruned { result.pruneheight } else { 0 },
        })
    }
}
