//! CLI entry point: parses the coin argument, wires configuration, logging, the
//! node/storage adapters and the pipeline together, and returns a process exit code.

mod config;
mod logging;

use anyhow::Context;
use blkidx_core::Coin;
use blkidx_node::cli::CliNodeInfo;
use blkidx_node::rpc::{RpcCredentials, RpcNodeInfo};
use blkidx_node::NodeInfo;
use blkidx_pipeline::{IndexerPipeline, PipelineConfig};
use blkidx_storage::{NullSink, StorageSink};
use clap::Parser;
use config::Config;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "blkidx")]
#[command(about = "Indexes Bitcoin-family block files into a storage sink", version)]
struct Cli {
    /// Chain to index.
    #[arg(value_enum)]
    coin: CoinArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CoinArg {
    Bitcoin,
    Litecoin,
}

impl From<CoinArg> for Coin {
    fn from(value: CoinArg) -> Self {
        match value {
            CoinArg::Bitcoin => Coin::Bitcoin,
            CoinArg::Litecoin => Coin::Litecoin,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let coin: Coin = cli.coin.into();

    let config = Config::load(coin).context("loading configuration")?;

    let runtime = tokio::runtime::Runtime::new().context("starting the async runtime")?;
    runtime.block_on(run(coin, config))
}

async fn run(coin: Coin, config: Config) -> anyhow::Result<()> {
    let node: Arc<dyn NodeInfo> = if config.use_rpc {
        let rpc_config = config.rpc.as_ref().expect("use_rpc implies rpc config is present");
        let mut credentials = HashMap::new();
        credentials.insert(
            coin,
            RpcCredentials {
                host: rpc_config.host.clone(),
                port: rpc_config.port,
                user: rpc_config.user.clone(),
                password: rpc_config.password.clone(),
            },
        );
        Arc::new(RpcNodeInfo::new(credentials, config.rpc_timeout))
    } else {
        let cli_path = config
            .cli_path
            .clone()
            .expect("use_rpc false implies cli_path is present");
        let mut paths = HashMap::new();
        paths.insert(coin, cli_path);
        Arc::new(CliNodeInfo::new(paths))
    };

    // A production MongoDB-backed sink is an external collaborator implementing
    // `StorageSink`; this composition root ships only the reference sinks.
    let sink: Arc<dyn StorageSink> = Arc::new(NullSink);

    let pipeline_config = PipelineConfig {
        batch_size: config.chunk_size,
        max_workers: config.max_workers,
        use_chunks: config.use_chunks,
        store_blocks: config.store_blocks,
    };

    let pipeline = IndexerPipeline::new(coin, config.blocks_path.clone(), sink, node, pipeline_config);

    let summary = pipeline.run().await.context("running the index pipeline")?;
    tracing::info!(
        coin = %coin,
        expected = summary.expected_blocks,
        processed = summary.processed_blocks,
        missing = summary.missing_heights.len(),
        "indexing finished"
    );

    Ok(())
}
