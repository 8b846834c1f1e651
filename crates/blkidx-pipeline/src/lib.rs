//! `IndexerPipeline`: file-level worker pool, per-worker batching, progress
//! counter, sink dispatch.
//!
//! Grounded on the Python reference's `core/indexer.py` `index.index_blocks`
//! (`ThreadPoolExecutor`, per-worker `blocks` batch buffer flushed at `CHUNK_SIZE`,
//! a `threading.Event` + lock-guarded counter feeding a progress bar, bounded
//! `join(timeout=2)` teardown) — no Rust source in the pack attempts this shape,
//! since the rest of this workspace's crates are libraries, not indexing services.

use blkidx_core::{BlockFileReader, BlockRecord, Coin};
use blkidx_node::{BlockchainInfo, NodeInfo, NodeInfoError};
use blkidx_storage::{StorageError, StorageSink, TxRecordWithMeta};
use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Tunables read from configuration into a single immutable struct.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub batch_size: usize,
    pub max_workers: usize,
    pub use_chunks: bool,
    pub store_blocks: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            batch_size: 1000,
            max_workers: 100,
            use_chunks: false,
            store_blocks: false,
        }
    }
}

/// Fatal only at two points: the bootstrap height query, and an unreadable
/// block-file directory. Everything else (a malformed frame, a sink error) stays
/// local to one file and is merely logged (`run` still returns `Ok`).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not determine block height range: {0}")]
    NodeInfo(#[from] NodeInfoError),

    #[error("could not read block-file directory {path}: {source}")]
    BlockDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary returned after a run completes, useful for the CLI's closing log line and
/// for tests asserting on pipeline behaviour without a real `StorageSink`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub expected_blocks: u32,
    pub processed_blocks: u64,
    pub missing_heights: Vec<u32>,
}

pub struct IndexerPipeline {
    coin: Coin,
    blocks_dir: PathBuf,
    sink: Arc<dyn StorageSink>,
    node: Arc<dyn NodeInfo>,
    config: PipelineConfig,
}

impl IndexerPipeline {
    pub fn new(
        coin: Coin,
        blocks_dir: PathBuf,
        sink: Arc<dyn StorageSink>,
        node: Arc<dyn NodeInfo>,
        config: PipelineConfig,
    ) -> Self {
        IndexerPipeline {
            coin,
            blocks_dir,
            sink,
            node,
            config,
        }
    }

    /// Runs the pipeline to completion: bootstrap height query, file discovery,
    /// bounded-worker decode-and-store, progress teardown, gap report.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let info = self.node.blockchain_info(self.coin).await?;
        let expected_blocks = expected_block_count(info);

        let files = discover_block_files(&self.blocks_dir)?;
        tracing::info!(coin = %self.coin, files = files.len(), expected_blocks, "starting index run");

        let processed_counter = Arc::new(AtomicU64::new(0));
        let stop_flag = Arc::new(AtomicBool::new(false));

        let progress = spawn_progress_observer(
            expected_blocks,
            Arc::clone(&processed_counter),
            Arc::clone(&stop_flag),
        );

        let queue = Arc::new(Mutex::new(files.into_iter().collect::<VecDeque<_>>()));
        let worker_count = self.config.max_workers.max(1);

        std::thread::scope(|scope| {
            for _ in 0..worker_count {
                let queue = Arc::clone(&queue);
                let counter = Arc::clone(&processed_counter);
                let sink = Arc::clone(&self.sink);
                let coin = self.coin;
                let config = self.config;
                scope.spawn(move || worker_loop(queue, counter, sink, coin, config));
            }
        });

        stop_flag.store(true, Ordering::SeqCst);
        let _ = progress.join();

        let processed_blocks = processed_counter.load(Ordering::SeqCst);

        let missing_heights = if self.config.store_blocks {
            match self.sink.indexed_heights(info.prune_height, info.blocks).await {
                Ok(present) => missing_from_range(info.prune_height, info.blocks, &present),
                Err(e) => {
                    tracing::warn!(error = %e, "could not verify indexed heights");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        if !missing_heights.is_empty() {
            tracing::warn!(count = missing_heights.len(), "gap report: some heights were not indexed");
        }

        tracing::info!(coin = %self.coin, processed_blocks, "index run complete");

        Ok(RunSummary {
            expected_blocks,
            processed_blocks,
            missing_heights,
        })
    }
}

/// `max(1, tip - prune + 1)` unconditionally, which reduces to `tip + 1` for the
/// common unpruned case (`prune_height == 0`).
fn expected_block_count(info: BlockchainInfo) -> u32 {
    (info.blocks.saturating_sub(info.prune_height) + 1).max(1)
}

fn missing_from_range(lo: u32, hi: u32, present: &[u32]) -> Vec<u32> {
    let present: std::collections::HashSet<u32> = present.iter().copied().collect();
    (lo..=hi).filter(|h| !present.contains(h)).collect()
}

fn discover_block_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| PipelineError::BlockDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("blk") && n.ends_with(".dat"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn worker_loop(
    queue: Arc<Mutex<VecDeque<PathBuf>>>,
    counter: Arc<AtomicU64>,
    sink: Arc<dyn StorageSink>,
    coin: Coin,
    config: PipelineConfig,
) {
    // Each worker thread drives its own small single-threaded async runtime, called
    // into synchronously per storage operation — the closest Rust analogue to the
    // original's per-call `asyncio.run(...)` from a synchronous parse loop.
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "worker could not start its async runtime");
            return;
        }
    };

    loop {
        let path = {
            let mut queue = queue.lock().unwrap();
            queue.pop_front()
        };
        let Some(path) = path else { break };

        if let Err(e) = process_file(&path, coin, &config, &sink, &counter, &runtime) {
            tracing::error!(file = %path.display(), error = %e, "error processing block file");
        }
    }
}

fn process_file(
    path: &Path,
    coin: Coin,
    config: &PipelineConfig,
    sink: &Arc<dyn StorageSink>,
    counter: &Arc<AtomicU64>,
    runtime: &tokio::runtime::Runtime,
) -> std::io::Result<()> {
    let file = File::open(path)?;
    let mut reader = BlockFileReader::new(file, coin);

    let mut block_batch: Vec<BlockRecord> = Vec::new();
    let mut tx_batch: Vec<TxRecordWithMeta> = Vec::new();

    loop {
        let frame = match reader.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            // A malformed frame terminates this file without being logged as an
            // error: bad magic and truncation are expected tails of a file the node
            // may still be writing, and never propagate past this worker.
            Err(_) => break,
        };

        let record = match blkidx_core::decode_block(&frame, coin, None) {
            Ok(record) => record,
            Err(_) => continue,
        };

        let txs_with_meta = record.tx.iter().map(|tx| TxRecordWithMeta {
            txid: tx.txid.clone(),
            block_hash: record.hash.clone(),
            block_height: record.height,
            timestamp: record.timestamp,
            vin: tx.vin.clone(),
            vout: tx.vout.clone(),
        });

        if config.use_chunks {
            block_batch.push(record);
            tx_batch.extend(txs_with_meta);
            if block_batch.len() >= config.batch_size {
                flush_batch(sink, config, &mut block_batch, &mut tx_batch, runtime);
            }
        } else {
            tx_batch.extend(txs_with_meta);
            if config.store_blocks {
                runtime.block_on(store_one(sink, &record));
            }
            runtime.block_on(store_tx_batch(sink, &tx_batch));
            tx_batch.clear();
        }

        counter.fetch_add(1, Ordering::SeqCst);
    }

    if config.use_chunks && !block_batch.is_empty() {
        flush_batch(sink, config, &mut block_batch, &mut tx_batch, runtime);
    }

    Ok(())
}

fn flush_batch(
    sink: &Arc<dyn StorageSink>,
    config: &PipelineConfig,
    block_batch: &mut Vec<BlockRecord>,
    tx_batch: &mut Vec<TxRecordWithMeta>,
    runtime: &tokio::runtime::Runtime,
) {
    if config.store_blocks {
        runtime.block_on(store_blocks_batch(sink, block_batch));
    }
    runtime.block_on(store_tx_batch(sink, tx_batch));
    block_batch.clear();
    tx_batch.clear();
}

async fn store_one(sink: &Arc<dyn StorageSink>, record: &BlockRecord) {
    if let Err(e) = sink.store_block(record).await {
        log_storage_error(e);
    }
}

async fn store_blocks_batch(sink: &Arc<dyn StorageSink>, batch: &[BlockRecord]) {
    if let Err(e) = sink.store_blocks_batch(batch).await {
        log_storage_error(e);
    }
}

async fn store_tx_batch(sink: &Arc<dyn StorageSink>, batch: &[TxRecordWithMeta]) {
    if batch.is_empty() {
        return;
    }
    if let Err(e) = sink.store_tx_batch(batch).await {
        log_storage_error(e);
    }
}

/// Storage failures are logged and the batch dropped; the pipeline never retries.
fn log_storage_error(e: StorageError) {
    tracing::warn!(error = %e, "storage batch dropped");
}

fn spawn_progress_observer(
    expected: u32,
    counter: Arc<AtomicU64>,
    stop_flag: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let bar = indicatif::ProgressBar::new(expected as u64);
        bar.set_style(
            indicatif::ProgressStyle::with_template("{bar:40} {pos}/{len} blocks ({eta})")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar()),
        );
        while !stop_flag.load(Ordering::SeqCst) {
            bar.set_position(counter.load(Ordering::SeqCst));
            std::thread::sleep(Duration::from_millis(100));
        }
        bar.set_position(counter.load(Ordering::SeqCst));
        bar.finish();
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use async_trait::async_trait;
    use blkidx_storage::InMemorySink;
    use std::io::Write;

    struct FixedNodeInfo(BlockchainInfo);

    #[async_trait]
    impl NodeInfo for FixedNodeInfo {
        async fn blockchain_info(&self, _coin: Coin) -> Result<BlockchainInfo, NodeInfoError> {
            Ok(self.0)
        }
    }

    fn write_frame(file: &mut File, coin: Coin, payload: &[u8]) {
        file.write_all(&coin.magic()).unwrap();
        file.write_all(&(payload.len() as u32).to_le_bytes()).unwrap();
        file.write_all(payload).unwrap();
    }

    #[test]
    fn expected_block_count_reduces_to_tip_plus_one_when_unpruned() {
        let info = BlockchainInfo {
            blocks: 99,
            prune_height: 0,
        };
        assert_eq!(expected_block_count(info), 100);
    }

    #[test]
    fn expected_block_count_is_at_least_one() {
        let info = BlockchainInfo {
            blocks: 0,
            prune_height: 0,
        };
        assert_eq!(expected_block_count(info), 1);
    }

    #[tokio::test]
    async fn discovers_and_indexes_blk_files_in_lexical_order() {
        let dir = tempfile::tempdir().unwrap();

        // The real Bitcoin mainnet genesis block body (header + one coinbase tx),
        // unframed — `write_frame` below adds the magic/size prefix itself.
        #[rustfmt::skip]
        let genesis_payload: [u8; 285] = [
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x3b, 0xa3, 0xed, 0xfd, 0x7a, 0x7b, 0x12, 0xb2, 0x7a, 0xc7, 0x2c, 0x3e,
            0x67, 0x76, 0x8f, 0x61, 0x7f, 0xc8, 0x1b, 0xc3, 0x88, 0x8a, 0x51, 0x32, 0x3a, 0x9f, 0xb8, 0xaa,
            0x4b, 0x1e, 0x5e, 0x4a, 0x29, 0xab, 0x5f, 0x49, 0xff, 0xff, 0x00, 0x1d, 0x1d, 0xac, 0x2b, 0x7c,
            0x01, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x4d, 0x04, 0xff, 0xff, 0x00, 0x1d,
            0x01, 0x04, 0x45, 0x54, 0x68, 0x65, 0x20, 0x54, 0x69, 0x6d, 0x65, 0x73, 0x20, 0x30, 0x33, 0x2f,
            0x4a, 0x61, 0x6e, 0x2f, 0x32, 0x30, 0x30, 0x39, 0x20, 0x43, 0x68, 0x61, 0x6e, 0x63, 0x65, 0x6c,
            0x6c, 0x6f, 0x72, 0x20, 0x6f, 0x6e, 0x20, 0x62, 0x72, 0x69, 0x6e, 0x6b, 0x20, 0x6f, 0x66, 0x20,
            0x73, 0x65, 0x63, 0x6f, 0x6e, 0x64, 0x20, 0x62, 0x61, 0x69, 0x6c, 0x6f, 0x75, 0x74, 0x20, 0x66,
            0x6f, 0x72, 0x20, 0x62, 0x61, 0x6e, 0x6b, 0x73, 0xff, 0xff, 0xff, 0xff, 0x01, 0x00, 0xf2, 0x05,
            0x2a, 0x01, 0x00, 0x00, 0x00, 0x43, 0x41, 0x04, 0x67, 0x8a, 0xfd, 0xb0, 0xfe, 0x55, 0x48, 0x27,
            0x19, 0x67, 0xf1, 0xa6, 0x71, 0x30, 0xb7, 0x10, 0x5c, 0xd6, 0xa8, 0x28, 0xe0, 0x39, 0x09, 0xa6,
            0x79, 0x62, 0xe0, 0xea, 0x1f, 0x61, 0xde, 0xb6, 0x49, 0xf6, 0xbc, 0x3f, 0x4c, 0xef, 0x38, 0xc4,
            0xf3, 0x55, 0x04, 0xe5, 0x1e, 0xc1, 0x12, 0xde, 0x5c, 0x38, 0x4d, 0xf7, 0xba, 0x0b, 0x8d, 0x57,
            0x8a, 0x4c, 0x70, 0x2b, 0x6b, 0xf1, 0x1d, 0x5f, 0xac, 0x00, 0x00, 0x00, 0x00,
        ];

        let mut f0 = File::create(dir.path().join("blk00000.dat")).unwrap();
        write_frame(&mut f0, Coin::Bitcoin, &genesis_payload);
        drop(f0);

        let sink = Arc::new(InMemorySink::new());
        let node = Arc::new(FixedNodeInfo(BlockchainInfo {
            blocks: 0,
            prune_height: 0,
        }));

        let pipeline = IndexerPipeline::new(
            Coin::Bitcoin,
            dir.path().to_path_buf(),
            sink.clone(),
            node,
            PipelineConfig {
                batch_size: 10,
                max_workers: 2,
                use_chunks: false,
                store_blocks: true,
            },
        );

        let summary = pipeline.run().await.unwrap();
        assert_eq!(summary.processed_blocks, 1);
        assert_eq!(sink.block_count(), 1);
        assert_eq!(sink.tx_count(), 1);
    }
}
