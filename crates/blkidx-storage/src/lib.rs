//! `StorageSink`: the narrow write-only contract the pipeline depends on.
//!
//! Grounded on the Python reference's `database/base.py` `DatabaseInterface`
//! (abstract `store_block`/`store_blocks`/`get_indexed_block_heights`), expressed
//! here as an `async_trait` the way `provider`'s trait boundaries are expressed in
//! this pack, rather than as a class hierarchy. This crate ships the trait plus
//! two reference implementations sufficient to exercise and test the pipeline; a
//! production MongoDB-backed sink is an external collaborator implementing the same
//! trait.

use async_trait::async_trait;
use blkidx_core::BlockRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Mutex;
use thiserror::Error;

/// A `TxRecord` flattened alongside the owning block's metadata: the unit
/// `store_tx_batch` persists, since the transaction collection is denormalised from
/// the block collection.
#[derive(Debug, Clone, Serialize)]
pub struct TxRecordWithMeta {
    pub txid: String,
    pub block_hash: String,
    pub block_height: Option<u32>,
    pub timestamp: u32,
    pub vin: Vec<blkidx_core::VIn>,
    pub vout: Vec<blkidx_core::VOut>,
}

/// Logged at warning and the batch dropped; the pipeline continues.
#[derive(Debug, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

/// The pipeline's only dependency on a persistence layer. A capability set
/// (`store_block`, `store_blocks_batch`, `store_tx_batch`, `indexed_heights`), not a
/// class hierarchy.
#[async_trait]
pub trait StorageSink: Send + Sync {
    /// Fire-and-forget single-record write.
    async fn store_block(&self, record: &BlockRecord) -> Result<(), StorageError>;

    /// Unordered bulk write; partial failure is tolerated by the caller (the pipeline
    /// logs and drops the batch, it never retries).
    async fn store_blocks_batch(&self, records: &[BlockRecord]) -> Result<(), StorageError>;

    /// Unordered bulk write of denormalised transaction records.
    async fn store_tx_batch(&self, records: &[TxRecordWithMeta]) -> Result<(), StorageError>;

    /// Returns the subset of `[lo, hi]` present in storage, used for the pipeline's
    /// end-of-run gap report (informational only).
    async fn indexed_heights(&self, lo: u32, hi: u32) -> Result<Vec<u32>, StorageError>;
}

/// Discards everything. Used for `STORE_BLOCKS=false`-style dry runs where
/// transaction persistence still needs somewhere harmless to go.
#[derive(Debug, Default)]
pub struct NullSink;

#[async_trait]
impl StorageSink for NullSink {
    async fn store_block(&self, _record: &BlockRecord) -> Result<(), StorageError> {
        Ok(())
    }

    async fn store_blocks_batch(&self, _records: &[BlockRecord]) -> Result<(), StorageError> {
        Ok(())
    }

    async fn store_tx_batch(&self, _records: &[TxRecordWithMeta]) -> Result<(), StorageError> {
        Ok(())
    }

    async fn indexed_heights(&self, _lo: u32, _hi: u32) -> Result<Vec<u32>, StorageError> {
        Ok(Vec::new())
    }
}

/// Keeps records in a `Mutex`-guarded map; used by the pipeline's own test suite to
/// assert on what was actually persisted without a live database.
#[derive(Debug, Default)]
pub struct InMemorySink {
    heights: Mutex<HashSet<u32>>,
    block_count: Mutex<usize>,
    tx_count: Mutex<usize>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_count(&self) -> usize {
        *self.block_count.lock().unwrap()
    }

    pub fn tx_count(&self) -> usize {
        *self.tx_count.lock().unwrap()
    }
}

#[async_trait]
impl StorageSink for InMemorySink {
    async fn store_block(&self, record: &BlockRecord) -> Result<(), StorageError> {
        if let Some(height) = record.height {
            self.heights.lock().unwrap().insert(height);
        }
        *self.block_count.lock().unwrap() += 1;
        Ok(())
    }

    async fn store_blocks_batch(&self, records: &[BlockRecord]) -> Result<(), StorageError> {
        for record in records {
            self.store_block(record).await?;
        }
        Ok(())
    }

    async fn store_tx_batch(&self, records: &[TxRecordWithMeta]) -> Result<(), StorageError> {
        *self.tx_count.lock().unwrap() += records.len();
        Ok(())
    }

    async fn indexed_heights(&self, lo: u32, hi: u32) -> Result<Vec<u32>, StorageError> {
        let heights = self.heights.lock().unwrap();
        Ok((lo..=hi).filter(|h| heights.contains(h)).collect())
    }
}
