// Copyright 2024. The Tari Project
//
// Redistribution and use in source and binary forms, with or without modification, are permitted provided that the
// following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following
// disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the
// following disclaimer in the documentation and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors may be used to endorse or promote
// products derived from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES,
// INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
// WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE
// USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! This is a memory-based blockchain database, generally only useful for testing purposes and for embedding the
//! service in applications that do not persist chain state.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::*;

use crate::{
    blocks::{Block, BlockHeader, HistoricalBlock},
    chain_storage::{BlockchainBackend, ChainMetadata, ChainStorageError},
    transactions::{TransactionKernel, TransactionOutput},
    types::{BlockHash, Commitment, HashOutput, Signature},
};

const LOG_TARGET: &str = "c::cs::memory_db";

#[derive(Debug, Clone, Copy)]
struct OutputLocation {
    hash: HashOutput,
    mined_height: u64,
}

#[derive(Default)]
struct InnerDatabase {
    pruning_horizon: u64,
    /// The main chain, indexed by height
    blocks: Vec<Block>,
    block_heights: HashMap<BlockHash, u64>,
    kernels: HashMap<HashOutput, TransactionKernel>,
    kernel_sigs: HashMap<Signature, u64>,
    utxos: HashMap<HashOutput, TransactionOutput>,
    stxos: HashMap<HashOutput, TransactionOutput>,
    utxo_commitments: HashMap<Commitment, OutputLocation>,
    /// Height of the block each spent commitment was spent in
    stxo_commitments: HashMap<Commitment, u64>,
}

impl InnerDatabase {
    fn tip_height(&self) -> u64 {
        self.blocks.len().saturating_sub(1) as u64
    }

    fn historical_block(&self, height: u64) -> Option<HistoricalBlock> {
        let block = self.blocks.get(height as usize)?;
        let confirmations = self.tip_height() - height + 1;
        Some(HistoricalBlock::new(
            block.clone(),
            confirmations,
            accumulated_difficulty_at(height),
        ))
    }

    fn insert_block(&mut self, block: Block, spend_inputs: bool) {
        let height = block.header.height;
        for kernel in &block.body.kernels {
            self.kernel_sigs.insert(kernel.excess_sig, height);
            self.kernels.insert(kernel.hash(), kernel.clone());
        }
        if spend_inputs {
            for input in &block.body.inputs {
                if let Some(location) = self.utxo_commitments.remove(input) {
                    if let Some(output) = self.utxos.remove(&location.hash) {
                        self.stxos.insert(location.hash, output);
                    }
                    self.stxo_commitments.insert(*input, height);
                }
            }
        }
        for output in &block.body.outputs {
            let hash = output.hash();
            self.utxo_commitments.insert(output.commitment, OutputLocation {
                hash,
                mined_height: height,
            });
            self.utxos.insert(hash, output.clone());
        }
        self.block_heights.insert(block.hash(), height);
        self.blocks.push(block);
    }
}

/// Every block counts for one unit of work in the memory database.
fn accumulated_difficulty_at(height: u64) -> u128 {
    u128::from(height) + 1
}

/// A memory-backed blockchain database. The data is stored in RAM; and so all data will be lost when the program
/// terminates. A single lock protects the entire database.
#[derive(Clone)]
pub struct MemoryDatabase {
    db: Arc<RwLock<InnerDatabase>>,
}

impl MemoryDatabase {
    /// Creates a new archival database containing only the given genesis block. The inputs of the genesis block are
    /// ignored.
    pub fn new(genesis: Block) -> Self {
        let mut inner = InnerDatabase::default();
        inner.insert_block(genesis, false);
        Self {
            db: Arc::new(RwLock::new(inner)),
        }
    }

    pub fn with_pruning_horizon(self, pruning_horizon: u64) -> Self {
        if let Ok(mut db) = self.db.write() {
            db.pruning_horizon = pruning_horizon;
        }
        self
    }

    /// Appends a block to the tip of the chain. The block must build on the current tip and may only spend outputs
    /// that are in the UTXO set.
    pub fn add_block(&self, block: Block) -> Result<(), ChainStorageError> {
        let mut db = self.db_write_access()?;
        let tip = db
            .blocks
            .last()
            .ok_or_else(|| ChainStorageError::CorruptedDatabase("The chain has no genesis block".to_string()))?;
        if block.header.height != tip.header.height + 1 {
            return Err(ChainStorageError::InvalidBlock(format!(
                "Block height {} does not follow the tip height {}",
                block.header.height, tip.header.height
            )));
        }
        if block.header.prev_hash != tip.hash() {
            return Err(ChainStorageError::InvalidBlock(format!(
                "Block {} does not build on the tip {}",
                block.hash(),
                tip.hash()
            )));
        }
        if block.body.inputs.iter().any(|input| !db.utxo_commitments.contains_key(input)) {
            return Err(ChainStorageError::UnspendableInput);
        }
        debug!(
            target: LOG_TARGET,
            "Adding block #{} ({}) to the memory database",
            block.header.height,
            block.hash()
        );
        db.insert_block(block, true);
        Ok(())
    }

    fn db_read_access(&self) -> Result<RwLockReadGuard<'_, InnerDatabase>, ChainStorageError> {
        self.db.read().map_err(|e| {
            error!(target: LOG_TARGET, "An attempt to get a read lock on the memory database failed: {}", e);
            ChainStorageError::AccessError(e.to_string())
        })
    }

    fn db_write_access(&self) -> Result<RwLockWriteGuard<'_, InnerDatabase>, ChainStorageError> {
        self.db.write().map_err(|e| {
            error!(target: LOG_TARGET, "An attempt to get a write lock on the memory database failed: {}", e);
            ChainStorageError::AccessError(e.to_string())
        })
    }
}

impl BlockchainBackend for MemoryDatabase {
    fn fetch_chain_metadata(&self) -> Result<ChainMetadata, ChainStorageError> {
        let db = self.db_read_access()?;
        let tip = db
            .blocks
            .last()
            .ok_or_else(|| ChainStorageError::CorruptedDatabase("The chain has no genesis block".to_string()))?;
        let tip_height = tip.header.height;
        let pruned_height = match db.pruning_horizon {
            0 => 0,
            horizon => tip_height.saturating_sub(horizon),
        };
        Ok(ChainMetadata::new(
            tip_height,
            tip.hash(),
            db.pruning_horizon,
            pruned_height,
            accumulated_difficulty_at(tip_height),
        ))
    }

    fn fetch_header(&self, height: u64) -> Result<Option<BlockHeader>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db.blocks.get(height as usize).map(|b| b.header.clone()))
    }

    fn fetch_header_by_hash(&self, hash: &HashOutput) -> Result<Option<BlockHeader>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db
            .block_heights
            .get(hash)
            .and_then(|height| db.blocks.get(*height as usize))
            .map(|b| b.header.clone()))
    }

    fn fetch_kernel(&self, hash: &HashOutput) -> Result<Option<TransactionKernel>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db.kernels.get(hash).cloned())
    }

    fn fetch_utxo(&self, hash: &HashOutput) -> Result<Option<TransactionOutput>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db.utxos.get(hash).cloned())
    }

    fn fetch_txo(&self, hash: &HashOutput) -> Result<Option<TransactionOutput>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db.utxos.get(hash).or_else(|| db.stxos.get(hash)).cloned())
    }

    fn fetch_block(&self, height: u64) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db.historical_block(height))
    }

    fn fetch_block_by_hash(&self, hash: &HashOutput) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db.block_heights.get(hash).and_then(|height| db.historical_block(*height)))
    }

    fn fetch_block_with_kernel(&self, excess_sig: &Signature) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db
            .kernel_sigs
            .get(excess_sig)
            .and_then(|height| db.historical_block(*height)))
    }

    fn fetch_block_with_stxo(&self, commitment: &Commitment) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db
            .stxo_commitments
            .get(commitment)
            .and_then(|height| db.historical_block(*height)))
    }

    fn fetch_block_with_utxo(&self, commitment: &Commitment) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        let db = self.db_read_access()?;
        Ok(db
            .utxo_commitments
            .get(commitment)
            .and_then(|location| db.historical_block(location.mined_height)))
    }
}
