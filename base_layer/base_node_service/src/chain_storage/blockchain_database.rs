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

use std::sync::Arc;

use log::*;

use crate::{
    blocks::{BlockHeader, HistoricalBlock},
    chain_storage::{BlockchainBackend, ChainMetadata, ChainStorageError},
    transactions::{TransactionKernel, TransactionOutput},
    types::{Commitment, HashOutput, Signature},
};

const LOG_TARGET: &str = "c::cs::database";

/// Turns an `Option` returned by the backend into a `ValueNotFound` error for single record lookups.
macro_rules! found_or {
    ($result:expr, $entity:expr, $field:expr, $value:expr) => {
        $result?.ok_or_else(|| ChainStorageError::ValueNotFound {
            entity: $entity,
            field: $field,
            value: $value.to_string(),
        })
    };
}

/// A cloneable handle on the blockchain backend. Every query is synchronous and may block on the backend, which is
/// why the request handlers only call it through [async_db](crate::chain_storage::async_db).
pub struct BlockchainDatabase<T> {
    db: Arc<T>,
}

impl<T> BlockchainDatabase<T>
where T: BlockchainBackend
{
    /// Creates a new `BlockchainDatabase` using the provided backend.
    pub fn new(db: T) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn db(&self) -> &T {
        &self.db
    }

    /// Returns the metadata of the best chain
    pub fn get_metadata(&self) -> Result<ChainMetadata, ChainStorageError> {
        self.db.fetch_chain_metadata()
    }

    /// Returns the header at the tip of the best chain
    pub fn fetch_tip_header(&self) -> Result<BlockHeader, ChainStorageError> {
        let metadata = self.db.fetch_chain_metadata()?;
        let header = self.db.fetch_header(metadata.best_block_height())?.ok_or_else(|| {
            ChainStorageError::CorruptedDatabase(format!(
                "Tip header at height {} is missing",
                metadata.best_block_height()
            ))
        })?;
        Ok(header)
    }

    /// Returns the block header at the given block height.
    pub fn fetch_header(&self, height: u64) -> Result<BlockHeader, ChainStorageError> {
        found_or!(self.db.fetch_header(height), "BlockHeader", "height", height)
    }

    /// Returns the block header corresponding to the provided BlockHash
    pub fn fetch_header_by_hash(&self, hash: HashOutput) -> Result<BlockHeader, ChainStorageError> {
        found_or!(self.db.fetch_header_by_hash(&hash), "BlockHeader", "hash", hash)
    }

    /// Returns the transaction kernel with the given hash.
    pub fn fetch_kernel(&self, hash: HashOutput) -> Result<TransactionKernel, ChainStorageError> {
        found_or!(self.db.fetch_kernel(&hash), "TransactionKernel", "hash", hash)
    }

    /// Returns the UTXO with the given hash.
    pub fn fetch_utxo(&self, hash: HashOutput) -> Result<TransactionOutput, ChainStorageError> {
        found_or!(self.db.fetch_utxo(&hash), "TransactionOutput", "hash", hash)
    }

    /// Returns the spent or unspent output with the given hash.
    pub fn fetch_txo(&self, hash: HashOutput) -> Result<TransactionOutput, ChainStorageError> {
        found_or!(self.db.fetch_txo(&hash), "TransactionOutput", "hash", hash)
    }

    /// Returns the main chain block at the given height.
    pub fn fetch_block(&self, height: u64) -> Result<HistoricalBlock, ChainStorageError> {
        found_or!(self.db.fetch_block(height), "HistoricalBlock", "height", height)
    }

    pub fn fetch_block_by_hash(&self, hash: HashOutput) -> Result<HistoricalBlock, ChainStorageError> {
        found_or!(self.db.fetch_block_by_hash(&hash), "HistoricalBlock", "hash", hash)
    }

    pub fn fetch_block_with_kernel(&self, excess_sig: Signature) -> Result<HistoricalBlock, ChainStorageError> {
        found_or!(
            self.db.fetch_block_with_kernel(&excess_sig),
            "HistoricalBlock",
            "kernel excess_sig",
            excess_sig
        )
    }

    pub fn fetch_block_with_stxo(&self, commitment: Commitment) -> Result<HistoricalBlock, ChainStorageError> {
        found_or!(
            self.db.fetch_block_with_stxo(&commitment),
            "HistoricalBlock",
            "stxo commitment",
            commitment
        )
    }

    pub fn fetch_block_with_utxo(&self, commitment: Commitment) -> Result<HistoricalBlock, ChainStorageError> {
        found_or!(
            self.db.fetch_block_with_utxo(&commitment),
            "HistoricalBlock",
            "utxo commitment",
            commitment
        )
    }

    /// Returns the main chain headers following the first of `hashes` that is on the main chain. At most
    /// `max_headers` are returned and the result ends early with the header whose hash is `stopping_hash`. An empty
    /// result is returned if none of the hashes is known.
    pub fn fetch_headers_after(
        &self,
        hashes: Vec<HashOutput>,
        stopping_hash: HashOutput,
        max_headers: u64,
    ) -> Result<Vec<BlockHeader>, ChainStorageError> {
        let mut start_height = None;
        for hash in &hashes {
            if let Some(header) = self.db.fetch_header_by_hash(hash)? {
                let on_main_chain = self
                    .db
                    .fetch_header(header.height)?
                    .map(|h| h.hash() == *hash)
                    .unwrap_or(false);
                if on_main_chain {
                    start_height = Some(header.height + 1);
                    break;
                }
            }
        }

        let start_height = match start_height {
            Some(h) => h,
            None => {
                debug!(
                    target: LOG_TARGET,
                    "None of the {} hash(es) given for fetch_headers_after are on the main chain",
                    hashes.len()
                );
                return Ok(Vec::new());
            },
        };

        let tip_height = self.db.fetch_chain_metadata()?.best_block_height();
        let end_height = tip_height.min(start_height.saturating_add(max_headers).saturating_sub(1));
        let mut headers = Vec::new();
        for height in start_height..=end_height {
            match self.db.fetch_header(height)? {
                Some(header) => {
                    let is_stopping_header = header.hash() == stopping_hash;
                    headers.push(header);
                    if is_stopping_header {
                        break;
                    }
                },
                None => break,
            }
        }
        Ok(headers)
    }
}

impl<T> Clone for BlockchainDatabase<T> {
    fn clone(&self) -> Self {
        BlockchainDatabase { db: self.db.clone() }
    }
}
