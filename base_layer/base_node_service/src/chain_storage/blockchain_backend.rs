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

use crate::{
    blocks::{BlockHeader, HistoricalBlock},
    chain_storage::{ChainMetadata, ChainStorageError},
    transactions::{TransactionKernel, TransactionOutput},
    types::{Commitment, HashOutput, Signature},
};

/// Identify behaviour for Blockchain database backends. Implementations must support `Send` and `Sync` so that
/// `BlockchainDatabase` can be shared between the request handlers running on the blocking thread pool.
///
/// Every lookup returns `Ok(None)` when the requested record is not in the store. An error must only be returned if
/// there is an access or integrity issue with the underlying storage.
pub trait BlockchainBackend: Send + Sync {
    /// Returns the metadata of the current best chain
    fn fetch_chain_metadata(&self) -> Result<ChainMetadata, ChainStorageError>;

    /// Fetch the main chain header at the given height
    fn fetch_header(&self, height: u64) -> Result<Option<BlockHeader>, ChainStorageError>;

    /// Fetch the header with the given block hash
    fn fetch_header_by_hash(&self, hash: &HashOutput) -> Result<Option<BlockHeader>, ChainStorageError>;

    fn fetch_kernel(&self, hash: &HashOutput) -> Result<Option<TransactionKernel>, ChainStorageError>;

    /// Fetch an output with the given hash if it is in the current UTXO set
    fn fetch_utxo(&self, hash: &HashOutput) -> Result<Option<TransactionOutput>, ChainStorageError>;

    /// Fetch an output with the given hash, whether it has been spent or not
    fn fetch_txo(&self, hash: &HashOutput) -> Result<Option<TransactionOutput>, ChainStorageError>;

    fn fetch_block(&self, height: u64) -> Result<Option<HistoricalBlock>, ChainStorageError>;

    fn fetch_block_by_hash(&self, hash: &HashOutput) -> Result<Option<HistoricalBlock>, ChainStorageError>;

    /// Fetch the block containing the kernel with the given excess signature
    fn fetch_block_with_kernel(&self, excess_sig: &Signature) -> Result<Option<HistoricalBlock>, ChainStorageError>;

    /// Fetch the block in which the output with the given commitment was spent
    fn fetch_block_with_stxo(&self, commitment: &Commitment) -> Result<Option<HistoricalBlock>, ChainStorageError>;

    /// Fetch the block that created the unspent output with the given commitment
    fn fetch_block_with_utxo(&self, commitment: &Commitment) -> Result<Option<HistoricalBlock>, ChainStorageError>;
}
