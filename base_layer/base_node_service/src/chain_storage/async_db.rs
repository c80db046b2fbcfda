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

use std::time::Instant;

use log::*;
use rand::{rngs::OsRng, RngCore};

use crate::{
    blocks::{BlockHeader, HistoricalBlock},
    chain_storage::{BlockchainBackend, BlockchainDatabase, ChainMetadata, ChainStorageError},
    transactions::{TransactionKernel, TransactionOutput},
    types::{Commitment, HashOutput, Signature},
};

const LOG_TARGET: &str = "c::bn::async_db";

fn trace_log<F, R>(name: &str, f: F) -> R
where F: FnOnce() -> R {
    let start = Instant::now();
    let trace_id = OsRng.next_u32();
    trace!(
        target: LOG_TARGET,
        "[{}] Entered blocking thread. trace_id: '{}'",
        name,
        trace_id
    );
    let ret = f();
    trace!(
        target: LOG_TARGET,
        "[{}] Exited blocking thread after {}ms. trace_id: '{}'",
        name,
        start.elapsed().as_millis(),
        trace_id
    );
    ret
}

macro_rules! make_async {
    ($fn:ident() -> $rtype:ty, $name:expr) => {
        pub async fn $fn<T>(db: BlockchainDatabase<T>) -> Result<$rtype, ChainStorageError>
        where T: BlockchainBackend + 'static {
            tokio::task::spawn_blocking(move || trace_log($name, move || db.$fn()))
                .await
                .map_err(|err| ChainStorageError::BlockingTaskSpawnError(err.to_string()))
                .and_then(|inner_result| inner_result)
        }
    };

    ($fn:ident($($param:ident:$ptype:ty),+) -> $rtype:ty, $name:expr) => {
        pub async fn $fn<T>(db: BlockchainDatabase<T>, $($param: $ptype),+) -> Result<$rtype, ChainStorageError>
        where T: BlockchainBackend + 'static {
            tokio::task::spawn_blocking(move || trace_log($name, move || db.$fn($($param),+)))
                .await
                .map_err(|err| ChainStorageError::BlockingTaskSpawnError(err.to_string()))
                .and_then(|inner_result| inner_result)
        }
    };
}

make_async!(get_metadata() -> ChainMetadata, "get_metadata");
make_async!(fetch_tip_header() -> BlockHeader, "fetch_tip_header");
make_async!(fetch_header(height: u64) -> BlockHeader, "fetch_header");
make_async!(fetch_header_by_hash(hash: HashOutput) -> BlockHeader, "fetch_header_by_hash");
make_async!(fetch_headers_after(hashes: Vec<HashOutput>, stopping_hash: HashOutput, max_headers: u64) -> Vec<BlockHeader>, "fetch_headers_after");
make_async!(fetch_kernel(hash: HashOutput) -> TransactionKernel, "fetch_kernel");
make_async!(fetch_utxo(hash: HashOutput) -> TransactionOutput, "fetch_utxo");
make_async!(fetch_txo(hash: HashOutput) -> TransactionOutput, "fetch_txo");
make_async!(fetch_block(height: u64) -> HistoricalBlock, "fetch_block");
make_async!(fetch_block_by_hash(hash: HashOutput) -> HistoricalBlock, "fetch_block_by_hash");
make_async!(fetch_block_with_kernel(excess_sig: Signature) -> HistoricalBlock, "fetch_block_with_kernel");
make_async!(fetch_block_with_stxo(commitment: Commitment) -> HistoricalBlock, "fetch_block_with_stxo");
make_async!(fetch_block_with_utxo(commitment: Commitment) -> HistoricalBlock, "fetch_block_with_utxo");
