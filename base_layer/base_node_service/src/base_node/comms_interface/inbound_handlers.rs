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

use std::{future::Future, sync::Arc};

use log::*;

use crate::{
    base_node::comms_interface::{CommsInterfaceError, GetNewBlockTemplateRequest, NodeCommsRequest, NodeCommsResponse},
    blocks::NewBlockTemplate,
    chain_storage::{async_db, BlockchainBackend, BlockchainDatabase, ChainStorageError},
    consts::MAX_HEADERS_PER_RESPONSE,
    mining::BlockTemplateCalculator,
};

const LOG_TARGET: &str = "c::bn::comms_interface::inbound_handler";

/// The InboundNodeCommsHandlers answer requests from remote nodes with data from the local chain.
pub struct InboundNodeCommsHandlers<B, C> {
    blockchain_db: BlockchainDatabase<B>,
    template_calculator: Arc<C>,
    max_block_weight: u64,
}

impl<B, C> InboundNodeCommsHandlers<B, C>
where
    B: BlockchainBackend + 'static,
    C: BlockTemplateCalculator + 'static,
{
    /// Construct a new InboundNodeCommsHandlers.
    pub fn new(blockchain_db: BlockchainDatabase<B>, template_calculator: Arc<C>, max_block_weight: u64) -> Self {
        Self {
            blockchain_db,
            template_calculator,
            max_block_weight,
        }
    }

    /// Handle inbound node comms requests from remote nodes and local services.
    pub async fn handle_request(&self, request: NodeCommsRequest) -> Result<NodeCommsResponse, CommsInterfaceError> {
        debug!(target: LOG_TARGET, "Handling remote request {}", request);
        match request {
            NodeCommsRequest::GetChainMetadata => Ok(NodeCommsResponse::ChainMetadata(
                async_db::get_metadata(self.blockchain_db.clone()).await?,
            )),
            NodeCommsRequest::FetchKernels(kernel_hashes) => {
                let kernels = self.fetch_all(kernel_hashes, async_db::fetch_kernel).await?;
                Ok(NodeCommsResponse::TransactionKernels(kernels))
            },
            NodeCommsRequest::FetchHeaders(heights) => {
                let headers = self.fetch_all(heights, async_db::fetch_header).await?;
                Ok(NodeCommsResponse::BlockHeaders(headers))
            },
            NodeCommsRequest::FetchHeadersWithHashes(block_hashes) => {
                let headers = self.fetch_all(block_hashes, async_db::fetch_header_by_hash).await?;
                Ok(NodeCommsResponse::BlockHeaders(headers))
            },
            NodeCommsRequest::FetchMatchingUtxos(utxo_hashes) => {
                let utxos = self.fetch_all(utxo_hashes, async_db::fetch_utxo).await?;
                Ok(NodeCommsResponse::TransactionOutputs(utxos))
            },
            NodeCommsRequest::FetchMatchingBlocks(heights) => {
                let blocks = self.fetch_all(heights, async_db::fetch_block).await?;
                Ok(NodeCommsResponse::HistoricalBlocks(blocks))
            },
            NodeCommsRequest::FetchBlocksWithHashes(block_hashes) => {
                let blocks = self.fetch_all(block_hashes, async_db::fetch_block_by_hash).await?;
                Ok(NodeCommsResponse::HistoricalBlocks(blocks))
            },
            NodeCommsRequest::GetNewBlockTemplate(request) => Ok(NodeCommsResponse::NewBlockTemplate(
                self.new_block_template(request).await?,
            )),
            NodeCommsRequest::FetchHeadersAfter { hashes, stopping_hash } => {
                let headers = async_db::fetch_headers_after(
                    self.blockchain_db.clone(),
                    hashes,
                    stopping_hash,
                    MAX_HEADERS_PER_RESPONSE,
                )
                .await?;
                Ok(NodeCommsResponse::FetchHeadersAfterResponse(headers))
            },
            NodeCommsRequest::FetchMatchingTxos(hashes) => {
                let txos = self.fetch_all(hashes, async_db::fetch_txo).await?;
                Ok(NodeCommsResponse::TransactionOutputs(txos))
            },
            NodeCommsRequest::FetchBlocksWithKernels(excess_sigs) => {
                let blocks = self.fetch_all(excess_sigs, async_db::fetch_block_with_kernel).await?;
                Ok(NodeCommsResponse::HistoricalBlocks(blocks))
            },
            NodeCommsRequest::FetchBlocksWithStxos(commitments) => {
                let blocks = self.fetch_all(commitments, async_db::fetch_block_with_stxo).await?;
                Ok(NodeCommsResponse::HistoricalBlocks(blocks))
            },
            NodeCommsRequest::FetchBlocksWithUtxos(commitments) => {
                let blocks = self.fetch_all(commitments, async_db::fetch_block_with_utxo).await?;
                Ok(NodeCommsResponse::HistoricalBlocks(blocks))
            },
            NodeCommsRequest::GetHeaderByHash(hash) => Ok(NodeCommsResponse::BlockHeader(
                async_db::fetch_header_by_hash(self.blockchain_db.clone(), hash).await?,
            )),
            NodeCommsRequest::GetBlockByHash(hash) => Ok(NodeCommsResponse::HistoricalBlock(Box::new(
                async_db::fetch_block_by_hash(self.blockchain_db.clone(), hash).await?,
            ))),
        }
    }

    /// Looks up every key in order. Keys the chain does not know are skipped, any other storage error fails the whole
    /// lookup.
    async fn fetch_all<K, V, F, Fut>(&self, keys: Vec<K>, fetch: F) -> Result<Vec<V>, CommsInterfaceError>
    where
        F: Fn(BlockchainDatabase<B>, K) -> Fut,
        Fut: Future<Output = Result<V, ChainStorageError>>,
    {
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            match fetch(self.blockchain_db.clone(), key).await {
                Ok(value) => found.push(value),
                Err(err) if err.is_value_not_found() => {
                    trace!(target: LOG_TARGET, "Skipping missing entry: {}", err);
                },
                Err(err) => return Err(err.into()),
            }
        }
        Ok(found)
    }

    async fn new_block_template(
        &self,
        request: GetNewBlockTemplateRequest,
    ) -> Result<NewBlockTemplate, CommsInterfaceError> {
        let tip_header = async_db::fetch_tip_header(self.blockchain_db.clone()).await?;
        let max_weight = match request.max_weight {
            0 => self.max_block_weight,
            requested => requested.min(self.max_block_weight),
        };
        debug!(
            target: LOG_TARGET,
            "Building {} block template on top of #{} with max weight {}",
            request.algo,
            tip_header.height,
            max_weight
        );
        let calculator = self.template_calculator.clone();
        let template = tokio::task::spawn_blocking(move || {
            calculator.new_block_template(&tip_header, request.algo, max_weight)
        })
        .await
        .map_err(|err| CommsInterfaceError::BlockingTaskSpawnError(err.to_string()))??;
        Ok(template)
    }
}

impl<B, C> Clone for InboundNodeCommsHandlers<B, C> {
    fn clone(&self) -> Self {
        Self {
            blockchain_db: self.blockchain_db.clone(),
            template_calculator: self.template_calculator.clone(),
            max_block_weight: self.max_block_weight,
        }
    }
}
