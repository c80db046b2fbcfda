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

use futures::future::poll_fn;
use log::*;
use tower_service::Service;

use crate::{
    base_node::comms_interface::{
        CommsInterfaceError,
        ErrorKind,
        GetNewBlockTemplateRequest,
        NodeCommsRequest,
        NodeCommsResponse,
    },
    blocks::{BlockHeader, HistoricalBlock, NewBlockTemplate},
    chain_storage::ChainMetadata,
    proof_of_work::PowAlgorithm,
    reply_channel::SenderService,
    transactions::{TransactionKernel, TransactionOutput},
    types::{BlockHash, Commitment, HashOutput, Signature},
};

const LOG_TARGET: &str = "c::bn::comms_interface::outbound_interface";

pub type OutboundRequestSender = SenderService<NodeCommsRequest, Result<NodeCommsResponse, CommsInterfaceError>>;

/// The OutboundNodeCommsInterface provides an interface to request information from remote base nodes. Every call
/// resolves once the matching response arrives, or with an error once the request expires.
#[derive(Clone)]
pub struct OutboundNodeCommsInterface {
    request_sender: OutboundRequestSender,
}

impl OutboundNodeCommsInterface {
    /// Construct a new OutboundNodeCommsInterface with the specified request sender.
    pub fn new(request_sender: OutboundRequestSender) -> Self {
        Self { request_sender }
    }

    async fn call(&mut self, request: NodeCommsRequest) -> Result<NodeCommsResponse, CommsInterfaceError> {
        trace!(target: LOG_TARGET, "Requesting {} from a remote base node", request);
        poll_fn(|cx| self.request_sender.poll_ready(cx)).await?;
        self.request_sender.call(request).await?
    }

    /// Request metadata from remote base nodes.
    pub async fn get_metadata(&mut self) -> Result<ChainMetadata, CommsInterfaceError> {
        match self.call(NodeCommsRequest::GetChainMetadata).await? {
            NodeCommsResponse::ChainMetadata(metadata) => Ok(metadata),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the transaction kernels with the provided hashes from remote base nodes.
    pub async fn fetch_kernels(
        &mut self,
        hashes: Vec<HashOutput>,
    ) -> Result<Vec<TransactionKernel>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchKernels(hashes)).await? {
            NodeCommsResponse::TransactionKernels(kernels) => Ok(kernels),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the block headers corresponding to the provided block heights from remote base nodes.
    pub async fn fetch_headers(&mut self, heights: Vec<u64>) -> Result<Vec<BlockHeader>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchHeaders(heights)).await? {
            NodeCommsResponse::BlockHeaders(headers) => Ok(headers),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the block headers with the provided hashes from remote base nodes.
    pub async fn fetch_headers_with_hashes(
        &mut self,
        block_hashes: Vec<BlockHash>,
    ) -> Result<Vec<BlockHeader>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchHeadersWithHashes(block_hashes)).await? {
            NodeCommsResponse::BlockHeaders(headers) => Ok(headers),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the main chain headers following the first of `hashes` the remote node knows, up to and including
    /// `stopping_hash`.
    pub async fn fetch_headers_after(
        &mut self,
        hashes: Vec<BlockHash>,
        stopping_hash: BlockHash,
    ) -> Result<Vec<BlockHeader>, CommsInterfaceError> {
        match self
            .call(NodeCommsRequest::FetchHeadersAfter { hashes, stopping_hash })
            .await?
        {
            NodeCommsResponse::FetchHeadersAfterResponse(headers) => Ok(headers),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the UTXOs with the provided hashes from remote base nodes.
    pub async fn fetch_utxos(
        &mut self,
        hashes: Vec<HashOutput>,
    ) -> Result<Vec<TransactionOutput>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchMatchingUtxos(hashes)).await? {
            NodeCommsResponse::TransactionOutputs(utxos) => Ok(utxos),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the spent or unspent outputs with the provided hashes from remote base nodes.
    pub async fn fetch_txos(
        &mut self,
        hashes: Vec<HashOutput>,
    ) -> Result<Vec<TransactionOutput>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchMatchingTxos(hashes)).await? {
            NodeCommsResponse::TransactionOutputs(txos) => Ok(txos),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the main chain blocks at the provided heights from remote base nodes.
    pub async fn fetch_blocks(&mut self, heights: Vec<u64>) -> Result<Vec<HistoricalBlock>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchMatchingBlocks(heights)).await? {
            NodeCommsResponse::HistoricalBlocks(blocks) => Ok(blocks),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    pub async fn fetch_blocks_with_hashes(
        &mut self,
        block_hashes: Vec<BlockHash>,
    ) -> Result<Vec<HistoricalBlock>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchBlocksWithHashes(block_hashes)).await? {
            NodeCommsResponse::HistoricalBlocks(blocks) => Ok(blocks),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the blocks containing the kernels with the provided excess signatures.
    pub async fn fetch_blocks_with_kernels(
        &mut self,
        excess_sigs: Vec<Signature>,
    ) -> Result<Vec<HistoricalBlock>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchBlocksWithKernels(excess_sigs)).await? {
            NodeCommsResponse::HistoricalBlocks(blocks) => Ok(blocks),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the blocks that spent the outputs with the provided commitments.
    pub async fn fetch_blocks_with_stxos(
        &mut self,
        commitments: Vec<Commitment>,
    ) -> Result<Vec<HistoricalBlock>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchBlocksWithStxos(commitments)).await? {
            NodeCommsResponse::HistoricalBlocks(blocks) => Ok(blocks),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch the blocks that created the unspent outputs with the provided commitments.
    pub async fn fetch_blocks_with_utxos(
        &mut self,
        commitments: Vec<Commitment>,
    ) -> Result<Vec<HistoricalBlock>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::FetchBlocksWithUtxos(commitments)).await? {
            NodeCommsResponse::HistoricalBlocks(blocks) => Ok(blocks),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Request a new block template from a remote base node. A `max_weight` of zero leaves the weight to the remote
    /// node.
    pub async fn get_new_block_template(
        &mut self,
        algo: PowAlgorithm,
        max_weight: u64,
    ) -> Result<NewBlockTemplate, CommsInterfaceError> {
        let request = GetNewBlockTemplateRequest { algo, max_weight };
        match self.call(NodeCommsRequest::GetNewBlockTemplate(request)).await? {
            NodeCommsResponse::NewBlockTemplate(template) => Ok(template),
            _ => Err(CommsInterfaceError::UnexpectedApiResponse),
        }
    }

    /// Fetch a header by hash. `None` is returned if the remote node does not have it.
    pub async fn get_header_by_hash(&mut self, hash: BlockHash) -> Result<Option<BlockHeader>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::GetHeaderByHash(hash)).await {
            Ok(NodeCommsResponse::BlockHeader(header)) => Ok(Some(header)),
            Ok(_) => Err(CommsInterfaceError::UnexpectedApiResponse),
            Err(CommsInterfaceError::ApiError {
                kind: ErrorKind::NotFound,
                ..
            }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Fetch a block by hash. `None` is returned if the remote node does not have it.
    pub async fn get_block_by_hash(
        &mut self,
        hash: BlockHash,
    ) -> Result<Option<HistoricalBlock>, CommsInterfaceError> {
        match self.call(NodeCommsRequest::GetBlockByHash(hash)).await {
            Ok(NodeCommsResponse::HistoricalBlock(block)) => Ok(Some(*block)),
            Ok(_) => Err(CommsInterfaceError::UnexpectedApiResponse),
            Err(CommsInterfaceError::ApiError {
                kind: ErrorKind::NotFound,
                ..
            }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
