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

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    blocks::{BlockHeader, HistoricalBlock, NewBlockTemplate},
    chain_storage::ChainMetadata,
    transactions::{TransactionKernel, TransactionOutput},
};

/// API Response enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCommsResponse {
    ChainMetadata(ChainMetadata),
    TransactionKernels(Vec<TransactionKernel>),
    BlockHeaders(Vec<BlockHeader>),
    TransactionOutputs(Vec<TransactionOutput>),
    HistoricalBlocks(Vec<HistoricalBlock>),
    NewBlockTemplate(NewBlockTemplate),
    FetchHeadersAfterResponse(Vec<BlockHeader>),
    BlockHeader(BlockHeader),
    HistoricalBlock(Box<HistoricalBlock>),
}

impl Display for NodeCommsResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NodeCommsResponse::ChainMetadata(metadata) => {
                write!(f, "ChainMetadata(height={})", metadata.best_block_height())
            },
            NodeCommsResponse::TransactionKernels(kernels) => write!(f, "TransactionKernels(n={})", kernels.len()),
            NodeCommsResponse::BlockHeaders(headers) => write!(f, "BlockHeaders(n={})", headers.len()),
            NodeCommsResponse::TransactionOutputs(outputs) => write!(f, "TransactionOutputs(n={})", outputs.len()),
            NodeCommsResponse::HistoricalBlocks(blocks) => write!(f, "HistoricalBlocks(n={})", blocks.len()),
            NodeCommsResponse::NewBlockTemplate(template) => {
                write!(f, "NewBlockTemplate(height={})", template.header.height)
            },
            NodeCommsResponse::FetchHeadersAfterResponse(headers) => {
                write!(f, "FetchHeadersAfterResponse(n={})", headers.len())
            },
            NodeCommsResponse::BlockHeader(header) => write!(f, "BlockHeader(height={})", header.height),
            NodeCommsResponse::HistoricalBlock(block) => write!(f, "HistoricalBlock(height={})", block.header().height),
        }
    }
}
