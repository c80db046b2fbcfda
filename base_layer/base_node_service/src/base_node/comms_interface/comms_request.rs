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

use std::fmt::{Display, Error, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumIter};

use crate::{
    proof_of_work::PowAlgorithm,
    types::{Commitment, HashOutput, Signature},
};

/// API Request enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCommsRequest {
    GetChainMetadata,
    FetchKernels(Vec<HashOutput>),
    FetchHeaders(Vec<u64>),
    FetchHeadersWithHashes(Vec<HashOutput>),
    FetchMatchingUtxos(Vec<HashOutput>),
    FetchMatchingBlocks(Vec<u64>),
    FetchBlocksWithHashes(Vec<HashOutput>),
    GetNewBlockTemplate(GetNewBlockTemplateRequest),
    FetchHeadersAfter {
        hashes: Vec<HashOutput>,
        stopping_hash: HashOutput,
    },
    FetchMatchingTxos(Vec<HashOutput>),
    FetchBlocksWithKernels(Vec<Signature>),
    FetchBlocksWithStxos(Vec<Commitment>),
    FetchBlocksWithUtxos(Vec<Commitment>),
    GetHeaderByHash(HashOutput),
    GetBlockByHash(HashOutput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetNewBlockTemplateRequest {
    pub algo: PowAlgorithm,
    /// Zero selects the maximum block weight of the answering node
    pub max_weight: u64,
}

/// The variant of a [NodeCommsRequest]. The discriminant is the tag of the variant in the wire schema and may never be
/// reassigned.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
pub enum RequestVariant {
    GetChainMetadata = 2,
    FetchKernels = 3,
    FetchHeaders = 4,
    FetchHeadersWithHashes = 5,
    FetchMatchingUtxos = 6,
    FetchMatchingBlocks = 7,
    FetchBlocksWithHashes = 8,
    GetNewBlockTemplate = 9,
    FetchHeadersAfter = 12,
    FetchMatchingTxos = 15,
    FetchBlocksWithKernels = 16,
    FetchBlocksWithStxos = 17,
    FetchBlocksWithUtxos = 18,
    GetHeaderByHash = 19,
    GetBlockByHash = 20,
}

impl RequestVariant {
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl NodeCommsRequest {
    pub fn variant(&self) -> RequestVariant {
        #[allow(clippy::enum_glob_use)]
        use NodeCommsRequest::*;
        match self {
            GetChainMetadata => RequestVariant::GetChainMetadata,
            FetchKernels(_) => RequestVariant::FetchKernels,
            FetchHeaders(_) => RequestVariant::FetchHeaders,
            FetchHeadersWithHashes(_) => RequestVariant::FetchHeadersWithHashes,
            FetchMatchingUtxos(_) => RequestVariant::FetchMatchingUtxos,
            FetchMatchingBlocks(_) => RequestVariant::FetchMatchingBlocks,
            FetchBlocksWithHashes(_) => RequestVariant::FetchBlocksWithHashes,
            GetNewBlockTemplate(_) => RequestVariant::GetNewBlockTemplate,
            FetchHeadersAfter { .. } => RequestVariant::FetchHeadersAfter,
            FetchMatchingTxos(_) => RequestVariant::FetchMatchingTxos,
            FetchBlocksWithKernels(_) => RequestVariant::FetchBlocksWithKernels,
            FetchBlocksWithStxos(_) => RequestVariant::FetchBlocksWithStxos,
            FetchBlocksWithUtxos(_) => RequestVariant::FetchBlocksWithUtxos,
            GetHeaderByHash(_) => RequestVariant::GetHeaderByHash,
            GetBlockByHash(_) => RequestVariant::GetBlockByHash,
        }
    }
}

impl Display for NodeCommsRequest {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        #[allow(clippy::enum_glob_use)]
        use NodeCommsRequest::*;
        match self {
            GetChainMetadata => write!(f, "GetChainMetadata"),
            FetchKernels(v) => write!(f, "FetchKernels (n={})", v.len()),
            FetchHeaders(v) => write!(f, "FetchHeaders (n={})", v.len()),
            FetchHeadersWithHashes(v) => write!(f, "FetchHeadersWithHashes (n={})", v.len()),
            FetchMatchingUtxos(v) => write!(f, "FetchMatchingUtxos (n={})", v.len()),
            FetchMatchingBlocks(v) => write!(f, "FetchMatchingBlocks (n={})", v.len()),
            FetchBlocksWithHashes(v) => write!(f, "FetchBlocksWithHashes (n={})", v.len()),
            GetNewBlockTemplate(v) => write!(f, "GetNewBlockTemplate ({}) with weight {}", v.algo, v.max_weight),
            FetchHeadersAfter { hashes, stopping_hash } => write!(
                f,
                "FetchHeadersAfter (n={}, stopping hash {})",
                hashes.len(),
                stopping_hash
            ),
            FetchMatchingTxos(v) => write!(f, "FetchMatchingTxos (n={})", v.len()),
            FetchBlocksWithKernels(v) => write!(f, "FetchBlocksWithKernels (n={})", v.len()),
            FetchBlocksWithStxos(v) => write!(f, "FetchBlocksWithStxos (n={})", v.len()),
            FetchBlocksWithUtxos(v) => write!(f, "FetchBlocksWithUtxos (n={})", v.len()),
            GetHeaderByHash(v) => write!(f, "GetHeaderByHash({})", v),
            GetBlockByHash(v) => write!(f, "GetBlockByHash({})", v),
        }
    }
}
