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

use std::convert::{TryFrom, TryInto};

use crate::{
    base_node::{
        comms_interface::{GetNewBlockTemplateRequest, NodeCommsRequest},
        service::BaseNodeServiceRequest,
    },
    proof_of_work::PowAlgorithm,
    proto::{
        base_node::{self as proto, base_node_service_request::Request as ProtoNodeCommsRequest},
        utils::{try_convert_all, try_convert_hashes},
    },
    types::{Commitment, FixedHash, Signature},
};

//---------------------------------- BaseNodeRequest --------------------------------------------//

impl TryFrom<ProtoNodeCommsRequest> for NodeCommsRequest {
    type Error = String;

    fn try_from(request: ProtoNodeCommsRequest) -> Result<Self, Self::Error> {
        let request = match request {
            ProtoNodeCommsRequest::GetChainMetadata(_) => NodeCommsRequest::GetChainMetadata,
            ProtoNodeCommsRequest::FetchKernels(hashes) => {
                NodeCommsRequest::FetchKernels(try_convert_hashes(hashes.outputs)?)
            },
            ProtoNodeCommsRequest::FetchHeaders(block_heights) => NodeCommsRequest::FetchHeaders(block_heights.heights),
            ProtoNodeCommsRequest::FetchHeadersWithHashes(hashes) => {
                NodeCommsRequest::FetchHeadersWithHashes(try_convert_hashes(hashes.outputs)?)
            },
            ProtoNodeCommsRequest::FetchMatchingUtxos(hashes) => {
                NodeCommsRequest::FetchMatchingUtxos(try_convert_hashes(hashes.outputs)?)
            },
            ProtoNodeCommsRequest::FetchMatchingBlocks(block_heights) => {
                NodeCommsRequest::FetchMatchingBlocks(block_heights.heights)
            },
            ProtoNodeCommsRequest::FetchBlocksWithHashes(hashes) => {
                NodeCommsRequest::FetchBlocksWithHashes(try_convert_hashes(hashes.outputs)?)
            },
            ProtoNodeCommsRequest::GetNewBlockTemplate(request) => {
                NodeCommsRequest::GetNewBlockTemplate(GetNewBlockTemplateRequest {
                    algo: PowAlgorithm::try_from(request.algo)?,
                    max_weight: request.max_weight,
                })
            },
            ProtoNodeCommsRequest::FetchHeadersAfter(request) => NodeCommsRequest::FetchHeadersAfter {
                hashes: try_convert_hashes(request.hashes)?,
                stopping_hash: FixedHash::try_from(request.stopping_hash)
                    .map_err(|err| format!("Malformed stopping hash: {}", err))?,
            },
            ProtoNodeCommsRequest::FetchMatchingTxos(hashes) => {
                NodeCommsRequest::FetchMatchingTxos(try_convert_hashes(hashes.outputs)?)
            },
            ProtoNodeCommsRequest::FetchBlocksWithKernels(signatures) => {
                let excess_sigs: Vec<Signature> = try_convert_all(signatures.sigs)?;
                NodeCommsRequest::FetchBlocksWithKernels(excess_sigs)
            },
            ProtoNodeCommsRequest::FetchBlocksWithStxos(commitments) => {
                NodeCommsRequest::FetchBlocksWithStxos(try_convert_commitments(commitments)?)
            },
            ProtoNodeCommsRequest::FetchBlocksWithUtxos(commitments) => {
                NodeCommsRequest::FetchBlocksWithUtxos(try_convert_commitments(commitments)?)
            },
            ProtoNodeCommsRequest::GetHeaderByHash(hash) => NodeCommsRequest::GetHeaderByHash(
                FixedHash::try_from(hash).map_err(|err| format!("Malformed hash: {}", err))?,
            ),
            ProtoNodeCommsRequest::GetBlockByHash(hash) => NodeCommsRequest::GetBlockByHash(
                FixedHash::try_from(hash).map_err(|err| format!("Malformed hash: {}", err))?,
            ),
        };
        Ok(request)
    }
}

fn try_convert_commitments(commitments: proto::Commitments) -> Result<Vec<Commitment>, String> {
    try_convert_all(commitments.commitments).map_err(|err| format!("Malformed commitment: {}", err))
}

fn hash_outputs(hashes: Vec<FixedHash>) -> proto::HashOutputs {
    proto::HashOutputs {
        outputs: hashes.into_iter().map(|hash| hash.to_vec()).collect(),
    }
}

impl From<NodeCommsRequest> for ProtoNodeCommsRequest {
    fn from(request: NodeCommsRequest) -> Self {
        match request {
            NodeCommsRequest::GetChainMetadata => ProtoNodeCommsRequest::GetChainMetadata(true),
            NodeCommsRequest::FetchKernels(hashes) => ProtoNodeCommsRequest::FetchKernels(hash_outputs(hashes)),
            NodeCommsRequest::FetchHeaders(heights) => {
                ProtoNodeCommsRequest::FetchHeaders(proto::BlockHeights { heights })
            },
            NodeCommsRequest::FetchHeadersWithHashes(hashes) => {
                ProtoNodeCommsRequest::FetchHeadersWithHashes(hash_outputs(hashes))
            },
            NodeCommsRequest::FetchMatchingUtxos(hashes) => {
                ProtoNodeCommsRequest::FetchMatchingUtxos(hash_outputs(hashes))
            },
            NodeCommsRequest::FetchMatchingBlocks(heights) => {
                ProtoNodeCommsRequest::FetchMatchingBlocks(proto::BlockHeights { heights })
            },
            NodeCommsRequest::FetchBlocksWithHashes(hashes) => {
                ProtoNodeCommsRequest::FetchBlocksWithHashes(hash_outputs(hashes))
            },
            NodeCommsRequest::GetNewBlockTemplate(request) => {
                ProtoNodeCommsRequest::GetNewBlockTemplate(proto::NewBlockTemplateRequest {
                    algo: request.algo.as_u64(),
                    max_weight: request.max_weight,
                })
            },
            NodeCommsRequest::FetchHeadersAfter { hashes, stopping_hash } => {
                ProtoNodeCommsRequest::FetchHeadersAfter(proto::FetchHeadersAfter {
                    hashes: hashes.into_iter().map(|hash| hash.to_vec()).collect(),
                    stopping_hash: stopping_hash.to_vec(),
                })
            },
            NodeCommsRequest::FetchMatchingTxos(hashes) => {
                ProtoNodeCommsRequest::FetchMatchingTxos(hash_outputs(hashes))
            },
            NodeCommsRequest::FetchBlocksWithKernels(excess_sigs) => {
                ProtoNodeCommsRequest::FetchBlocksWithKernels(proto::Signatures {
                    sigs: excess_sigs.into_iter().map(Into::into).collect(),
                })
            },
            NodeCommsRequest::FetchBlocksWithStxos(commitments) => {
                ProtoNodeCommsRequest::FetchBlocksWithStxos(proto::Commitments {
                    commitments: commitments.into_iter().map(Into::into).collect(),
                })
            },
            NodeCommsRequest::FetchBlocksWithUtxos(commitments) => {
                ProtoNodeCommsRequest::FetchBlocksWithUtxos(proto::Commitments {
                    commitments: commitments.into_iter().map(Into::into).collect(),
                })
            },
            NodeCommsRequest::GetHeaderByHash(hash) => ProtoNodeCommsRequest::GetHeaderByHash(hash.to_vec()),
            NodeCommsRequest::GetBlockByHash(hash) => ProtoNodeCommsRequest::GetBlockByHash(hash.to_vec()),
        }
    }
}

//---------------------------------- BaseNodeServiceRequest --------------------------------------------//

impl TryFrom<proto::BaseNodeServiceRequest> for BaseNodeServiceRequest {
    type Error = String;

    fn try_from(request: proto::BaseNodeServiceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            request_key: request.request_key,
            request: request
                .request
                .map(TryInto::try_into)
                .ok_or_else(|| "Request variant not provided".to_string())??,
        })
    }
}

impl From<BaseNodeServiceRequest> for proto::BaseNodeServiceRequest {
    fn from(request: BaseNodeServiceRequest) -> Self {
        Self {
            request_key: request.request_key,
            request: Some(request.request.into()),
        }
    }
}
