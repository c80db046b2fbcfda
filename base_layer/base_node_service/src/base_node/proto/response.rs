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

use std::{
    convert::{TryFrom, TryInto},
    iter::FromIterator,
};

use crate::{
    base_node::{
        comms_interface::{ErrorKind, NodeCommsResponse},
        service::{BaseNodeServiceResponse, RequestError},
    },
    proto::{
        base_node::{
            self as proto,
            base_node_service_response::Response as ProtoNodeCommsResponse,
            BlockHeaders as ProtoBlockHeaders,
            HistoricalBlocks as ProtoHistoricalBlocks,
            TransactionKernels as ProtoTransactionKernels,
            TransactionOutputs as ProtoTransactionOutputs,
        },
        core as core_proto_types,
        types as transactions_proto,
        utils::try_convert_all,
    },
};

//---------------------------------- BaseNodeResponse --------------------------------------------//

impl TryFrom<ProtoNodeCommsResponse> for NodeCommsResponse {
    type Error = String;

    fn try_from(response: ProtoNodeCommsResponse) -> Result<Self, Self::Error> {
        let response = match response {
            ProtoNodeCommsResponse::ChainMetadata(chain_metadata) => {
                NodeCommsResponse::ChainMetadata(chain_metadata.try_into()?)
            },
            ProtoNodeCommsResponse::TransactionKernels(kernels) => {
                NodeCommsResponse::TransactionKernels(try_convert_all(kernels.kernels)?)
            },
            ProtoNodeCommsResponse::BlockHeaders(headers) => {
                NodeCommsResponse::BlockHeaders(try_convert_all(headers.headers)?)
            },
            ProtoNodeCommsResponse::TransactionOutputs(outputs) => {
                NodeCommsResponse::TransactionOutputs(try_convert_all(outputs.outputs)?)
            },
            ProtoNodeCommsResponse::HistoricalBlocks(blocks) => {
                NodeCommsResponse::HistoricalBlocks(try_convert_all(blocks.blocks)?)
            },
            ProtoNodeCommsResponse::NewBlockTemplate(block_template) => {
                NodeCommsResponse::NewBlockTemplate(block_template.try_into()?)
            },
            ProtoNodeCommsResponse::FetchHeadersAfterResponse(headers) => {
                NodeCommsResponse::FetchHeadersAfterResponse(try_convert_all(headers.headers)?)
            },
            ProtoNodeCommsResponse::BlockHeader(header) => NodeCommsResponse::BlockHeader(header.try_into()?),
            ProtoNodeCommsResponse::HistoricalBlock(block) => {
                NodeCommsResponse::HistoricalBlock(Box::new(block.try_into()?))
            },
            ProtoNodeCommsResponse::Error(err) => {
                return Err(format!("Error response does not carry a payload: {}", err.details));
            },
        };

        Ok(response)
    }
}

impl From<NodeCommsResponse> for ProtoNodeCommsResponse {
    fn from(response: NodeCommsResponse) -> Self {
        match response {
            NodeCommsResponse::ChainMetadata(chain_metadata) => {
                ProtoNodeCommsResponse::ChainMetadata(chain_metadata.into())
            },
            NodeCommsResponse::TransactionKernels(kernels) => {
                ProtoNodeCommsResponse::TransactionKernels(kernels.into_iter().map(Into::into).collect())
            },
            NodeCommsResponse::BlockHeaders(headers) => {
                ProtoNodeCommsResponse::BlockHeaders(headers.into_iter().map(Into::into).collect())
            },
            NodeCommsResponse::TransactionOutputs(outputs) => {
                ProtoNodeCommsResponse::TransactionOutputs(outputs.into_iter().map(Into::into).collect())
            },
            NodeCommsResponse::HistoricalBlocks(historical_blocks) => {
                ProtoNodeCommsResponse::HistoricalBlocks(historical_blocks.into_iter().map(Into::into).collect())
            },
            NodeCommsResponse::NewBlockTemplate(block_template) => {
                ProtoNodeCommsResponse::NewBlockTemplate(block_template.into())
            },
            NodeCommsResponse::FetchHeadersAfterResponse(headers) => {
                ProtoNodeCommsResponse::FetchHeadersAfterResponse(headers.into_iter().map(Into::into).collect())
            },
            NodeCommsResponse::BlockHeader(header) => ProtoNodeCommsResponse::BlockHeader(header.into()),
            NodeCommsResponse::HistoricalBlock(block) => ProtoNodeCommsResponse::HistoricalBlock((*block).into()),
        }
    }
}

//---------------------------------- BaseNodeServiceResponse --------------------------------------------//

impl TryFrom<proto::BaseNodeServiceResponse> for BaseNodeServiceResponse {
    type Error = String;

    fn try_from(response: proto::BaseNodeServiceResponse) -> Result<Self, Self::Error> {
        let outcome = match response.response {
            Some(ProtoNodeCommsResponse::Error(err)) => Err(err.into()),
            Some(response) => Ok(response.try_into()?),
            None => return Err("Response variant not provided".to_string()),
        };
        Ok(Self {
            request_key: response.request_key,
            outcome,
        })
    }
}

impl From<BaseNodeServiceResponse> for proto::BaseNodeServiceResponse {
    fn from(response: BaseNodeServiceResponse) -> Self {
        let response_variant: ProtoNodeCommsResponse = match response.outcome {
            Ok(response) => response.into(),
            Err(err) => ProtoNodeCommsResponse::Error(err.into()),
        };
        Self {
            request_key: response.request_key,
            response: Some(response_variant),
        }
    }
}

//---------------------------------- Errors --------------------------------------------//

impl From<ErrorKind> for proto::ErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::DecodeError => proto::ErrorKind::DecodeError,
            ErrorKind::MalformedPayload => proto::ErrorKind::MalformedPayload,
            ErrorKind::DuplicateKey => proto::ErrorKind::DuplicateKey,
            ErrorKind::UnknownKey => proto::ErrorKind::UnknownKey,
            ErrorKind::Timeout => proto::ErrorKind::Timeout,
            ErrorKind::NotFound => proto::ErrorKind::NotFound,
            ErrorKind::StorageUnavailable => proto::ErrorKind::StorageUnavailable,
            ErrorKind::Busy => proto::ErrorKind::Busy,
            ErrorKind::InternalError => proto::ErrorKind::InternalError,
        }
    }
}

impl From<proto::ErrorKind> for ErrorKind {
    fn from(kind: proto::ErrorKind) -> Self {
        match kind {
            proto::ErrorKind::DecodeError => ErrorKind::DecodeError,
            proto::ErrorKind::MalformedPayload => ErrorKind::MalformedPayload,
            proto::ErrorKind::DuplicateKey => ErrorKind::DuplicateKey,
            proto::ErrorKind::UnknownKey => ErrorKind::UnknownKey,
            proto::ErrorKind::Timeout => ErrorKind::Timeout,
            proto::ErrorKind::NotFound => ErrorKind::NotFound,
            proto::ErrorKind::StorageUnavailable => ErrorKind::StorageUnavailable,
            proto::ErrorKind::Busy => ErrorKind::Busy,
            proto::ErrorKind::Unspecified | proto::ErrorKind::InternalError => ErrorKind::InternalError,
        }
    }
}

impl From<proto::ServiceError> for RequestError {
    fn from(err: proto::ServiceError) -> Self {
        // Kinds added by newer nodes are reported as internal errors
        let kind = proto::ErrorKind::from_i32(err.kind)
            .map(ErrorKind::from)
            .unwrap_or(ErrorKind::InternalError);
        RequestError::new(kind, err.details)
    }
}

impl From<RequestError> for proto::ServiceError {
    fn from(err: RequestError) -> Self {
        Self {
            kind: proto::ErrorKind::from(err.kind) as i32,
            details: err.details,
        }
    }
}

//---------------------------------- Collection impls --------------------------------------------//

// The following allow `Iterator::collect` to collect into these repeated types

impl FromIterator<transactions_proto::TransactionKernel> for ProtoTransactionKernels {
    fn from_iter<T: IntoIterator<Item = transactions_proto::TransactionKernel>>(iter: T) -> Self {
        Self {
            kernels: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<core_proto_types::BlockHeader> for ProtoBlockHeaders {
    fn from_iter<T: IntoIterator<Item = core_proto_types::BlockHeader>>(iter: T) -> Self {
        Self {
            headers: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<transactions_proto::TransactionOutput> for ProtoTransactionOutputs {
    fn from_iter<T: IntoIterator<Item = transactions_proto::TransactionOutput>>(iter: T) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<core_proto_types::HistoricalBlock> for ProtoHistoricalBlocks {
    fn from_iter<T: IntoIterator<Item = core_proto_types::HistoricalBlock>>(iter: T) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}
