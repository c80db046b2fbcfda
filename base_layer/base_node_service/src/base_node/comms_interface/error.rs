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

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::{
    base_node::service::{CorrelatorError, TransportError},
    chain_storage::ChainStorageError,
    mining::BlockTemplateError,
    reply_channel::TransportChannelError,
};

/// The reason a request could not be answered, as carried in an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request bytes could not be decoded
    DecodeError,
    /// The request decoded but its payload is invalid, e.g. a hash of the wrong length
    MalformedPayload,
    /// A request with the same key is already in flight
    DuplicateKey,
    /// No request with the key is in flight
    UnknownKey,
    /// No response arrived before the request expired
    Timeout,
    /// The chain does not contain the requested data
    NotFound,
    /// The chain store could not be reached. The request may be retried.
    StorageUnavailable,
    /// Too many requests are in flight. The request may be retried.
    Busy,
    /// The node failed to answer for an internal reason
    InternalError,
}

impl ErrorKind {
    /// Errors that may succeed when the same request is sent again
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::StorageUnavailable | ErrorKind::Busy | ErrorKind::Timeout)
    }
}

#[derive(Debug, Error)]
pub enum CommsInterfaceError {
    #[error("Received an unexpected response from a remote peer")]
    UnexpectedApiResponse,
    #[error("Request timed out")]
    RequestTimedOut,
    #[error("Request was cancelled before a response arrived")]
    RequestCancelled,
    #[error("Transport channel error: {0}")]
    TransportChannelError(#[from] TransportChannelError),
    #[error("Chain storage error: {0}")]
    ChainStorageError(#[from] ChainStorageError),
    #[error("Block template calculation failed: {0}")]
    TemplateCalculationError(#[from] BlockTemplateError),
    #[error("Request correlation failed: {0}")]
    CorrelatorError(#[from] CorrelatorError),
    #[error("Failed to send outbound message: {0}")]
    OutboundMessageError(#[from] TransportError),
    #[error("Blocking task spawn error: {0}")]
    BlockingTaskSpawnError(String),
    #[error("Remote node answered with {kind}: {details}")]
    ApiError { kind: ErrorKind, details: String },
    #[error("Invalid peer response: {0}")]
    InvalidPeerResponse(String),
}

impl CommsInterfaceError {
    /// The kind reported to the requester when this error ends a request
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            CommsInterfaceError::ChainStorageError(err) => match err {
                ChainStorageError::ValueNotFound { .. } => ErrorKind::NotFound,
                ChainStorageError::AccessError(_) |
                ChainStorageError::CorruptedDatabase(_) |
                ChainStorageError::BlockingTaskSpawnError(_) => ErrorKind::StorageUnavailable,
                ChainStorageError::UnspendableInput |
                ChainStorageError::InvalidOperation(_) |
                ChainStorageError::InvalidBlock(_) => ErrorKind::InternalError,
            },
            CommsInterfaceError::ApiError { kind, .. } => *kind,
            CommsInterfaceError::CorrelatorError(err) => err.error_kind(),
            CommsInterfaceError::RequestTimedOut => ErrorKind::Timeout,
            CommsInterfaceError::InvalidPeerResponse(_) => ErrorKind::MalformedPayload,
            CommsInterfaceError::UnexpectedApiResponse |
            CommsInterfaceError::RequestCancelled |
            CommsInterfaceError::TransportChannelError(_) |
            CommsInterfaceError::TemplateCalculationError(_) |
            CommsInterfaceError::OutboundMessageError(_) |
            CommsInterfaceError::BlockingTaskSpawnError(_) => ErrorKind::InternalError,
        }
    }

    /// Returns true if the remote node reported that it does not have the requested data
    pub fn is_not_found(&self) -> bool {
        self.error_kind() == ErrorKind::NotFound
    }
}
