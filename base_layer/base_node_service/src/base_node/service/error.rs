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

use thiserror::Error;

use crate::base_node::{
    comms_interface::{CommsInterfaceError, ErrorKind},
    service::{CorrelatorError, RequestError, TransportError},
};

#[derive(Debug, Error)]
pub enum BaseNodeServiceError {
    #[error("Comms interface error: `{0}`")]
    CommsInterfaceError(#[from] CommsInterfaceError),
    #[error("Request correlation error: `{0}`")]
    CorrelatorError(#[from] CorrelatorError),
    #[error("Transport error: `{0}`")]
    TransportError(#[from] TransportError),
    #[error("Failed to decode message: `{0}`")]
    DecodeError(#[from] prost::DecodeError),
    #[error("Invalid request error: `{0}`")]
    InvalidRequest(String),
    #[error("Invalid response error: `{0}`")]
    InvalidResponse(String),
}

impl BaseNodeServiceError {
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            BaseNodeServiceError::CommsInterfaceError(err) => err.error_kind(),
            BaseNodeServiceError::CorrelatorError(err) => err.error_kind(),
            BaseNodeServiceError::DecodeError(_) => ErrorKind::DecodeError,
            BaseNodeServiceError::InvalidRequest(_) | BaseNodeServiceError::InvalidResponse(_) => {
                ErrorKind::MalformedPayload
            },
            BaseNodeServiceError::TransportError(_) => ErrorKind::InternalError,
        }
    }
}

impl From<&BaseNodeServiceError> for RequestError {
    fn from(err: &BaseNodeServiceError) -> Self {
        RequestError::new(err.error_kind(), err.to_string())
    }
}
