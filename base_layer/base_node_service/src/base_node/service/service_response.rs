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

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base_node::{
    comms_interface::{CommsInterfaceError, ErrorKind, NodeCommsResponse},
    service::RequestKey,
};

/// The reason a base node could not answer a request
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {details}")]
pub struct RequestError {
    pub kind: ErrorKind,
    pub details: String,
}

impl RequestError {
    pub fn new<T: Into<String>>(kind: ErrorKind, details: T) -> Self {
        Self {
            kind,
            details: details.into(),
        }
    }
}

impl From<&CommsInterfaceError> for RequestError {
    fn from(err: &CommsInterfaceError) -> Self {
        Self::new(err.error_kind(), err.to_string())
    }
}

impl From<RequestError> for CommsInterfaceError {
    fn from(err: RequestError) -> Self {
        CommsInterfaceError::ApiError {
            kind: err.kind,
            details: err.details,
        }
    }
}

/// Response type for a base node Service Request. Carries the key of the request it answers and either the data or
/// the reason the request failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseNodeServiceResponse {
    pub request_key: RequestKey,
    pub outcome: Result<NodeCommsResponse, RequestError>,
}

impl BaseNodeServiceResponse {
    pub fn success(request_key: RequestKey, response: NodeCommsResponse) -> Self {
        Self {
            request_key,
            outcome: Ok(response),
        }
    }

    pub fn failure(request_key: RequestKey, error: RequestError) -> Self {
        Self {
            request_key,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The error kind if the request failed
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.outcome.as_ref().err().map(|err| err.kind)
    }
}

impl Display for BaseNodeServiceResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Ok(response) => write!(f, "{} (key {})", response, self.request_key),
            Err(err) => write!(f, "Error {} (key {})", err, self.request_key),
        }
    }
}

