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

use log::*;

use crate::{
    base_node::{
        comms_interface::{ErrorKind, InboundNodeCommsHandlers},
        service::{BaseNodeServiceRequest, BaseNodeServiceResponse, RequestError},
    },
    chain_storage::BlockchainBackend,
    mining::BlockTemplateCalculator,
};

const LOG_TARGET: &str = "c::bn::service::dispatcher";

/// Routes every request to the query handler for its variant and wraps the result in a response carrying the
/// request's key. Handler failures become error responses.
pub struct RequestDispatcher<B, C> {
    inbound_handlers: InboundNodeCommsHandlers<B, C>,
}

impl<B, C> RequestDispatcher<B, C>
where
    B: BlockchainBackend + 'static,
    C: BlockTemplateCalculator + 'static,
{
    pub fn new(inbound_handlers: InboundNodeCommsHandlers<B, C>) -> Self {
        Self { inbound_handlers }
    }

    pub async fn dispatch(&self, request: BaseNodeServiceRequest) -> BaseNodeServiceResponse {
        let BaseNodeServiceRequest { request_key, request } = request;
        let variant = request.variant();
        match self.inbound_handlers.handle_request(request).await {
            Ok(response) => {
                trace!(target: LOG_TARGET, "{} request {} answered with {}", variant, request_key, response);
                BaseNodeServiceResponse::success(request_key, response)
            },
            Err(err) => {
                let error = RequestError::from(&err);
                match error.kind {
                    ErrorKind::NotFound => {
                        debug!(target: LOG_TARGET, "{} request {}: {}", variant, request_key, err)
                    },
                    _ => warn!(
                        target: LOG_TARGET,
                        "{} request {} failed with {}: {}", variant, request_key, error.kind, err
                    ),
                }
                BaseNodeServiceResponse::failure(request_key, error)
            },
        }
    }
}

impl<B, C> Clone for RequestDispatcher<B, C> {
    fn clone(&self) -> Self {
        Self {
            inbound_handlers: self.inbound_handlers.clone(),
        }
    }
}
