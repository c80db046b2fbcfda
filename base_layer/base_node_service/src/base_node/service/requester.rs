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

use std::{convert::TryFrom, future::Future, sync::Arc};

use futures::{channel::oneshot, pin_mut, FutureExt, Stream, StreamExt};
use log::*;
use prost::Message;
use rand::rngs::OsRng;
use tokio::task;

use crate::{
    base_node::{
        comms_interface::{
            CommsInterfaceError,
            ErrorKind,
            NodeCommsRequest,
            NodeCommsResponse,
            OutboundNodeCommsInterface,
        },
        service::{
            generate_request_key,
            BaseNodeServiceConfig,
            BaseNodeServiceError,
            BaseNodeServiceRequest,
            BaseNodeServiceResponse,
            CorrelatorError,
            OutboundMessageSender,
            PendingHandle,
            RequestCorrelator,
            RequestError,
            RequestSweeper,
        },
    },
    consts::{BASE_NODE_SERVICE_OUTBOUND_REQUEST_BUFFER, REQUEST_KEY_GENERATION_ATTEMPTS},
    proto::base_node as proto,
    reply_channel::{self, Receiver},
};

const LOG_TARGET: &str = "c::bn::service::requester";

type ReplySender = oneshot::Sender<Result<NodeCommsResponse, CommsInterfaceError>>;

/// Sends the requests made through an [OutboundNodeCommsInterface] to a remote base node and hands every response
/// that arrives on the response stream to the caller waiting for it.
pub struct OutboundRequestService<T, S> {
    requester: Requester<T>,
    config: BaseNodeServiceConfig,
    request_stream: Receiver<NodeCommsRequest, Result<NodeCommsResponse, CommsInterfaceError>>,
    response_stream: S,
}

impl<T, S> OutboundRequestService<T, S>
where
    T: OutboundMessageSender + 'static,
    S: Stream<Item = Vec<u8>>,
{
    /// Creates the service and the interface that local services use to make requests through it. `response_stream`
    /// yields the encoded `BaseNodeServiceResponse` messages received from the remote node.
    pub fn new(
        config: BaseNodeServiceConfig,
        outbound_message_sender: T,
        response_stream: S,
    ) -> (Self, OutboundNodeCommsInterface) {
        let (request_sender, request_stream) = reply_channel::channel(BASE_NODE_SERVICE_OUTBOUND_REQUEST_BUFFER);
        let service = Self {
            requester: Requester {
                correlator: Arc::new(RequestCorrelator::new(config.max_pending_requests)),
                outbound_message_sender: Arc::new(outbound_message_sender),
            },
            config,
            request_stream,
            response_stream,
        };
        (service, OutboundNodeCommsInterface::new(request_sender))
    }

    /// The correlator tracking the requests that wait for a response
    pub fn correlator(&self) -> &Arc<RequestCorrelator> {
        &self.requester.correlator
    }

    /// A sweeper that fails the requests that are not answered within the request timeout
    pub fn sweeper(&self) -> RequestSweeper {
        RequestSweeper::new(self.requester.correlator.clone(), &self.config)
    }

    /// Runs the service until `shutdown` resolves or both the request and the response stream have ended.
    pub async fn run<F>(self, shutdown: F)
    where F: Future<Output = ()> {
        let Self {
            requester,
            request_stream,
            response_stream,
            ..
        } = self;
        let mut request_stream = request_stream.fuse();
        let response_stream = response_stream.fuse();
        pin_mut!(response_stream);
        let shutdown = shutdown.fuse();
        pin_mut!(shutdown);

        info!(target: LOG_TARGET, "Outbound request service started");
        loop {
            futures::select! {
                // Outbound requests made by local services
                request_context = request_stream.select_next_some() => {
                    let (request, reply_tx) = request_context.split();
                    requester.handle_outbound_request(request, reply_tx);
                },

                // Responses from the remote base node
                response_bytes = response_stream.select_next_some() => {
                    match requester.handle_incoming_response(&response_bytes) {
                        Ok(()) => {},
                        Err(BaseNodeServiceError::CorrelatorError(CorrelatorError::UnknownKey(request_key))) => {
                            debug!(target: LOG_TARGET, "Discarding stale response for request {}", request_key);
                        },
                        Err(err) => {
                            warn!(target: LOG_TARGET, "Discarding invalid response: {}", err);
                        },
                    }
                },

                _ = shutdown => {
                    info!(
                        target: LOG_TARGET,
                        "Outbound request service shutting down because it received the shutdown signal"
                    );
                    break;
                },

                complete => {
                    info!(target: LOG_TARGET, "Outbound request service shutting down because all streams ended");
                    break;
                }
            }
        }
    }
}

struct Requester<T> {
    correlator: Arc<RequestCorrelator>,
    outbound_message_sender: Arc<T>,
}

impl<T> Requester<T>
where T: OutboundMessageSender + 'static
{
    fn handle_outbound_request(&self, request: NodeCommsRequest, reply_tx: ReplySender) {
        let handle = match self.register(&request) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(target: LOG_TARGET, "Could not register {} request: {}", request, err);
                let _ = reply_tx.send(Err(err.into()));
                return;
            },
        };
        let request_key = handle.request_key();
        let generation = handle.generation();
        debug!(target: LOG_TARGET, "Sending {} request with key {}", request, request_key);
        let message =
            proto::BaseNodeServiceRequest::from(BaseNodeServiceRequest { request_key, request }).encode_to_vec();

        let correlator = self.correlator.clone();
        let outbound_message_sender = self.outbound_message_sender.clone();
        task::spawn(async move {
            if let Err(err) = outbound_message_sender.send_message(message).await {
                warn!(target: LOG_TARGET, "Failed to send request {}: {}", request_key, err);
                correlator.cancel_if(request_key, generation);
                let _ = reply_tx.send(Err(err.into()));
                return;
            }
            wait_for_response(correlator, handle, reply_tx).await;
        });
    }

    /// Registers the request under a fresh key. A key that collides with a pending request is replaced by another.
    fn register(&self, request: &NodeCommsRequest) -> Result<PendingHandle, CorrelatorError> {
        let mut attempts = 1;
        loop {
            match self
                .correlator
                .register(generate_request_key(&mut OsRng), request.variant())
            {
                Err(CorrelatorError::DuplicateKey(request_key)) if attempts < REQUEST_KEY_GENERATION_ATTEMPTS => {
                    debug!(target: LOG_TARGET, "Request key {} is in use, generating another", request_key);
                    attempts += 1;
                },
                result => return result,
            }
        }
    }

    fn handle_incoming_response(&self, bytes: &[u8]) -> Result<(), BaseNodeServiceError> {
        let response = proto::BaseNodeServiceResponse::decode(bytes)?;
        let request_key = response.request_key;
        let outcome = match BaseNodeServiceResponse::try_from(response) {
            Ok(response) => response.outcome,
            Err(err) => {
                // Fail the waiting caller now rather than at the timeout
                warn!(target: LOG_TARGET, "Invalid response for request {}: {}", request_key, err);
                let err = BaseNodeServiceError::InvalidResponse(err);
                Err(RequestError::new(ErrorKind::MalformedPayload, err.to_string()))
            },
        };
        let response = self.correlator.resolve(request_key, outcome)?;
        trace!(target: LOG_TARGET, "Received response {}", response);
        Ok(())
    }
}

async fn wait_for_response(correlator: Arc<RequestCorrelator>, handle: PendingHandle, mut reply_tx: ReplySender) {
    let request_key = handle.request_key();
    let generation = handle.generation();
    let result = tokio::select! {
        result = handle.resolved() => result,
        _ = reply_tx.cancellation() => {
            debug!(target: LOG_TARGET, "Caller of request {} stopped waiting for the response", request_key);
            correlator.cancel_if(request_key, generation);
            return;
        },
    };
    let result = match result {
        Ok(BaseNodeServiceResponse {
            outcome: Ok(response), ..
        }) => Ok(response),
        Ok(BaseNodeServiceResponse { outcome: Err(err), .. }) => Err(err.into()),
        Err(CorrelatorError::TimedOut(_)) => Err(CommsInterfaceError::RequestTimedOut),
        Err(CorrelatorError::Cancelled(_)) => Err(CommsInterfaceError::RequestCancelled),
        Err(err) => Err(err.into()),
    };
    // The caller may have given up on the request in the meantime
    let _ = reply_tx.send(result);
}
