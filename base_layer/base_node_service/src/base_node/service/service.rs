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

use std::{convert::TryFrom, sync::Arc};

use log::*;
use prost::{
    encoding::{decode_key, decode_varint, WireType},
    Message,
};

use crate::{
    base_node::{
        comms_interface::InboundNodeCommsHandlers,
        service::{
            BaseNodeServiceConfig,
            BaseNodeServiceError,
            BaseNodeServiceRequest,
            BaseNodeServiceResponse,
            RequestCorrelator,
            RequestDispatcher,
            RequestError,
            RequestKey,
            RequestSweeper,
        },
    },
    chain_storage::{BlockchainBackend, BlockchainDatabase},
    consts::SENTINEL_REQUEST_KEY,
    mining::BlockTemplateCalculator,
    proto::base_node as proto,
};

const LOG_TARGET: &str = "c::bn::service";

/// The Base Node Service answers serialized requests from remote base nodes with serialized responses. Every
/// response carries the key of the request it answers, and malformed requests are answered with an error response
/// rather than dropped.
pub struct BaseNodeService<B, C> {
    correlator: Arc<RequestCorrelator>,
    dispatcher: RequestDispatcher<B, C>,
    config: BaseNodeServiceConfig,
}

impl<B, C> BaseNodeService<B, C>
where
    B: BlockchainBackend + 'static,
    C: BlockTemplateCalculator + 'static,
{
    pub fn new(
        blockchain_db: BlockchainDatabase<B>,
        template_calculator: Arc<C>,
        config: BaseNodeServiceConfig,
    ) -> Self {
        let inbound_handlers =
            InboundNodeCommsHandlers::new(blockchain_db, template_calculator, config.max_block_weight);
        Self {
            correlator: Arc::new(RequestCorrelator::new(config.max_pending_requests)),
            dispatcher: RequestDispatcher::new(inbound_handlers),
            config,
        }
    }

    /// The correlator tracking the requests that are being answered
    pub fn correlator(&self) -> &Arc<RequestCorrelator> {
        &self.correlator
    }

    /// A sweeper that expires requests whose answer takes longer than the request timeout
    pub fn sweeper(&self) -> RequestSweeper {
        RequestSweeper::new(self.correlator.clone(), &self.config)
    }

    /// Decodes a `BaseNodeServiceRequest`, answers it and returns the encoded `BaseNodeServiceResponse`. The returned
    /// bytes always decode to a response, even if the request could not be read.
    pub async fn handle(&self, raw: &[u8]) -> Vec<u8> {
        let response = match decode_request(raw) {
            Ok(request) => self.handle_request(request).await,
            Err(response) => response,
        };
        proto::BaseNodeServiceResponse::from(response).encode_to_vec()
    }

    /// Answers a decoded request.
    pub async fn handle_request(&self, request: BaseNodeServiceRequest) -> BaseNodeServiceResponse {
        let request_key = request.request_key;
        debug!(target: LOG_TARGET, "Handling request {}", request);
        if !self.config.duplicate_suppression {
            return self.dispatcher.dispatch(request).await;
        }

        let registration = match self.correlator.register(request_key, request.request.variant()) {
            Ok(handle) => RegisteredRequest {
                correlator: &self.correlator,
                request_key: handle.request_key(),
                generation: handle.generation(),
                completed: false,
            },
            Err(err) => {
                warn!(target: LOG_TARGET, "Rejecting request {}: {}", request_key, err);
                let err = BaseNodeServiceError::from(err);
                return BaseNodeServiceResponse::failure(request_key, RequestError::from(&err));
            },
        };

        let response = self.dispatcher.dispatch(request).await;
        registration.complete(response)
    }
}

impl<B, C> Clone for BaseNodeService<B, C> {
    fn clone(&self) -> Self {
        Self {
            correlator: self.correlator.clone(),
            dispatcher: self.dispatcher.clone(),
            config: self.config.clone(),
        }
    }
}

/// A request registered with the correlator while it is answered. The entry is cancelled if the request is dropped
/// before it completes. Only the entry of this registration is touched, never one registered later under the same key.
struct RegisteredRequest<'a> {
    correlator: &'a RequestCorrelator,
    request_key: RequestKey,
    generation: u64,
    completed: bool,
}

impl RegisteredRequest<'_> {
    fn complete(mut self, response: BaseNodeServiceResponse) -> BaseNodeServiceResponse {
        self.completed = true;
        match self
            .correlator
            .resolve_if(self.request_key, self.generation, response.outcome.clone())
        {
            Ok(response) => response,
            Err(err) => {
                // The request outlived the request timeout, the answer is still valid
                debug!(target: LOG_TARGET, "Request {} completed after it was swept: {}", self.request_key, err);
                response
            },
        }
    }
}

impl Drop for RegisteredRequest<'_> {
    fn drop(&mut self) {
        if !self.completed && self.correlator.cancel_if(self.request_key, self.generation) {
            debug!(target: LOG_TARGET, "Request {} was abandoned before it was answered", self.request_key);
        }
    }
}

fn decode_request(raw: &[u8]) -> Result<BaseNodeServiceRequest, BaseNodeServiceResponse> {
    let request = proto::BaseNodeServiceRequest::decode(raw).map_err(|err| {
        let request_key = peek_request_key(raw);
        warn!(target: LOG_TARGET, "Failed to decode request {}: {}", request_key, err);
        let err = BaseNodeServiceError::from(err);
        BaseNodeServiceResponse::failure(request_key, RequestError::from(&err))
    })?;
    let request_key = request.request_key;
    BaseNodeServiceRequest::try_from(request).map_err(|err| {
        warn!(target: LOG_TARGET, "Malformed request {}: {}", request_key, err);
        let err = BaseNodeServiceError::InvalidRequest(err);
        BaseNodeServiceResponse::failure(request_key, RequestError::from(&err))
    })
}

/// Reads the request key of a message that could not be decoded. The key is only recovered if it is the first field
/// and intact, otherwise the sentinel key is returned.
fn peek_request_key(raw: &[u8]) -> RequestKey {
    let mut buf = raw;
    match decode_key(&mut buf) {
        Ok((1, WireType::Varint)) => decode_varint(&mut buf).unwrap_or(SENTINEL_REQUEST_KEY),
        _ => SENTINEL_REQUEST_KEY,
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::{
        base_node::comms_interface::{ErrorKind, NodeCommsRequest, NodeCommsResponse, RequestVariant},
        chain_storage::MemoryDatabase,
        test_helpers::{create_chain, MockTemplateCalculator},
    };

    fn create_service(db: MemoryDatabase) -> BaseNodeService<MemoryDatabase, MockTemplateCalculator> {
        BaseNodeService::new(
            BlockchainDatabase::new(db),
            Arc::new(MockTemplateCalculator::default()),
            BaseNodeServiceConfig::default(),
        )
    }

    fn decode_response(bytes: &[u8]) -> BaseNodeServiceResponse {
        let response = proto::BaseNodeServiceResponse::decode(bytes).unwrap();
        BaseNodeServiceResponse::try_from(response).unwrap()
    }

    #[test]
    fn it_peeks_the_request_key() {
        let mut bytes = proto::BaseNodeServiceRequest {
            request_key: 300,
            request: None,
        }
        .encode_to_vec();
        assert_eq!(peek_request_key(&bytes), 300);
        bytes.extend_from_slice(&[0xff, 0xff]);
        assert_eq!(peek_request_key(&bytes), 300);
        assert_eq!(peek_request_key(&[]), SENTINEL_REQUEST_KEY);
        assert_eq!(peek_request_key(&[0x12, 0x00]), SENTINEL_REQUEST_KEY);
    }

    #[tokio::test]
    async fn it_answers_with_the_request_key() {
        let (db, _) = create_chain(2);
        let service = create_service(db);
        let request = BaseNodeServiceRequest {
            request_key: 77,
            request: NodeCommsRequest::GetChainMetadata,
        };
        let bytes = proto::BaseNodeServiceRequest::from(request).encode_to_vec();
        let response = decode_response(&service.handle(&bytes).await);
        assert_eq!(response.request_key, 77);
        unpack_enum!(NodeCommsResponse::ChainMetadata(metadata) = response.outcome.unwrap());
        assert_eq!(metadata.best_block_height(), 1);
        assert!(service.correlator().is_empty());
    }

    #[tokio::test]
    async fn abandoned_requests_are_cancelled() {
        let (db, _) = create_chain(1);
        let service = create_service(db);
        let handle = service
            .correlator()
            .register(5, RequestVariant::GetChainMetadata)
            .unwrap();
        {
            let _registration = RegisteredRequest {
                correlator: service.correlator(),
                request_key: handle.request_key(),
                generation: handle.generation(),
                completed: false,
            };
        }
        assert!(!service.correlator().is_pending(5));
        assert!(handle.resolved().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn swept_requests_do_not_complete_a_retry() {
        let (db, _) = create_chain(1);
        let service = create_service(db);
        let correlator = service.correlator();
        let first = correlator.register(5, RequestVariant::GetChainMetadata).unwrap();
        let first_request = RegisteredRequest {
            correlator,
            request_key: 5,
            generation: first.generation(),
            completed: false,
        };
        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(service.sweeper().sweep(), 1);

        // The requester retries with the same key while the first request is still being answered
        let retry = correlator.register(5, RequestVariant::GetChainMetadata).unwrap();
        let response = first_request.complete(BaseNodeServiceResponse::failure(
            5,
            RequestError::new(ErrorKind::NotFound, "late"),
        ));
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert!(correlator.is_pending(5));

        let duplicate = service
            .handle_request(BaseNodeServiceRequest {
                request_key: 5,
                request: NodeCommsRequest::GetChainMetadata,
            })
            .await;
        assert_eq!(duplicate.error_kind(), Some(ErrorKind::DuplicateKey));

        {
            let _abandoned = RegisteredRequest {
                correlator,
                request_key: 5,
                generation: first.generation(),
                completed: false,
            };
        }
        assert!(correlator.is_pending(5));

        let retry_request = RegisteredRequest {
            correlator,
            request_key: 5,
            generation: retry.generation(),
            completed: false,
        };
        let response =
            retry_request.complete(BaseNodeServiceResponse::success(5, NodeCommsResponse::BlockHeaders(vec![])));
        assert!(response.is_success());
        assert_eq!(retry.resolved().await.unwrap(), response);
        assert!(correlator.is_empty());
    }

    #[tokio::test]
    async fn duplicate_keys_are_rejected_while_pending() {
        let (db, _) = create_chain(1);
        let service = create_service(db);
        let _handle = service
            .correlator()
            .register(9, RequestVariant::GetChainMetadata)
            .unwrap();
        let response = service
            .handle_request(BaseNodeServiceRequest {
                request_key: 9,
                request: NodeCommsRequest::GetChainMetadata,
            })
            .await;
        assert_eq!(response.request_key, 9);
        assert_eq!(response.error_kind(), Some(ErrorKind::DuplicateKey));
        // The pending request is left untouched
        assert!(service.correlator().is_pending(9));
    }
}
