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

#[allow(dead_code)]
mod helpers;

use std::{convert::TryFrom, sync::atomic::Ordering};

use helpers::{create_kernel, create_output, create_service, CountingBackend, OfflineBackend, TestChain};
use prost::{encoding::decode_key, Message};
use strum::IntoEnumIterator;
use tari_base_node_service::{
    base_node::{
        comms_interface::{ErrorKind, GetNewBlockTemplateRequest, NodeCommsRequest, NodeCommsResponse, RequestVariant},
        service::{BaseNodeService, BaseNodeServiceConfig, BaseNodeServiceRequest, BaseNodeServiceResponse},
    },
    chain_storage::{BlockchainBackend, MemoryDatabase},
    consts::SENTINEL_REQUEST_KEY,
    mining::BlockTemplateCalculator,
    proof_of_work::PowAlgorithm,
    proto::{base_node as proto, types::Commitment as ProtoCommitment},
    types::HashOutput,
};

fn encode_request(request_key: u64, request: NodeCommsRequest) -> Vec<u8> {
    proto::BaseNodeServiceRequest::from(BaseNodeServiceRequest { request_key, request }).encode_to_vec()
}

fn decode_response(bytes: &[u8]) -> BaseNodeServiceResponse {
    let response = proto::BaseNodeServiceResponse::decode(bytes).expect("response must always decode");
    BaseNodeServiceResponse::try_from(response).unwrap()
}

async fn send_request<B, C>(
    service: &BaseNodeService<B, C>,
    request_key: u64,
    request: NodeCommsRequest,
) -> BaseNodeServiceResponse
where
    B: BlockchainBackend + 'static,
    C: BlockTemplateCalculator + 'static,
{
    decode_response(&service.handle(&encode_request(request_key, request)).await)
}

/// A request of the given variant that the test chain can answer
fn sample_request(variant: RequestVariant, chain: &TestChain) -> NodeCommsRequest {
    match variant {
        RequestVariant::GetChainMetadata => NodeCommsRequest::GetChainMetadata,
        RequestVariant::FetchKernels => NodeCommsRequest::FetchKernels(vec![create_kernel(1).hash()]),
        RequestVariant::FetchHeaders => NodeCommsRequest::FetchHeaders(vec![1, 2]),
        RequestVariant::FetchHeadersWithHashes => {
            NodeCommsRequest::FetchHeadersWithHashes(vec![chain.blocks[3].hash()])
        },
        RequestVariant::FetchMatchingUtxos => NodeCommsRequest::FetchMatchingUtxos(vec![create_output(2).hash()]),
        RequestVariant::FetchMatchingBlocks => NodeCommsRequest::FetchMatchingBlocks(vec![0]),
        RequestVariant::FetchBlocksWithHashes => NodeCommsRequest::FetchBlocksWithHashes(vec![chain.tip().hash()]),
        RequestVariant::GetNewBlockTemplate => NodeCommsRequest::GetNewBlockTemplate(GetNewBlockTemplateRequest {
            algo: PowAlgorithm::RandomX,
            max_weight: 0,
        }),
        RequestVariant::FetchHeadersAfter => NodeCommsRequest::FetchHeadersAfter {
            hashes: vec![chain.blocks[2].hash()],
            stopping_hash: HashOutput::zero(),
        },
        RequestVariant::FetchMatchingTxos => NodeCommsRequest::FetchMatchingTxos(vec![create_output(1).hash()]),
        RequestVariant::FetchBlocksWithKernels => {
            NodeCommsRequest::FetchBlocksWithKernels(vec![create_kernel(2).excess_sig])
        },
        RequestVariant::FetchBlocksWithStxos => {
            NodeCommsRequest::FetchBlocksWithStxos(vec![create_output(1).commitment])
        },
        RequestVariant::FetchBlocksWithUtxos => {
            NodeCommsRequest::FetchBlocksWithUtxos(vec![create_output(3).commitment])
        },
        RequestVariant::GetHeaderByHash => NodeCommsRequest::GetHeaderByHash(chain.blocks[1].hash()),
        RequestVariant::GetBlockByHash => NodeCommsRequest::GetBlockByHash(chain.blocks[2].hash()),
    }
}

#[tokio::test]
async fn every_variant_is_answered_with_its_request_key() {
    let chain = TestChain::new();
    let service = create_service(chain.db.clone(), BaseNodeServiceConfig::default());
    for variant in RequestVariant::iter() {
        let request_key = 1_000 + u64::from(variant.tag());
        let req = sample_request(variant, &chain);
        assert_eq!(req.variant(), variant);
        let response = send_request(&service, request_key, req).await;
        assert_eq!(response.request_key, request_key, "{}", variant);
        assert!(response.is_success(), "{} failed: {:?}", variant, response.outcome);
    }
    assert!(service.correlator().is_empty());
}

#[test]
fn every_variant_is_encoded_with_its_tag() {
    let chain = TestChain::new();
    for variant in RequestVariant::iter() {
        // A zero key is not written, so the variant is the first field
        let bytes = encode_request(0, sample_request(variant, &chain));
        let (tag, _) = decode_key(&mut bytes.as_slice()).unwrap();
        assert_eq!(tag, variant.tag(), "{}", variant);
    }
    let tags = RequestVariant::iter().map(RequestVariant::tag).collect::<Vec<_>>();
    assert_eq!(tags, vec![2, 3, 4, 5, 6, 7, 8, 9, 12, 15, 16, 17, 18, 19, 20]);
}

#[tokio::test]
async fn query_results_reflect_the_chain() {
    let chain = TestChain::new();
    let service = create_service(chain.db.clone(), BaseNodeServiceConfig::default());

    let response = send_request(&service, 1, NodeCommsRequest::GetChainMetadata).await;
    match response.outcome.unwrap() {
        NodeCommsResponse::ChainMetadata(metadata) => {
            assert_eq!(metadata.best_block_height(), 5);
            assert_eq!(metadata.best_block_hash(), &chain.tip().hash());
        },
        other => panic!("Unexpected response {}", other),
    }

    let hashes = vec![create_output(1).hash(), create_output(2).hash(), create_output(3).hash()];
    let response = send_request(&service, 2, NodeCommsRequest::FetchMatchingUtxos(hashes.clone())).await;
    assert_eq!(
        response.outcome.unwrap(),
        NodeCommsResponse::TransactionOutputs(vec![create_output(2), create_output(3)])
    );
    let response = send_request(&service, 3, NodeCommsRequest::FetchMatchingTxos(hashes)).await;
    assert_eq!(
        response.outcome.unwrap(),
        NodeCommsResponse::TransactionOutputs(vec![create_output(1), create_output(2), create_output(3)])
    );

    let response = send_request(
        &service,
        4,
        NodeCommsRequest::FetchBlocksWithStxos(vec![create_output(1).commitment]),
    )
    .await;
    match response.outcome.unwrap() {
        NodeCommsResponse::HistoricalBlocks(blocks) => {
            assert_eq!(blocks.len(), 1);
            assert_eq!(blocks[0].block(), &chain.blocks[2]);
            assert_eq!(blocks[0].confirmations, 4);
        },
        other => panic!("Unexpected response {}", other),
    }

    let response = send_request(
        &service,
        5,
        NodeCommsRequest::FetchHeadersAfter {
            hashes: vec![chain.blocks[1].hash()],
            stopping_hash: chain.blocks[4].hash(),
        },
    )
    .await;
    match response.outcome.unwrap() {
        NodeCommsResponse::FetchHeadersAfterResponse(headers) => {
            let heights = headers.iter().map(|h| h.height).collect::<Vec<_>>();
            assert_eq!(heights, vec![2, 3, 4]);
        },
        other => panic!("Unexpected response {}", other),
    }
}

#[tokio::test]
async fn new_block_templates_build_on_the_tip() {
    let chain = TestChain::new();
    let config = BaseNodeServiceConfig {
        max_block_weight: 1_000,
        ..Default::default()
    };
    let service = create_service(chain.db.clone(), config);
    for (requested, expected) in [(0, 1_000), (400, 400), (5_000, 1_000)] {
        let response = send_request(
            &service,
            7,
            NodeCommsRequest::GetNewBlockTemplate(GetNewBlockTemplateRequest {
                algo: PowAlgorithm::Sha3x,
                max_weight: requested,
            }),
        )
        .await;
        match response.outcome.unwrap() {
            NodeCommsResponse::NewBlockTemplate(template) => {
                assert_eq!(template.header.height, 6);
                assert_eq!(template.header.prev_hash, chain.tip().hash());
                assert_eq!(template.header.pow_algo, PowAlgorithm::Sha3x);
                // The calculator reports the weight limit it was given as the target difficulty
                assert_eq!(template.target_difficulty, expected);
            },
            other => panic!("Unexpected response {}", other),
        }
    }
}

#[tokio::test]
async fn empty_lists_are_answered_with_empty_results() {
    let chain = TestChain::new();
    let service = create_service(chain.db.clone(), BaseNodeServiceConfig::default());
    let requests = vec![
        (NodeCommsRequest::FetchKernels(vec![]), NodeCommsResponse::TransactionKernels(vec![])),
        (NodeCommsRequest::FetchHeaders(vec![]), NodeCommsResponse::BlockHeaders(vec![])),
        (NodeCommsRequest::FetchMatchingTxos(vec![]), NodeCommsResponse::TransactionOutputs(vec![])),
        (NodeCommsRequest::FetchMatchingBlocks(vec![]), NodeCommsResponse::HistoricalBlocks(vec![])),
        (NodeCommsRequest::FetchBlocksWithKernels(vec![]), NodeCommsResponse::HistoricalBlocks(vec![])),
        (
            NodeCommsRequest::FetchHeadersAfter {
                hashes: vec![],
                stopping_hash: HashOutput::zero(),
            },
            NodeCommsResponse::FetchHeadersAfterResponse(vec![]),
        ),
    ];
    for (i, (req, expected)) in requests.into_iter().enumerate() {
        let response = send_request(&service, i as u64 + 1, req).await;
        assert_eq!(response.outcome.unwrap(), expected);
    }
}

#[tokio::test]
async fn malformed_payloads_never_reach_the_store() {
    let chain = TestChain::new();
    let backend = CountingBackend::new(chain.db.clone());
    let counter = backend.counter();
    let service = create_service(backend, BaseNodeServiceConfig::default());

    let malformed = vec![
        proto::base_node_service_request::Request::FetchKernels(proto::HashOutputs {
            outputs: vec![vec![0u8; 32], vec![1u8; 31]],
        }),
        proto::base_node_service_request::Request::GetBlockByHash(vec![1u8; 33]),
        proto::base_node_service_request::Request::FetchBlocksWithUtxos(proto::Commitments {
            commitments: vec![ProtoCommitment { data: vec![1u8; 8] }],
        }),
        proto::base_node_service_request::Request::GetNewBlockTemplate(proto::NewBlockTemplateRequest {
            algo: 99,
            max_weight: 0,
        }),
    ];
    for (i, req) in malformed.into_iter().enumerate() {
        let request_key = 50 + i as u64;
        let bytes = proto::BaseNodeServiceRequest {
            request_key,
            request: Some(req),
        }
        .encode_to_vec();
        let response = decode_response(&service.handle(&bytes).await);
        assert_eq!(response.request_key, request_key);
        assert_eq!(response.error_kind(), Some(ErrorKind::MalformedPayload));
    }

    let bytes = proto::BaseNodeServiceRequest {
        request_key: 60,
        request: None,
    }
    .encode_to_vec();
    let response = decode_response(&service.handle(&bytes).await);
    assert_eq!(response.request_key, 60);
    assert_eq!(response.error_kind(), Some(ErrorKind::MalformedPayload));

    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn undecodable_requests_are_answered() {
    let service = create_service(TestChain::new().db, BaseNodeServiceConfig::default());

    let response = decode_response(&service.handle(&[0xff, 0xff, 0xff, 0xff]).await);
    assert_eq!(response.request_key, SENTINEL_REQUEST_KEY);
    assert_eq!(response.error_kind(), Some(ErrorKind::DecodeError));

    // Empty bytes are a valid message without a variant
    let response = decode_response(&service.handle(&[]).await);
    assert_eq!(response.request_key, SENTINEL_REQUEST_KEY);
    assert_eq!(response.error_kind(), Some(ErrorKind::MalformedPayload));

    // The key field may follow the variant in a well-formed message
    let mut bytes = encode_request(0, NodeCommsRequest::FetchHeaders(vec![1]));
    bytes.extend_from_slice(&[0x08, 0x4d]);
    let response = decode_response(&service.handle(&bytes).await);
    assert_eq!(response.request_key, 77);
    assert!(response.is_success());

    // but it is only recovered from a corrupt message when it is the first field
    bytes.extend_from_slice(&[0x22, 0x05]);
    let response = decode_response(&service.handle(&bytes).await);
    assert_eq!(response.request_key, SENTINEL_REQUEST_KEY);
    assert_eq!(response.error_kind(), Some(ErrorKind::DecodeError));

    // The key is intact but the variant that follows it is truncated
    let mut bytes = encode_request(4242, NodeCommsRequest::FetchHeaders(vec![1, 2, 3]));
    bytes.truncate(bytes.len() - 2);
    let response = decode_response(&service.handle(&bytes).await);
    assert_eq!(response.request_key, 4242);
    assert_eq!(response.error_kind(), Some(ErrorKind::DecodeError));
}

#[tokio::test]
async fn missing_data_is_distinguished_from_unavailable_storage() {
    let chain = TestChain::new();
    let service = create_service(chain.db.clone(), BaseNodeServiceConfig::default());
    let unknown = HashOutput::from([0xaa; 32]);

    let response = send_request(&service, 1, NodeCommsRequest::GetHeaderByHash(unknown)).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
    let response = send_request(&service, 2, NodeCommsRequest::GetBlockByHash(unknown)).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
    let response = send_request(&service, 3, NodeCommsRequest::FetchBlocksWithHashes(vec![unknown])).await;
    assert_eq!(response.outcome.unwrap(), NodeCommsResponse::HistoricalBlocks(vec![]));

    let offline = create_service(OfflineBackend, BaseNodeServiceConfig::default());
    let response = send_request(&offline, 4, NodeCommsRequest::GetHeaderByHash(unknown)).await;
    let kind = response.error_kind().unwrap();
    assert_eq!(kind, ErrorKind::StorageUnavailable);
    assert!(kind.is_retryable());
    let response = send_request(&offline, 5, NodeCommsRequest::FetchHeaders(vec![1])).await;
    assert_eq!(response.error_kind(), Some(ErrorKind::StorageUnavailable));
    assert!(offline.correlator().is_empty());
}

#[tokio::test]
async fn duplicate_keys_are_rejected() {
    let service = create_service(TestChain::new().db, BaseNodeServiceConfig::default());
    let _in_flight = service
        .correlator()
        .register(11, RequestVariant::FetchMatchingBlocks)
        .unwrap();

    let response = send_request(&service, 11, NodeCommsRequest::GetChainMetadata).await;
    assert_eq!(response.request_key, 11);
    assert_eq!(response.error_kind(), Some(ErrorKind::DuplicateKey));
    assert!(service.correlator().is_pending(11));

    let response = send_request(&service, 12, NodeCommsRequest::GetChainMetadata).await;
    assert!(response.is_success());
}

#[tokio::test]
async fn duplicate_keys_are_answered_without_suppression() {
    let config = BaseNodeServiceConfig {
        duplicate_suppression: false,
        ..Default::default()
    };
    let service = create_service(TestChain::new().db, config);
    let _in_flight = service
        .correlator()
        .register(11, RequestVariant::FetchMatchingBlocks)
        .unwrap();
    let response = send_request(&service, 11, NodeCommsRequest::GetChainMetadata).await;
    assert!(response.is_success());
}

#[tokio::test]
async fn requests_beyond_the_pending_limit_are_busy() {
    let config = BaseNodeServiceConfig {
        max_pending_requests: 1,
        ..Default::default()
    };
    let service = create_service(MemoryDatabase::new(TestChain::new().blocks[0].clone()), config);
    let _in_flight = service.correlator().register(1, RequestVariant::GetChainMetadata).unwrap();

    let response = send_request(&service, 2, NodeCommsRequest::GetChainMetadata).await;
    let kind = response.error_kind().unwrap();
    assert_eq!(kind, ErrorKind::Busy);
    assert!(kind.is_retryable());
}
