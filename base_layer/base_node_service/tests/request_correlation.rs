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

use std::{convert::TryFrom, sync::Arc, time::Duration};

use futures::future;
use helpers::{create_service, TestChain};
use prost::Message;
use tari_base_node_service::{
    base_node::{
        comms_interface::{NodeCommsRequest, NodeCommsResponse, RequestVariant},
        service::{
            BaseNodeServiceConfig,
            BaseNodeServiceRequest,
            BaseNodeServiceResponse,
            CorrelatorError,
            RequestCorrelator,
        },
    },
    blocks::BlockHeader,
    proto::base_node as proto,
};
use tokio::time::{self, Instant};

const NUM_REQUESTS: u64 = 1_000;

fn header_at(height: u64) -> BlockHeader {
    let mut header = BlockHeader::new(1);
    header.height = height;
    header
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_waiter_receives_its_own_response() {
    let correlator = Arc::new(RequestCorrelator::new(NUM_REQUESTS as usize));
    let handles = (1..=NUM_REQUESTS)
        .map(|key| correlator.register(key, RequestVariant::FetchHeaders).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(correlator.len(), NUM_REQUESTS as usize);

    let waiters = handles
        .into_iter()
        .map(|handle| tokio::spawn(handle.resolved()))
        .collect::<Vec<_>>();

    // Resolve in reverse order from several tasks at once
    let resolvers = (0..4u64)
        .map(|worker| {
            let correlator = correlator.clone();
            tokio::spawn(async move {
                for key in (1..=NUM_REQUESTS).rev().filter(|key| key % 4 == worker) {
                    let outcome = Ok(NodeCommsResponse::BlockHeaders(vec![header_at(key)]));
                    correlator.resolve(key, outcome).unwrap();
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect::<Vec<_>>();
    for resolver in future::join_all(resolvers).await {
        resolver.unwrap();
    }

    for (i, waiter) in future::join_all(waiters).await.into_iter().enumerate() {
        let response = waiter.unwrap().unwrap();
        let key = i as u64 + 1;
        assert_eq!(response.request_key, key);
        assert_eq!(
            response.outcome.unwrap(),
            NodeCommsResponse::BlockHeaders(vec![header_at(key)])
        );
    }
    assert!(correlator.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn each_key_is_completed_exactly_once() {
    let correlator = Arc::new(RequestCorrelator::new(NUM_REQUESTS as usize));
    let handles = (1..=NUM_REQUESTS)
        .map(|key| correlator.register(key, RequestVariant::GetChainMetadata).unwrap())
        .collect::<Vec<_>>();

    // Racing resolvers, cancellers and sweepers contend for every key
    let tasks = (0..6)
        .map(|worker| {
            let correlator = correlator.clone();
            tokio::spawn(async move {
                let mut completed = 0usize;
                for key in 1..=NUM_REQUESTS {
                    completed += match worker % 3 {
                        0 => usize::from(
                            correlator
                                .resolve(key, Ok(NodeCommsResponse::BlockHeaders(vec![])))
                                .is_ok(),
                        ),
                        1 => usize::from(correlator.cancel(key)),
                        _ => correlator.sweep(Instant::now(), Duration::ZERO).count(),
                    };
                }
                completed
            })
        })
        .collect::<Vec<_>>();
    let mut total = 0;
    for task in future::join_all(tasks).await {
        total += task.unwrap();
    }
    assert_eq!(total, NUM_REQUESTS as usize);
    assert!(correlator.is_empty());

    for handle in handles {
        let key = handle.request_key();
        match handle.resolved().await {
            Ok(response) => assert_eq!(response.request_key, key),
            Err(CorrelatorError::Cancelled(k)) | Err(CorrelatorError::TimedOut(k)) => assert_eq!(k, key),
            Err(err) => panic!("Unexpected completion {}", err),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_are_answered_with_their_keys() {
    let chain = TestChain::new();
    let service = create_service(chain.db.clone(), BaseNodeServiceConfig::default());

    let tasks = (1..=NUM_REQUESTS)
        .map(|request_key| {
            let service = service.clone();
            let height = request_key % 6;
            tokio::spawn(async move {
                let bytes = proto::BaseNodeServiceRequest::from(BaseNodeServiceRequest {
                    request_key,
                    request: NodeCommsRequest::FetchHeaders(vec![height]),
                })
                .encode_to_vec();
                let response = proto::BaseNodeServiceResponse::decode(service.handle(&bytes).await.as_slice()).unwrap();
                (request_key, height, BaseNodeServiceResponse::try_from(response).unwrap())
            })
        })
        .collect::<Vec<_>>();

    for task in future::join_all(tasks).await {
        let (request_key, height, response) = task.unwrap();
        assert_eq!(response.request_key, request_key);
        match response.outcome.unwrap() {
            NodeCommsResponse::BlockHeaders(headers) => {
                assert_eq!(headers.len(), 1);
                assert_eq!(headers[0], chain.blocks[height as usize].header);
            },
            other => panic!("Unexpected response {}", other),
        }
    }
    assert!(service.correlator().is_empty());
}

#[tokio::test(start_paused = true)]
async fn sweeps_expire_exactly_the_stale_requests() {
    let config = BaseNodeServiceConfig {
        request_timeout: Duration::from_secs(30),
        sweep_interval: Duration::from_secs(5),
        ..Default::default()
    };
    let service = create_service(TestChain::new().db, config);
    let correlator = service.correlator().clone();

    let stale = (1..=500)
        .map(|key| correlator.register(key, RequestVariant::FetchHeaders).unwrap())
        .collect::<Vec<_>>();
    time::advance(Duration::from_secs(20)).await;
    let fresh = (501..=1_000)
        .map(|key| correlator.register(key, RequestVariant::FetchHeaders).unwrap())
        .collect::<Vec<_>>();
    time::advance(Duration::from_secs(11)).await;

    let sweeper = service.sweeper();
    assert_eq!(sweeper.sweep(), 500);
    assert_eq!(sweeper.sweep(), 0);
    assert_eq!(correlator.len(), 500);

    for handle in stale {
        let key = handle.request_key();
        assert_eq!(handle.resolved().await.unwrap_err(), CorrelatorError::TimedOut(key));
    }
    for handle in fresh {
        let key = handle.request_key();
        assert!(correlator.is_pending(key));
        correlator.resolve(key, Ok(NodeCommsResponse::BlockHeaders(vec![]))).unwrap();
        assert_eq!(handle.resolved().await.unwrap().request_key, key);
    }
    assert!(correlator.is_empty());
}
