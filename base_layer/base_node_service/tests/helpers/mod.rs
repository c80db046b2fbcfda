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

//! Chain builders, storage doubles and an in-memory transport shared by the integration tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use futures::channel::mpsc;
use tari_base_node_service::{
    base_node::service::{BaseNodeService, BaseNodeServiceConfig, OutboundMessageSender, TransportError},
    blocks::{AggregateBody, Block, BlockHeader, HistoricalBlock, NewBlockTemplate},
    chain_storage::{BlockchainBackend, BlockchainDatabase, ChainMetadata, ChainStorageError, MemoryDatabase},
    mining::{BlockTemplateCalculator, BlockTemplateError},
    proof_of_work::PowAlgorithm,
    transactions::{OutputFeatures, TransactionKernel, TransactionOutput},
    types::{Commitment, HashOutput, Signature},
};

pub fn create_output(seed: u8) -> TransactionOutput {
    TransactionOutput {
        features: OutputFeatures {
            output_type: 0,
            maturity: u64::from(seed),
        },
        commitment: Commitment::from([seed; 32]),
        script: vec![seed; 4],
    }
}

pub fn create_kernel(seed: u8) -> TransactionKernel {
    TransactionKernel {
        features: 0,
        fee: 25 * u64::from(seed),
        lock_height: 0,
        excess: Commitment::from([seed; 32]),
        excess_sig: Signature::new([seed; 32], [!seed; 32]),
    }
}

pub fn append_block(db: &MemoryDatabase, prev: &Block, body: AggregateBody) -> Block {
    let mut header = BlockHeader::from_previous(&prev.header);
    header.timestamp = prev.header.timestamp + 120;
    let block = Block::new(header, body);
    db.add_block(block.clone()).unwrap();
    block
}

/// A small chain with some history:
/// * block 1 creates outputs 1 and 2 with kernel 1
/// * block 2 spends output 1 and creates output 3 with kernel 2
/// * blocks 3 to 5 are empty
pub struct TestChain {
    pub db: MemoryDatabase,
    pub blocks: Vec<Block>,
}

impl TestChain {
    pub fn new() -> Self {
        let genesis = Block::new(BlockHeader::new(1), AggregateBody::empty());
        let db = MemoryDatabase::new(genesis.clone());
        let mut blocks = vec![genesis];
        let block1 = append_block(&db, &blocks[0], AggregateBody {
            inputs: vec![],
            outputs: vec![create_output(1), create_output(2)],
            kernels: vec![create_kernel(1)],
        });
        blocks.push(block1);
        let block2 = append_block(&db, &blocks[1], AggregateBody {
            inputs: vec![create_output(1).commitment],
            outputs: vec![create_output(3)],
            kernels: vec![create_kernel(2)],
        });
        blocks.push(block2);
        for _ in 0..3 {
            let block = append_block(&db, &blocks[blocks.len() - 1], AggregateBody::empty());
            blocks.push(block);
        }
        Self { db, blocks }
    }

    pub fn tip(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }
}

/// Builds empty templates on top of the tip
#[derive(Default)]
pub struct FixedTemplateCalculator;

impl BlockTemplateCalculator for FixedTemplateCalculator {
    fn new_block_template(
        &self,
        tip: &BlockHeader,
        algo: PowAlgorithm,
        max_weight: u64,
    ) -> Result<NewBlockTemplate, BlockTemplateError> {
        let mut header = BlockHeader::from_previous(tip);
        header.pow_algo = algo;
        Ok(NewBlockTemplate {
            header,
            body: AggregateBody::empty(),
            target_difficulty: max_weight,
            reward: 5_000,
            total_fees: 0,
        })
    }
}

/// Wraps a backend and counts the lookups made against it
#[derive(Clone)]
pub struct CountingBackend<B> {
    inner: B,
    calls: Arc<AtomicUsize>,
}

impl<B> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

macro_rules! counted {
    ($fn:ident($($param:ident: $ptype:ty),*) -> $rtype:ty) => {
        fn $fn(&self, $($param: $ptype),*) -> Result<$rtype, ChainStorageError> {
            self.count();
            self.inner.$fn($($param),*)
        }
    };
}

impl<B: BlockchainBackend> BlockchainBackend for CountingBackend<B> {
    counted!(fetch_chain_metadata() -> ChainMetadata);

    counted!(fetch_header(height: u64) -> Option<BlockHeader>);

    counted!(fetch_header_by_hash(hash: &HashOutput) -> Option<BlockHeader>);

    counted!(fetch_kernel(hash: &HashOutput) -> Option<TransactionKernel>);

    counted!(fetch_utxo(hash: &HashOutput) -> Option<TransactionOutput>);

    counted!(fetch_txo(hash: &HashOutput) -> Option<TransactionOutput>);

    counted!(fetch_block(height: u64) -> Option<HistoricalBlock>);

    counted!(fetch_block_by_hash(hash: &HashOutput) -> Option<HistoricalBlock>);

    counted!(fetch_block_with_kernel(excess_sig: &Signature) -> Option<HistoricalBlock>);

    counted!(fetch_block_with_stxo(commitment: &Commitment) -> Option<HistoricalBlock>);

    counted!(fetch_block_with_utxo(commitment: &Commitment) -> Option<HistoricalBlock>);
}

/// A backend that fails every lookup as if the storage engine were offline
pub struct OfflineBackend;

macro_rules! offline {
    ($fn:ident($($ptype:ty),*) -> $rtype:ty) => {
        fn $fn(&self, $(_: $ptype),*) -> Result<$rtype, ChainStorageError> {
            Err(ChainStorageError::AccessError("connection refused".to_string()))
        }
    };
}

impl BlockchainBackend for OfflineBackend {
    offline!(fetch_chain_metadata() -> ChainMetadata);

    offline!(fetch_header(u64) -> Option<BlockHeader>);

    offline!(fetch_header_by_hash(&HashOutput) -> Option<BlockHeader>);

    offline!(fetch_kernel(&HashOutput) -> Option<TransactionKernel>);

    offline!(fetch_utxo(&HashOutput) -> Option<TransactionOutput>);

    offline!(fetch_txo(&HashOutput) -> Option<TransactionOutput>);

    offline!(fetch_block(u64) -> Option<HistoricalBlock>);

    offline!(fetch_block_by_hash(&HashOutput) -> Option<HistoricalBlock>);

    offline!(fetch_block_with_kernel(&Signature) -> Option<HistoricalBlock>);

    offline!(fetch_block_with_stxo(&Commitment) -> Option<HistoricalBlock>);

    offline!(fetch_block_with_utxo(&Commitment) -> Option<HistoricalBlock>);
}

pub fn create_service<B: BlockchainBackend + 'static>(
    backend: B,
    config: BaseNodeServiceConfig,
) -> BaseNodeService<B, FixedTemplateCalculator> {
    BaseNodeService::new(
        BlockchainDatabase::new(backend),
        Arc::new(FixedTemplateCalculator::default()),
        config,
    )
}

/// Delivers every request to a responding base node service and feeds the response back to the requester
pub struct LoopbackTransport<B> {
    responder: BaseNodeService<B, FixedTemplateCalculator>,
    response_tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl<B> LoopbackTransport<B> {
    pub fn new(
        responder: BaseNodeService<B, FixedTemplateCalculator>,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (response_tx, response_rx) = mpsc::unbounded();
        (Self { responder, response_tx }, response_rx)
    }
}

#[async_trait]
impl<B: BlockchainBackend + 'static> OutboundMessageSender for LoopbackTransport<B> {
    async fn send_message(&self, message: Vec<u8>) -> Result<(), TransportError> {
        let responder = self.responder.clone();
        let response_tx = self.response_tx.clone();
        tokio::spawn(async move {
            let response = responder.handle(&message).await;
            let _ = response_tx.unbounded_send(response);
        });
        Ok(())
    }
}

/// Accepts every request and never answers
#[derive(Default)]
pub struct SilentTransport {
    pub sent: AtomicUsize,
}

#[async_trait]
impl OutboundMessageSender for SilentTransport {
    async fn send_message(&self, _: Vec<u8>) -> Result<(), TransportError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
