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

//! Builders and test doubles shared by the unit tests.

use crate::{
    blocks::{AggregateBody, Block, BlockHeader, HistoricalBlock, NewBlockTemplate},
    chain_storage::{BlockchainBackend, ChainMetadata, ChainStorageError, MemoryDatabase},
    mining::{BlockTemplateCalculator, BlockTemplateError},
    proof_of_work::PowAlgorithm,
    transactions::{OutputFeatures, TransactionKernel, TransactionOutput},
    types::{Commitment, HashOutput, Signature},
};

/// Unpacks the fields of an enum variant, panicking if the value is another variant.
macro_rules! unpack_enum {
    ($($enum_key:ident)::+ { $($idents:tt),* } = $enum:expr) => {
        let ($($idents),+) = match $enum {
            $($enum_key)::+{$($idents),+} => ($($idents),+),
            _ => panic!("Unexpected enum variant given to unpack_enum"),
        };
    };
    ($($enum_key:ident)::+ ( $($idents:tt),* ) = $enum:expr) => {
        let ($($idents),+) = match $enum {
            $($enum_key)::+($($idents),+) => ($($idents),+),
            _ => panic!("Unexpected enum variant given to unpack_enum"),
        };
    };
    ($($enum_key:ident)::+ = $enum:expr) => {
        match $enum {
            $($enum_key)::+ => {},
            _ => panic!("Unexpected enum variant given to unpack_enum"),
        };
    };
}

pub fn create_genesis_block() -> Block {
    Block::new(BlockHeader::new(1), AggregateBody::empty())
}

/// A block on top of `prev` with the given body
pub fn next_block(prev: &Block, body: AggregateBody) -> Block {
    let mut header = BlockHeader::from_previous(&prev.header);
    header.timestamp = prev.header.timestamp + 120;
    Block::new(header, body)
}

/// A chain of `num_blocks` empty blocks, including the genesis block
pub fn create_chain(num_blocks: usize) -> (MemoryDatabase, Vec<Block>) {
    let genesis = create_genesis_block();
    let db = MemoryDatabase::new(genesis.clone());
    let mut blocks = vec![genesis];
    while blocks.len() < num_blocks {
        let block = next_block(&blocks[blocks.len() - 1], AggregateBody::empty());
        db.add_block(block.clone()).unwrap();
        blocks.push(block);
    }
    (db, blocks)
}

pub fn create_output(seed: u8) -> TransactionOutput {
    TransactionOutput {
        features: OutputFeatures::default(),
        commitment: Commitment::from([seed; 32]),
        script: vec![seed],
    }
}

pub fn create_kernel(seed: u8) -> TransactionKernel {
    TransactionKernel {
        features: 0,
        fee: u64::from(seed) * 10,
        lock_height: 0,
        excess: Commitment::from([seed; 32]),
        excess_sig: Signature::new([seed; 32], [seed.wrapping_add(1); 32]),
    }
}

/// Builds empty templates and reports the weight it was asked for as the reward.
#[derive(Default)]
pub struct MockTemplateCalculator;

impl BlockTemplateCalculator for MockTemplateCalculator {
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
            target_difficulty: 1,
            reward: max_weight,
            total_fees: 0,
        })
    }
}

/// A backend whose storage can never be reached
pub struct UnavailableBackend;

fn unavailable<T>() -> Result<T, ChainStorageError> {
    Err(ChainStorageError::AccessError("storage offline".to_string()))
}

impl BlockchainBackend for UnavailableBackend {
    fn fetch_chain_metadata(&self) -> Result<ChainMetadata, ChainStorageError> {
        unavailable()
    }

    fn fetch_header(&self, _: u64) -> Result<Option<BlockHeader>, ChainStorageError> {
        unavailable()
    }

    fn fetch_header_by_hash(&self, _: &HashOutput) -> Result<Option<BlockHeader>, ChainStorageError> {
        unavailable()
    }

    fn fetch_kernel(&self, _: &HashOutput) -> Result<Option<TransactionKernel>, ChainStorageError> {
        unavailable()
    }

    fn fetch_utxo(&self, _: &HashOutput) -> Result<Option<TransactionOutput>, ChainStorageError> {
        unavailable()
    }

    fn fetch_txo(&self, _: &HashOutput) -> Result<Option<TransactionOutput>, ChainStorageError> {
        unavailable()
    }

    fn fetch_block(&self, _: u64) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        unavailable()
    }

    fn fetch_block_by_hash(&self, _: &HashOutput) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        unavailable()
    }

    fn fetch_block_with_kernel(&self, _: &Signature) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        unavailable()
    }

    fn fetch_block_with_stxo(&self, _: &Commitment) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        unavailable()
    }

    fn fetch_block_with_utxo(&self, _: &Commitment) -> Result<Option<HistoricalBlock>, ChainStorageError> {
        unavailable()
    }
}
