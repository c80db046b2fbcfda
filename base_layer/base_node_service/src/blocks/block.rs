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

use crate::{
    blocks::BlockHeader,
    transactions::{TransactionKernel, TransactionOutput},
    types::{BlockHash, Commitment},
};

/// The components of the block or transaction. The same struct can be used for either, since in Mimblewimble,
/// cut-through means that blocks and transactions have the same structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBody {
    /// Commitments of the outputs spent by this body.
    pub inputs: Vec<Commitment>,
    pub outputs: Vec<TransactionOutput>,
    pub kernels: Vec<TransactionKernel>,
}

impl AggregateBody {
    pub fn empty() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty() && self.kernels.is_empty()
    }

    /// Fees of all kernels in the body
    pub fn total_fees(&self) -> u64 {
        self.kernels.iter().map(|k| k.fee).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub body: AggregateBody,
}

impl Block {
    pub fn new(header: BlockHeader, body: AggregateBody) -> Self {
        Self { header, body }
    }

    pub fn hash(&self) -> BlockHash {
        self.header.hash()
    }
}

impl Display for Block {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(fmt, "----------------- Block -----------------")?;
        writeln!(fmt, "--- Header ---")?;
        writeln!(fmt, "{}", self.header)?;
        writeln!(
            fmt,
            "--- Body ---\n{} input(s), {} output(s), {} kernel(s)",
            self.body.inputs.len(),
            self.body.outputs.len(),
            self.body.kernels.len()
        )
    }
}

/// A block together with the chain context it was fetched in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalBlock {
    /// The number of blocks that have been mined since this block, including this one. The current tip will have one
    /// confirmation.
    pub confirmations: u64,
    /// The total proof of work of the chain up to and including this block
    pub accumulated_difficulty: u128,
    pub block: Block,
}

impl HistoricalBlock {
    pub fn new(block: Block, confirmations: u64, accumulated_difficulty: u128) -> Self {
        Self {
            confirmations,
            accumulated_difficulty,
            block,
        }
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn header(&self) -> &BlockHeader {
        &self.block.header
    }

    pub fn hash(&self) -> BlockHash {
        self.block.hash()
    }

    pub fn into_block(self) -> Block {
        self.block
    }
}

/// The new block template is used to construct a new partial block, allowing a miner to add the coinbase UTXO and as
/// a final step the base node to add the Merkle roots to the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlockTemplate {
    pub header: BlockHeader,
    pub body: AggregateBody,
    /// The difficulty the miner must reach with the template's algorithm
    pub target_difficulty: u64,
    /// The reward the coinbase of this block may claim, excluding fees
    pub reward: u64,
    /// Sum of the fees of the transactions in the body
    pub total_fees: u64,
}

impl Display for NewBlockTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "----------------- Block template-----------------")?;
        writeln!(f, "--- Header ---")?;
        writeln!(f, "{}", self.header)?;
        writeln!(
            f,
            "Target difficulty: {}\nReward: {}\nTotal fees: {}",
            self.target_difficulty, self.reward, self.total_fees
        )
    }
}
