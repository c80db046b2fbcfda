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

use crate::types::BlockHash;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChainMetadata {
    /// The current chain height, or the block number of the longest valid chain
    best_block_height: u64,
    /// The block hash of the current tip of the longest valid chain
    best_block_hash: BlockHash,
    /// The number of blocks back from the tip that this database tracks. A value of 0 indicates that all blocks are
    /// tracked (i.e. the database is in full archival mode).
    pruning_horizon: u64,
    /// The height of the pruning horizon. This indicates from what height a full block can be provided
    /// (exclusive). If `pruned_height` is equal to the `best_block_height` no blocks can be
    /// provided. Archival nodes wil always have a `pruned_height` of zero.
    pruned_height: u64,
    /// The total accumulated proof of work of the longest chain
    accumulated_difficulty: u128,
}

impl ChainMetadata {
    pub fn new(
        best_block_height: u64,
        best_block_hash: BlockHash,
        pruning_horizon: u64,
        pruned_height: u64,
        accumulated_difficulty: u128,
    ) -> ChainMetadata {
        ChainMetadata {
            best_block_height,
            best_block_hash,
            pruning_horizon,
            pruned_height,
            accumulated_difficulty,
        }
    }

    /// The block height at the pruning horizon, given the chain height of the network. Typically database backends
    /// cannot provide any block data earlier than this point.
    /// Zero is returned if the blockchain still hasn't reached the pruning horizon.
    pub fn horizon_block_height(&self, chain_tip: u64) -> u64 {
        match self.pruning_horizon {
            0 => 0,
            horizon => chain_tip.saturating_sub(horizon),
        }
    }

    /// Returns true if the current tip is in archival mode, i.e. no blocks have been pruned
    pub fn is_archival_node(&self) -> bool {
        self.pruning_horizon == 0
    }

    pub fn best_block_height(&self) -> u64 {
        self.best_block_height
    }

    pub fn best_block_hash(&self) -> &BlockHash {
        &self.best_block_hash
    }

    pub fn pruning_horizon(&self) -> u64 {
        self.pruning_horizon
    }

    pub fn pruned_height(&self) -> u64 {
        self.pruned_height
    }

    pub fn accumulated_difficulty(&self) -> u128 {
        self.accumulated_difficulty
    }
}

impl Display for ChainMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Best block height: {}", self.best_block_height)?;
        writeln!(f, "Total accumulated difficulty: {}", self.accumulated_difficulty)?;
        writeln!(f, "Best block hash: {}", self.best_block_hash)?;
        writeln!(f, "Pruning horizon: {}", self.pruning_horizon)?;
        writeln!(f, "Pruned height: {}", self.pruned_height)
    }
}
