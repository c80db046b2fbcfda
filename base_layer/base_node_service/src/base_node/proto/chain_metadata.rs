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

use std::convert::TryFrom;

use crate::{
    chain_storage::ChainMetadata,
    proto::{base_node as proto, u128_from_le_bytes, u128_to_le_bytes},
    types::FixedHash,
};

impl TryFrom<proto::ChainMetadata> for ChainMetadata {
    type Error = String;

    fn try_from(metadata: proto::ChainMetadata) -> Result<Self, Self::Error> {
        if metadata.best_block_hash.is_empty() {
            return Err("Best block is missing".to_string());
        }
        let best_block_hash =
            FixedHash::try_from(metadata.best_block_hash).map_err(|e| format!("Malformed best block: {}", e))?;
        if metadata.pruned_height > metadata.best_block_height {
            return Err(format!(
                "Pruned height {} is above the best block height {}",
                metadata.pruned_height, metadata.best_block_height
            ));
        }
        let accumulated_difficulty = u128_from_le_bytes(&metadata.accumulated_difficulty)?;
        Ok(ChainMetadata::new(
            metadata.best_block_height,
            best_block_hash,
            metadata.pruning_horizon,
            metadata.pruned_height,
            accumulated_difficulty,
        ))
    }
}

impl From<ChainMetadata> for proto::ChainMetadata {
    fn from(metadata: ChainMetadata) -> Self {
        Self {
            best_block_height: metadata.best_block_height(),
            best_block_hash: metadata.best_block_hash().to_vec(),
            pruning_horizon: metadata.pruning_horizon(),
            accumulated_difficulty: u128_to_le_bytes(metadata.accumulated_difficulty()),
            pruned_height: metadata.pruned_height(),
        }
    }
}
