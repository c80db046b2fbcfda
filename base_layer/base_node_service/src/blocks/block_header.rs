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
    hashing::{DomainHasher, BLOCK_HEADER_HASH_DOMAIN},
    proof_of_work::PowAlgorithm,
    types::{BlockHash, FixedHash},
};

/// The BlockHeader contains all the metadata for the block, including proof of work, a link to the previous block
/// and the transaction kernels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Version of the block
    pub version: u16,
    /// Height of this block since the genesis block (height 0)
    pub height: u64,
    /// Hash of the block previous to this in the chain.
    pub prev_hash: BlockHash,
    /// Timestamp at which the block was built, in seconds since the unix epoch.
    pub timestamp: u64,
    /// This is the Merkle root of the outputs
    pub output_mr: FixedHash,
    /// This is the Merkle root of the kernels
    pub kernel_mr: FixedHash,
    /// Nonce increment used to mine this block.
    pub nonce: u64,
    /// The algorithm used to mine this block
    pub pow_algo: PowAlgorithm,
}

impl BlockHeader {
    /// Create a new, default header with the given version.
    pub fn new(version: u16) -> BlockHeader {
        BlockHeader {
            version,
            height: 0,
            prev_hash: FixedHash::zero(),
            timestamp: 0,
            output_mr: FixedHash::zero(),
            kernel_mr: FixedHash::zero(),
            nonce: 0,
            pow_algo: PowAlgorithm::Sha3x,
        }
    }

    /// Create a new block header using relevant data from the previous block. The height is incremented by one, the
    /// previous block hash is set and the timestamp is carried over. Merkle roots and the nonce are left for the
    /// template calculator and miner to fill in.
    pub fn from_previous(prev: &BlockHeader) -> BlockHeader {
        BlockHeader {
            version: prev.version,
            height: prev.height + 1,
            prev_hash: prev.hash(),
            timestamp: prev.timestamp,
            output_mr: FixedHash::zero(),
            kernel_mr: FixedHash::zero(),
            nonce: 0,
            pow_algo: prev.pow_algo,
        }
    }

    pub fn hash(&self) -> BlockHash {
        DomainHasher::new(BLOCK_HEADER_HASH_DOMAIN)
            .chain(self.version.to_le_bytes())
            .chain(self.height.to_le_bytes())
            .chain(self.prev_hash.as_slice())
            .chain(self.timestamp.to_le_bytes())
            .chain(self.output_mr.as_slice())
            .chain(self.kernel_mr.as_slice())
            .chain(self.nonce.to_le_bytes())
            .chain(self.pow_algo.as_u64().to_le_bytes())
            .finalize()
    }
}

impl Display for BlockHeader {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            fmt,
            "Version: {}\nBlock height: {}\nPrevious block hash: {}\nTimestamp: {}",
            self.version, self.height, self.prev_hash, self.timestamp
        )?;
        writeln!(
            fmt,
            "Merkle roots:\nOutputs: {}\nKernels: {}",
            self.output_mr, self.kernel_mr
        )?;
        writeln!(fmt, "Nonce: {}\nPoW algorithm: {}", self.nonce, self.pow_algo)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_previous() {
        let mut h1 = BlockHeader::new(0);
        h1.nonce = 7600;
        assert_eq!(h1.height, 0, "Default block height");
        let hash1 = h1.hash();
        let h2 = BlockHeader::from_previous(&h1);
        assert_eq!(h2.height, h1.height + 1, "Incrementing block height");
        assert_eq!(h2.prev_hash, hash1, "Previous hash");
        assert_eq!(h2.nonce, 0, "Nonce is reset");
    }

    #[test]
    fn hash_covers_the_nonce() {
        let h1 = BlockHeader::new(1);
        let mut h2 = h1.clone();
        h2.nonce += 1;
        assert_ne!(h1.hash(), h2.hash());
    }
}
