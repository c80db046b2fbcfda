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
    hashing::{DomainHasher, KERNEL_HASH_DOMAIN, OUTPUT_HASH_DOMAIN},
    types::{Commitment, HashOutput, Signature},
};

/// The kernel of a transaction as it is stored on chain. Kernels are looked up by hash and the blocks that contain
/// them by excess signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionKernel {
    pub features: u8,
    pub fee: u64,
    /// Height before which the kernel may not be mined
    pub lock_height: u64,
    pub excess: Commitment,
    /// Unique per kernel, used to find the block a kernel was mined in
    pub excess_sig: Signature,
}

impl TransactionKernel {
    pub fn hash(&self) -> HashOutput {
        DomainHasher::new(KERNEL_HASH_DOMAIN)
            .chain([self.features])
            .chain(self.fee.to_le_bytes())
            .chain(self.lock_height.to_le_bytes())
            .chain(self.excess.as_bytes())
            .chain(self.excess_sig.get_public_nonce())
            .chain(self.excess_sig.get_signature())
            .finalize()
    }
}

impl Display for TransactionKernel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fee: {}\nLock height: {}\nFeatures: {:?}\nExcess: {}\nExcess signature: {}",
            self.fee, self.lock_height, self.features, self.excess, self.excess_sig
        )
    }
}

/// A transaction output. Outputs are keyed by hash in the UTXO and STXO sets and by commitment in the block indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub features: OutputFeatures,
    /// The homomorphic commitment representing the output amount
    pub commitment: Commitment,
    /// The serialised script that must be satisfied to spend the output
    pub script: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFeatures {
    pub output_type: u8,
    /// The block height at which the output can be spent
    pub maturity: u64,
}

impl TransactionOutput {
    pub fn hash(&self) -> HashOutput {
        DomainHasher::new(OUTPUT_HASH_DOMAIN)
            .chain([self.features.output_type])
            .chain(self.features.maturity.to_le_bytes())
            .chain(self.commitment.as_bytes())
            .chain(&self.script)
            .finalize()
    }
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [type: {}, maturity: {}]",
            self.commitment, self.features.output_type, self.features.maturity
        )
    }
}
