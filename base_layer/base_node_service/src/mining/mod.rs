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

//! The block template calculator consumed by the `GetNewBlockTemplate` handler. Selecting transactions and computing
//! the target difficulty belong to the mempool and consensus layers of the host node, so only the contract lives here.

use thiserror::Error;

use crate::{
    blocks::{BlockHeader, NewBlockTemplate},
    proof_of_work::PowAlgorithm,
};

#[derive(Debug, Error)]
pub enum BlockTemplateError {
    #[error("No transactions could be selected for the template: {0}")]
    TransactionSelectionFailed(String),
    #[error("Could not determine the target difficulty for {algo}: {details}")]
    TargetDifficultyUnavailable { algo: PowAlgorithm, details: String },
    #[error("Block template calculation failed: {0}")]
    Other(String),
}

/// Builds new block templates on top of the current chain tip.
pub trait BlockTemplateCalculator: Send + Sync {
    /// Construct a template for a block that builds on `tip`, mined with `algo`, whose body weight does not exceed
    /// `max_weight`.
    fn new_block_template(
        &self,
        tip: &BlockHeader,
        algo: PowAlgorithm,
        max_weight: u64,
    ) -> Result<NewBlockTemplate, BlockTemplateError>;
}
