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

use thiserror::Error;

/// Failures of the chain store. [ChainStorageError::ValueNotFound] means the store is healthy but does not hold the
/// requested item, every other variant means the lookup could not be answered.
#[derive(Debug, Error)]
pub enum ChainStorageError {
    #[error("The storage backend could not be accessed: {0}")]
    AccessError(String),
    #[error("The chain store is in an inconsistent state: {0}")]
    CorruptedDatabase(String),
    #[error("An input of the block is not in the UTXO set")]
    UnspendableInput,
    #[error("Invalid chain store operation: {0}")]
    InvalidOperation(String),
    #[error("No {entity} with {field} {value} in the chain store")]
    ValueNotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("The block cannot be added to the chain: {0}")]
    InvalidBlock(String),
    #[error("Blocking task spawn error: {0}")]
    BlockingTaskSpawnError(String),
}

impl ChainStorageError {
    pub fn is_value_not_found(&self) -> bool {
        matches!(self, ChainStorageError::ValueNotFound { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_names_the_missing_value() {
        let err = ChainStorageError::ValueNotFound {
            entity: "BlockHeader",
            field: "height",
            value: "12".to_string(),
        };
        assert!(err.is_value_not_found());
        assert_eq!(err.to_string(), "No BlockHeader with height 12 in the chain store");
        assert!(!ChainStorageError::AccessError("disk offline".to_string()).is_value_not_found());
    }
}
