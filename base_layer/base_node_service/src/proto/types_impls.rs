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

use std::{borrow::Borrow, convert::TryFrom};

use super::types as proto;
use crate::types::{Commitment, FixedSizeError, Signature};

//---------------------------------- Commitment --------------------------------------------//

impl TryFrom<proto::Commitment> for Commitment {
    type Error = FixedSizeError;

    fn try_from(commitment: proto::Commitment) -> Result<Self, Self::Error> {
        Commitment::from_canonical_bytes(&commitment.data)
    }
}

impl From<Commitment> for proto::Commitment {
    fn from(commitment: Commitment) -> Self {
        Self {
            data: commitment.as_bytes().to_vec(),
        }
    }
}

//---------------------------------- Signature --------------------------------------------//

impl TryFrom<proto::Signature> for Signature {
    type Error = String;

    fn try_from(sig: proto::Signature) -> Result<Self, Self::Error> {
        Signature::from_canonical_bytes(&sig.public_nonce, &sig.signature).map_err(|e| e.to_string())
    }
}

impl<T: Borrow<Signature>> From<T> for proto::Signature {
    fn from(sig: T) -> Self {
        Self {
            public_nonce: sig.borrow().get_public_nonce().to_vec(),
            signature: sig.borrow().get_signature().to_vec(),
        }
    }
}

//---------------------------------- Accumulated difficulty ----------------------------------//

pub(crate) fn u128_to_le_bytes(value: u128) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// An empty buffer is read as zero
pub(crate) fn u128_from_le_bytes(bytes: &[u8]) -> Result<u128, String> {
    if bytes.is_empty() {
        return Ok(0);
    }
    let bytes = <[u8; 16]>::try_from(bytes)
        .map_err(|_| format!("Accumulated difficulty must be 16 bytes, got {}", bytes.len()))?;
    Ok(u128::from_le_bytes(bytes))
}
