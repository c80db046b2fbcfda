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

use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FIXED_HASH_SIZE: usize = 32;
pub const COMMITMENT_SIZE: usize = 32;
pub const SIGNATURE_PART_SIZE: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid size for {kind}: expected {expected} bytes, got {actual}")]
pub struct FixedSizeError {
    pub kind: &'static str,
    pub expected: usize,
    pub actual: usize,
}

fn copy_fixed<const N: usize>(kind: &'static str, bytes: &[u8]) -> Result<[u8; N], FixedSizeError> {
    <[u8; N]>::try_from(bytes).map_err(|_| FixedSizeError {
        kind,
        expected: N,
        actual: bytes.len(),
    })
}

/// A 32-byte hash, used for block, header, kernel and output hashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixedHash([u8; FIXED_HASH_SIZE]);

pub type HashOutput = FixedHash;
pub type BlockHash = FixedHash;

impl FixedHash {
    pub const fn zero() -> Self {
        Self([0u8; FIXED_HASH_SIZE])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; FIXED_HASH_SIZE]> for FixedHash {
    fn from(bytes: [u8; FIXED_HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for FixedHash {
    type Error = FixedSizeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        copy_fixed("hash", bytes).map(Self)
    }
}

impl TryFrom<Vec<u8>> for FixedHash {
    type Error = FixedSizeError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl Display for FixedHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A compressed Pedersen commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Commitment([u8; COMMITMENT_SIZE]);

impl Commitment {
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, FixedSizeError> {
        copy_fixed("commitment", bytes).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; COMMITMENT_SIZE]> for Commitment {
    fn from(bytes: [u8; COMMITMENT_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Display for Commitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A Schnorr signature, as found in the `excess_sig` of a transaction kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signature {
    public_nonce: [u8; SIGNATURE_PART_SIZE],
    signature: [u8; SIGNATURE_PART_SIZE],
}

impl Signature {
    pub fn new(public_nonce: [u8; SIGNATURE_PART_SIZE], signature: [u8; SIGNATURE_PART_SIZE]) -> Self {
        Self {
            public_nonce,
            signature,
        }
    }

    pub fn from_canonical_bytes(public_nonce: &[u8], signature: &[u8]) -> Result<Self, FixedSizeError> {
        Ok(Self {
            public_nonce: copy_fixed("signature public nonce", public_nonce)?,
            signature: copy_fixed("signature scalar", signature)?,
        })
    }

    pub fn get_public_nonce(&self) -> &[u8] {
        &self.public_nonce
    }

    pub fn get_signature(&self) -> &[u8] {
        &self.signature
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", hex::encode(self.public_nonce), hex::encode(self.signature))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_rejects_short_hashes() {
        let err = FixedHash::try_from(vec![1u8; 31]).unwrap_err();
        assert_eq!(err.expected, 32);
        assert_eq!(err.actual, 31);
    }

    #[test]
    fn it_rejects_long_commitments() {
        let err = Commitment::from_canonical_bytes(&[0u8; 33]).unwrap_err();
        assert_eq!(err.kind, "commitment");
    }

    #[test]
    fn it_validates_both_signature_parts() {
        assert!(Signature::from_canonical_bytes(&[1u8; 32], &[2u8; 32]).is_ok());
        let err = Signature::from_canonical_bytes(&[1u8; 32], &[2u8; 16]).unwrap_err();
        assert_eq!(err.kind, "signature scalar");
    }

    #[test]
    fn hash_display_is_hex() {
        let hash = FixedHash::from([0xab; 32]);
        assert_eq!(hash.to_string(), "ab".repeat(32));
    }
}
