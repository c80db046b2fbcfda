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
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Indicates the algorithm used to mine a block
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowAlgorithm {
    RandomX = 0,
    Sha3x = 1,
}

impl PowAlgorithm {
    pub fn is_random_x(&self) -> bool {
        matches!(self, Self::RandomX)
    }

    pub fn is_sha3(&self) -> bool {
        matches!(self, Self::Sha3x)
    }

    pub fn as_u64(&self) -> u64 {
        *self as u64
    }
}

impl TryFrom<u64> for PowAlgorithm {
    type Error = String;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(PowAlgorithm::RandomX),
            1 => Ok(PowAlgorithm::Sha3x),
            _ => Err(format!("Invalid PoW algorithm {}", v)),
        }
    }
}

impl FromStr for PowAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_trimmed = s.to_uppercase().trim().replace(['_', '-'], "");
        match s_trimmed.as_str() {
            "RANDOMX" | "MONERO" => Ok(Self::RandomX),
            "SHA" | "SHA3" | "SHA3X" => Ok(Self::Sha3x),
            _ => Err(format!("Unknown PoW algorithm {}", s)),
        }
    }
}

impl Display for PowAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let algo = match self {
            PowAlgorithm::RandomX => "RandomX",
            PowAlgorithm::Sha3x => "Sha3x",
        };
        f.write_str(algo)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_converts_from_the_wire_id() {
        assert_eq!(PowAlgorithm::try_from(0).unwrap(), PowAlgorithm::RandomX);
        assert_eq!(PowAlgorithm::try_from(1).unwrap(), PowAlgorithm::Sha3x);
        assert!(PowAlgorithm::try_from(2).is_err());
    }

    #[test]
    fn it_parses_names() {
        assert_eq!("sha-3".parse::<PowAlgorithm>().unwrap(), PowAlgorithm::Sha3x);
        assert_eq!("RandomX".parse::<PowAlgorithm>().unwrap(), PowAlgorithm::RandomX);
        assert!("blake".parse::<PowAlgorithm>().is_err());
    }
}
