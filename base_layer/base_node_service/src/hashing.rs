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

use blake2::{Blake2b, Digest};
use digest::consts::U32;

use crate::types::FixedHash;

pub const BLOCK_HEADER_HASH_DOMAIN: &str = "com.tari.base_layer.core.blocks.header";
pub const KERNEL_HASH_DOMAIN: &str = "com.tari.base_layer.core.transactions.kernel";
pub const OUTPUT_HASH_DOMAIN: &str = "com.tari.base_layer.core.transactions.output";

/// A Blake2b-256 hasher that prefixes the domain label and every item with its length, so that no two distinct
/// sequences of items produce the same preimage.
pub struct DomainHasher(Blake2b<U32>);

impl DomainHasher {
    pub fn new(domain: &'static str) -> Self {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update((domain.len() as u64).to_le_bytes());
        hasher.update(domain.as_bytes());
        Self(hasher)
    }

    pub fn chain<T: AsRef<[u8]>>(mut self, data: T) -> Self {
        let data = data.as_ref();
        self.0.update((data.len() as u64).to_le_bytes());
        self.0.update(data);
        self
    }

    pub fn finalize(self) -> FixedHash {
        let output: [u8; 32] = self.0.finalize().into();
        FixedHash::from(output)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_separates_domains() {
        let a = DomainHasher::new(KERNEL_HASH_DOMAIN).chain(b"data").finalize();
        let b = DomainHasher::new(OUTPUT_HASH_DOMAIN).chain(b"data").finalize();
        assert_ne!(a, b);
    }

    #[test]
    fn it_length_prefixes_items() {
        let a = DomainHasher::new(KERNEL_HASH_DOMAIN).chain(b"ab").chain(b"c").finalize();
        let b = DomainHasher::new(KERNEL_HASH_DOMAIN).chain(b"a").chain(b"bc").finalize();
        assert_ne!(a, b);
    }
}
