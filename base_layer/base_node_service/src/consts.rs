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

use std::time::Duration;

/// The allocated waiting time for a request waiting for a service response from a remote base node.
pub const BASE_NODE_SERVICE_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// How often waiting requests are checked for expiry.
pub const BASE_NODE_SERVICE_SWEEP_INTERVAL: Duration = Duration::from_secs(5);
/// The maximum number of requests that may be waiting for a response at the same time.
pub const BASE_NODE_SERVICE_MAX_PENDING_REQUESTS: usize = 10_000;
/// The maximum number of headers returned in a FetchHeadersAfter response.
pub const MAX_HEADERS_PER_RESPONSE: u64 = 100;
/// Block weight used for new block templates when the requester does not ask for a specific weight.
pub const DEFAULT_MAX_BLOCK_WEIGHT: u64 = 127_795;
/// Request key reported in responses when the key of the request could not be read.
pub const SENTINEL_REQUEST_KEY: u64 = 0;
/// Number of fresh keys tried before an outbound request is abandoned because every key collided.
pub const REQUEST_KEY_GENERATION_ATTEMPTS: usize = 8;
/// Number of local requests that may queue up for the outbound request service before callers are held back.
pub const BASE_NODE_SERVICE_OUTBOUND_REQUEST_BUFFER: usize = 100;
