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

//! # Base node request service
//!
//! The request/response multiplexing layer of a Tari base node. Serialized `BaseNodeServiceRequest` messages are
//! decoded, correlated by `request_key`, dispatched to the chain-state query handler for their variant and answered
//! with a `BaseNodeServiceResponse` carrying the same key. The outbound half lets local services query remote base
//! nodes and matches the asynchronous replies to the waiting callers.
//!
//! The chain store, the block template calculator and the transport are supplied by the host application through the
//! [`chain_storage::BlockchainBackend`], [`mining::BlockTemplateCalculator`] and
//! [`base_node::service::OutboundMessageSender`] traits.

#[cfg(test)]
#[macro_use]
mod test_helpers;

pub mod base_node;
pub mod blocks;
pub mod chain_storage;
pub mod configuration;
pub mod consts;
pub mod hashing;
pub mod mining;
pub mod proof_of_work;
pub mod proto;
pub mod reply_channel;
pub mod transactions;
pub mod types;
