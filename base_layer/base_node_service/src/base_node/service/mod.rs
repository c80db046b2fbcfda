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

//! Request correlation, dispatch and transport for the base node request service.
//!
//! [BaseNodeService] answers serialized requests from remote nodes. [OutboundRequestService] sends the requests made
//! through an [OutboundNodeCommsInterface](crate::base_node::comms_interface::OutboundNodeCommsInterface) to a remote
//! node and hands each response to the caller waiting for it. Both sides share their bookkeeping through a
//! [RequestCorrelator], whose expired entries are removed by a [RequestSweeper].

mod config;
pub use config::BaseNodeServiceConfig;

mod correlator;
pub use correlator::{CorrelatorError, PendingHandle, RequestCorrelator};

mod dispatcher;
pub use dispatcher::RequestDispatcher;

mod error;
pub use error::BaseNodeServiceError;

mod requester;
pub use requester::OutboundRequestService;

mod service;
pub use service::BaseNodeService;

mod service_request;
pub use service_request::{generate_request_key, BaseNodeServiceRequest, RequestKey};

mod service_response;
pub use service_response::{BaseNodeServiceResponse, RequestError};

mod sweeper;
pub use sweeper::RequestSweeper;

mod transport;
pub use transport::{OutboundMessageSender, TransportError};
