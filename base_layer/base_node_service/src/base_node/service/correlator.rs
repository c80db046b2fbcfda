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
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
        MutexGuard,
        PoisonError,
    },
    time::Duration,
};

use log::*;
use thiserror::Error;
use tokio::{sync::oneshot, time::Instant};

use crate::base_node::{
    comms_interface::{ErrorKind, NodeCommsResponse, RequestVariant},
    service::{BaseNodeServiceResponse, RequestError, RequestKey},
};

const LOG_TARGET: &str = "c::bn::service::correlator";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrelatorError {
    #[error("A request with key {0} is already pending")]
    DuplicateKey(RequestKey),
    #[error("No request with key {0} is pending")]
    UnknownKey(RequestKey),
    #[error("Too many pending requests (limit {limit})")]
    TooManyPendingRequests { limit: usize },
    #[error("Request {0} timed out")]
    TimedOut(RequestKey),
    /// The request was abandoned by its owner rather than left unanswered, so it is not reported as a timeout
    #[error("Request {0} was cancelled")]
    Cancelled(RequestKey),
}

impl CorrelatorError {
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            CorrelatorError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            CorrelatorError::UnknownKey(_) => ErrorKind::UnknownKey,
            CorrelatorError::TooManyPendingRequests { .. } => ErrorKind::Busy,
            CorrelatorError::TimedOut(_) => ErrorKind::Timeout,
            CorrelatorError::Cancelled(_) => ErrorKind::InternalError,
        }
    }
}

type ReplySender = oneshot::Sender<Result<BaseNodeServiceResponse, CorrelatorError>>;

struct PendingRequest {
    generation: u64,
    issued_at: Instant,
    variant: RequestVariant,
    reply_tx: ReplySender,
}

/// Tracks the requests that are waiting for a response, keyed by request key. Every pending request is completed
/// exactly once: by [resolve](Self::resolve), by [sweep](Self::sweep) when it expires or by [cancel](Self::cancel).
/// The correlator is shared between tasks; every operation takes the lock once and never awaits while holding it.
pub struct RequestCorrelator {
    pending: Mutex<HashMap<RequestKey, PendingRequest>>,
    max_pending: usize,
    next_generation: AtomicU64,
}

impl RequestCorrelator {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            max_pending,
            next_generation: AtomicU64::new(0),
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, HashMap<RequestKey, PendingRequest>> {
        // The map is valid after any panic in a critical section, none of them leave an entry half written
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a new pending request. The returned handle resolves once the request is completed.
    pub fn register(&self, request_key: RequestKey, variant: RequestVariant) -> Result<PendingHandle, CorrelatorError> {
        let mut pending = self.lock_pending();
        if pending.contains_key(&request_key) {
            return Err(CorrelatorError::DuplicateKey(request_key));
        }
        if pending.len() >= self.max_pending {
            return Err(CorrelatorError::TooManyPendingRequests {
                limit: self.max_pending,
            });
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        pending.insert(request_key, PendingRequest {
            generation,
            issued_at: Instant::now(),
            variant,
            reply_tx,
        });
        trace!(
            target: LOG_TARGET,
            "Registered {} request with key {} ({} pending)",
            variant,
            request_key,
            pending.len()
        );
        Ok(PendingHandle {
            request_key,
            generation,
            variant,
            reply_rx,
        })
    }

    /// Completes the pending request with the given key. The response is delivered to the waiting handle, if it is
    /// still being awaited, and returned to the caller.
    pub fn resolve(
        &self,
        request_key: RequestKey,
        outcome: Result<NodeCommsResponse, RequestError>,
    ) -> Result<BaseNodeServiceResponse, CorrelatorError> {
        self.resolve_entry(request_key, None, outcome)
    }

    /// Like [resolve](Self::resolve), but only completes the entry created by the registration that returned the
    /// given generation. An entry registered later under the same key is left pending.
    pub fn resolve_if(
        &self,
        request_key: RequestKey,
        generation: u64,
        outcome: Result<NodeCommsResponse, RequestError>,
    ) -> Result<BaseNodeServiceResponse, CorrelatorError> {
        self.resolve_entry(request_key, Some(generation), outcome)
    }

    fn resolve_entry(
        &self,
        request_key: RequestKey,
        generation: Option<u64>,
        outcome: Result<NodeCommsResponse, RequestError>,
    ) -> Result<BaseNodeServiceResponse, CorrelatorError> {
        let entry = self
            .take_entry(request_key, generation)
            .ok_or(CorrelatorError::UnknownKey(request_key))?;
        trace!(
            target: LOG_TARGET,
            "Resolved {} request with key {} after {:.2?}",
            entry.variant,
            request_key,
            entry.issued_at.elapsed()
        );
        let response = BaseNodeServiceResponse { request_key, outcome };
        if !entry.reply_tx.is_closed() {
            // The waiter may stop listening between the check and the send, the reply is dropped then
            let _ = entry.reply_tx.send(Ok(response.clone()));
        }
        Ok(response)
    }

    /// Removes the entry for `request_key` if it belongs to `generation`, or whatever entry is there if no generation
    /// is given.
    fn take_entry(&self, request_key: RequestKey, generation: Option<u64>) -> Option<PendingRequest> {
        let mut pending = self.lock_pending();
        match pending.get(&request_key) {
            Some(entry) if generation.map_or(true, |g| g == entry.generation) => pending.remove(&request_key),
            _ => None,
        }
    }

    /// Expires every pending request that was registered more than `timeout` before `now`. The waiting handles resolve
    /// to [CorrelatorError::TimedOut]. Returns the keys of the expired requests.
    pub fn sweep(&self, now: Instant, timeout: Duration) -> impl Iterator<Item = RequestKey> {
        let expired = {
            let mut pending = self.lock_pending();
            let keys = pending
                .iter()
                .filter(|(_, entry)| now.saturating_duration_since(entry.issued_at) > timeout)
                .map(|(key, _)| *key)
                .collect::<Vec<_>>();
            keys.into_iter()
                .filter_map(|key| pending.remove(&key).map(|entry| (key, entry)))
                .collect::<Vec<_>>()
        };

        let mut keys = Vec::with_capacity(expired.len());
        for (key, entry) in expired {
            debug!(
                target: LOG_TARGET,
                "{} request with key {} expired after {:.2?}",
                entry.variant,
                key,
                now.saturating_duration_since(entry.issued_at)
            );
            let _ = entry.reply_tx.send(Err(CorrelatorError::TimedOut(key)));
            keys.push(key);
        }
        keys.into_iter()
    }

    /// Abandons the pending request with the given key. Returns false if no such request was pending.
    pub fn cancel(&self, request_key: RequestKey) -> bool {
        self.cancel_entry(request_key, None)
    }

    /// Abandons the pending request with the given key only if it was created by the registration that returned
    /// `generation`.
    pub fn cancel_if(&self, request_key: RequestKey, generation: u64) -> bool {
        self.cancel_entry(request_key, Some(generation))
    }

    fn cancel_entry(&self, request_key: RequestKey, generation: Option<u64>) -> bool {
        match self.take_entry(request_key, generation) {
            Some(entry) => {
                let _ = entry.reply_tx.send(Err(CorrelatorError::Cancelled(request_key)));
                true
            },
            None => false,
        }
    }

    pub fn is_pending(&self, request_key: RequestKey) -> bool {
        self.lock_pending().contains_key(&request_key)
    }

    pub fn len(&self) -> usize {
        self.lock_pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Awaits the completion of a registered request.
#[derive(Debug)]
pub struct PendingHandle {
    request_key: RequestKey,
    generation: u64,
    variant: RequestVariant,
    reply_rx: oneshot::Receiver<Result<BaseNodeServiceResponse, CorrelatorError>>,
}

impl PendingHandle {
    pub fn request_key(&self) -> RequestKey {
        self.request_key
    }

    /// Identifies this registration among all registrations of the same key
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn variant(&self) -> RequestVariant {
        self.variant
    }

    /// Resolves to the response, or to the reason the request was completed without one.
    pub async fn resolved(self) -> Result<BaseNodeServiceResponse, CorrelatorError> {
        self.reply_rx
            .await
            .unwrap_or(Err(CorrelatorError::Cancelled(self.request_key)))
    }
}
