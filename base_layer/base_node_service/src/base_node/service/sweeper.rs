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

use std::{future::Future, sync::Arc, time::Duration};

use log::*;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::base_node::service::{BaseNodeServiceConfig, RequestCorrelator};

const LOG_TARGET: &str = "c::bn::service::sweeper";

/// Periodically expires the requests that have waited longer than the request timeout.
pub struct RequestSweeper {
    correlator: Arc<RequestCorrelator>,
    request_timeout: Duration,
    sweep_interval: Duration,
}

impl RequestSweeper {
    pub fn new(correlator: Arc<RequestCorrelator>, config: &BaseNodeServiceConfig) -> Self {
        Self {
            correlator,
            request_timeout: config.request_timeout,
            sweep_interval: config.sweep_interval,
        }
    }

    /// Sweeps on every tick of the sweep interval until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F)
    where F: Future<Output = ()> {
        // A zero period is not a valid interval
        let mut interval = time::interval(self.sweep_interval.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);
        debug!(
            target: LOG_TARGET,
            "Request sweeper started (interval {:.2?}, timeout {:.2?})", self.sweep_interval, self.request_timeout
        );
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.sweep();
                },
                _ = &mut shutdown => {
                    info!(target: LOG_TARGET, "Request sweeper shutting down");
                    break;
                }
            }
        }
    }

    /// Expires the requests that are older than the request timeout now, returning how many expired.
    pub fn sweep(&self) -> usize {
        let mut num_expired = 0;
        for request_key in self.correlator.sweep(Instant::now(), self.request_timeout) {
            warn!(
                target: LOG_TARGET,
                "Request {} expired without a response after {:.2?}", request_key, self.request_timeout
            );
            num_expired += 1;
        }
        num_expired
    }
}
