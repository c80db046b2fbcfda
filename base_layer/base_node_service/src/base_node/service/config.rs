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

use serde::{Deserialize, Serialize};

use crate::{
    configuration::{serializers, SubConfigPath},
    consts::{
        BASE_NODE_SERVICE_MAX_PENDING_REQUESTS,
        BASE_NODE_SERVICE_REQUEST_TIMEOUT,
        BASE_NODE_SERVICE_SWEEP_INTERVAL,
        DEFAULT_MAX_BLOCK_WEIGHT,
    },
};

/// Configuration for the BaseNodeService.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseNodeServiceConfig {
    /// The allocated waiting time for a request waiting for service responses from remote base nodes.
    #[serde(with = "serializers::seconds")]
    pub request_timeout: Duration,
    /// How often waiting requests are checked for expiry.
    #[serde(with = "serializers::seconds")]
    pub sweep_interval: Duration,
    /// The maximum number of requests that may be waiting for a response at once. Further requests are answered
    /// with `Busy`.
    pub max_pending_requests: usize,
    /// Reject inbound requests whose key is already being answered.
    pub duplicate_suppression: bool,
    /// The weight new block templates are limited to.
    pub max_block_weight: u64,
}

impl Default for BaseNodeServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout: BASE_NODE_SERVICE_REQUEST_TIMEOUT,
            sweep_interval: BASE_NODE_SERVICE_SWEEP_INTERVAL,
            max_pending_requests: BASE_NODE_SERVICE_MAX_PENDING_REQUESTS,
            duplicate_suppression: true,
            max_block_weight: DEFAULT_MAX_BLOCK_WEIGHT,
        }
    }
}

impl SubConfigPath for BaseNodeServiceConfig {
    fn main_key_prefix() -> &'static str {
        "base_node.service"
    }
}

#[cfg(test)]
mod test {
    use config::Config;

    use super::*;
    use crate::configuration::DefaultConfigLoader;

    #[test]
    fn it_loads_defaults_for_missing_values() {
        let config = Config::builder()
            .set_override("base_node.service.request_timeout", 30)
            .unwrap()
            .set_override("base_node.service.duplicate_suppression", false)
            .unwrap()
            .build()
            .unwrap();
        let service_config = BaseNodeServiceConfig::load_from(&config).unwrap();
        assert_eq!(service_config.request_timeout, Duration::from_secs(30));
        assert!(!service_config.duplicate_suppression);
        assert_eq!(service_config.sweep_interval, BASE_NODE_SERVICE_SWEEP_INTERVAL);
        assert_eq!(service_config.max_pending_requests, BASE_NODE_SERVICE_MAX_PENDING_REQUESTS);
        assert_eq!(service_config.max_block_weight, DEFAULT_MAX_BLOCK_WEIGHT);
    }

    #[test]
    fn it_loads_from_toml() {
        let toml = r#"
            [base_node.service]
            sweep_interval = 1
            max_pending_requests = 16
        "#;
        let config = Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap();
        let service_config = BaseNodeServiceConfig::load_from(&config).unwrap();
        assert_eq!(service_config.sweep_interval, Duration::from_secs(1));
        assert_eq!(service_config.max_pending_requests, 16);
        assert_eq!(service_config.request_timeout, BASE_NODE_SERVICE_REQUEST_TIMEOUT);
    }

    #[test]
    fn it_rejects_unknown_fields() {
        let config = Config::builder()
            .set_override("base_node.service.broadcast_peer_count", 3)
            .unwrap()
            .build()
            .unwrap();
        assert!(BaseNodeServiceConfig::load_from(&config).is_err());
    }
}
