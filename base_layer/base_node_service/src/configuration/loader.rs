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

//! # Configuration loader
//!
//! Every configurable component owns one section of the application's configuration. The section is named by
//! [`SubConfigPath::main_key_prefix`] and [`DefaultConfigLoader`] deserializes it, taking any value that the
//! configuration source does not provide from the struct's [`Default`].
//!
//! ## Example
//!
//! ```
//! # use config::Config;
//! # use serde::{Deserialize, Serialize};
//! use tari_base_node_service::configuration::{DefaultConfigLoader, SubConfigPath};
//!
//! #[derive(Serialize, Deserialize)]
//! struct HeaderSyncConfig {
//!     max_headers: u64,
//!     peer_timeout: u64,
//! }
//! impl Default for HeaderSyncConfig {
//!     fn default() -> Self {
//!         Self {
//!             max_headers: 100,
//!             peer_timeout: 30,
//!         }
//!     }
//! }
//! impl SubConfigPath for HeaderSyncConfig {
//!     fn main_key_prefix() -> &'static str {
//!         "base_node.header_sync"
//!     }
//! }
//! let config = Config::builder()
//!     .set_override("base_node.header_sync.peer_timeout", 90)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let sync_config = <HeaderSyncConfig as DefaultConfigLoader>::load_from(&config).unwrap();
//! assert_eq!(sync_config.peer_timeout, 90);
//! assert_eq!(sync_config.max_headers, 100);
//! ```

use config::{Config, ConfigError};
use thiserror::Error;

/// Names the configuration section a struct is loaded from.
pub trait SubConfigPath {
    /// Returns the string representing the top level configuration category.
    /// For example, in the following TOML file, options for `main_key_prefix` would be `base_node.service` or
    /// `base_node.p2p`:
    /// ```toml
    /// [base_node.service]
    ///   request_timeout = 30
    /// [base_node.p2p]
    ///   port = 18189
    /// ```
    fn main_key_prefix() -> &'static str;
}

/// Configuration loader based on SubConfigPath selectors with Defaults
pub trait DefaultConfigLoader:
    SubConfigPath + Default + serde::ser::Serialize + for<'de> serde::de::Deserialize<'de>
{
    /// Try to load configuration from supplied Config by `main_key_prefix()`.
    ///
    /// Default values will be taken from Default impl for struct
    fn load_from(config: &Config) -> Result<Self, ConfigurationError> {
        let default = <Self as Default>::default();
        let buf = serde_json::to_string(&default)?;
        let value: config::Value = serde_json::from_str(buf.as_str())?;
        let merger = Config::builder()
            .set_default(Self::main_key_prefix(), value)?
            .add_source(config.clone())
            .build()?;
        Ok(merger.get(Self::main_key_prefix())?)
    }
}
impl<C> DefaultConfigLoader for C where C: SubConfigPath + Default + serde::ser::Serialize + for<'de> serde::de::Deserialize<'de>
{}

//-------------------------------------      Configuration errors      --------------------------------------//

#[derive(Debug, Error)]
#[error("Invalid value for {field}: {message}")]
pub struct ConfigurationError {
    field: String,
    message: String,
}

impl ConfigurationError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, msg: M) -> Self {
        ConfigurationError {
            field: field.into(),
            message: msg.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl From<ConfigError> for ConfigurationError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileParse { uri: Some(uri), cause } => Self::new(uri, cause.to_string()),
            ConfigError::Type { ref key, .. } => Self::new(format!("{:?}", key), err.to_string()),
            ConfigError::NotFound(key) => Self::new(key, "required key not found"),
            x => Self::new("", x.to_string()),
        }
    }
}

impl From<serde_json::error::Error> for ConfigurationError {
    fn from(err: serde_json::error::Error) -> Self {
        Self::new("", err.to_string())
    }
}

#[cfg(test)]
mod test {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[test]
    fn configuration_error() {
        let e = ConfigurationError::new("test", "is a string");
        assert_eq!(e.to_string(), "Invalid value for test: is a string");
    }

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PeerLimits {
        max_inbound: usize,
        #[serde(default)]
        max_outbound: usize,
    }

    impl Default for PeerLimits {
        fn default() -> Self {
            Self {
                max_inbound: 8,
                max_outbound: 16,
            }
        }
    }

    impl SubConfigPath for PeerLimits {
        fn main_key_prefix() -> &'static str {
            "base_node.peer_limits"
        }
    }

    #[test]
    fn it_falls_back_to_defaults() -> Result<(), ConfigurationError> {
        let config = Config::builder().build()?;
        let limits = <PeerLimits as DefaultConfigLoader>::load_from(&config)?;
        assert_eq!(limits.max_inbound, 8);
        assert_eq!(limits.max_outbound, 16);

        let config = Config::builder()
            .set_override("base_node.peer_limits.max_inbound", 2)?
            .build()?;
        let limits = <PeerLimits as DefaultConfigLoader>::load_from(&config)?;
        assert_eq!(limits.max_inbound, 2);
        assert_eq!(limits.max_outbound, 16);
        Ok(())
    }

    #[test]
    fn it_rejects_unknown_fields() -> Result<(), ConfigurationError> {
        let config = Config::builder()
            .set_override("base_node.peer_limits.max_banned", 11)?
            .build()?;
        assert!(<PeerLimits as DefaultConfigLoader>::load_from(&config).is_err());
        Ok(())
    }
}
