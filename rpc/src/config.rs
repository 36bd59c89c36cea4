//! Service configuration with TOML file support.

use std::net::SocketAddr;
use std::path::Path;

use salus_types::RewardParams;
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Configuration for the Salus service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP API binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Address that receives the charity share of achievement sales.
    #[serde(default = "default_charity_address")]
    pub charity_address: String,

    /// Address granted the controller role at startup. Without one, no
    /// role can ever be granted.
    #[serde(default)]
    pub controller_address: Option<String>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to expose the Prometheus `/metrics` endpoint.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    /// Reward amounts, thresholds, and authentication windows.
    #[serde(default)]
    pub params: RewardParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> SocketAddr {
    "127.0.0.1:7140".parse().expect("valid default listen addr")
}

fn default_charity_address() -> String {
    // Reference deployment charity wallet; operators override this.
    "sal_0000000000000000000000000000000000000000000000000000000000000000ca7a11ee".into()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config uses defaults")
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, RpcError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RpcError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| RpcError::Config(format!("failed to parse {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_addr.port(), 7140);
        assert_eq!(config.log_level, "info");
        assert!(config.enable_metrics);
        assert_eq!(config.params.eye_test_reward, 50);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
listen_addr = "0.0.0.0:9000"
log_level = "debug"

[params]
eye_test_reward = 75
"#
        )
        .unwrap();

        let config = ServiceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.params.eye_test_reward, 75);
        // Unlisted params keep their defaults.
        assert_eq!(config.params.exercise_reward, 10);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ServiceConfig::from_toml_file(Path::new("/does/not/exist.toml"));
        assert!(matches!(err, Err(RpcError::Config(_))));
    }
}
