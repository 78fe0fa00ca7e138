//! Routing service proxy configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Routing proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the routing service; the proxy is disabled when unset
    #[serde(default)]
    pub base_url: Option<String>,
    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

impl RoutingConfig {
    /// Validate routing configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)
                .map_err(|e| format!("Invalid routing base_url '{}': {}", base_url, e))?;
        }
        if self.timeout == 0 {
            return Err("Routing timeout cannot be 0".to_string());
        }
        Ok(())
    }
}
