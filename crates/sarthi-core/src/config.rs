use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 18790;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_UPSTREAM_URL: &str = "https://combinedbotbackend.onrender.com/query";
pub const PROXY_ROUTE: &str = "/api/chat";

/// Top-level config (sarthi.toml + SARTHI_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SarthiConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// The external question-answering service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// Request timeout in seconds. Unset means requests wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub endpoint: ChatEndpoint,
}

/// Where the terminal chat sends its queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatEndpoint {
    /// Through the local gateway's proxy route.
    #[default]
    Proxy,
    /// Straight to the upstream service.
    Direct,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

impl SarthiConfig {
    /// Load config from a TOML file with SARTHI_* env var overrides.
    ///
    /// Nested keys use a double underscore: `SARTHI_UPSTREAM__TIMEOUT_SECS=30`.
    /// A missing file is not an error; every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: SarthiConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("SARTHI_").split("__"))
            .extract()
            .map_err(|e| crate::error::SarthiError::Config(e.to_string()))?;

        Ok(config)
    }

    /// URL of this gateway's proxy route, as seen from the same host.
    pub fn proxy_url(&self) -> String {
        let host = match self.gateway.bind.as_str() {
            "0.0.0.0" | "::" | "[::]" => DEFAULT_BIND,
            other => other,
        };
        format!("http://{}:{}{}", host, self.gateway.port, PROXY_ROUTE)
    }

    /// URL the terminal chat should POST to.
    pub fn chat_url(&self, endpoint: ChatEndpoint) -> String {
        match endpoint {
            ChatEndpoint::Proxy => self.proxy_url(),
            ChatEndpoint::Direct => self.upstream.url.clone(),
        }
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.sarthi/sarthi.toml", home)
}
