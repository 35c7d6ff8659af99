/// Configuration schema and defaults for cobot.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[backend]`, `[chat]`, `[server]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values they
/// want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level cobot configuration.
///
/// Maps directly to the `~/.cobot/config.toml` and `.cobot.toml` file
/// schemas. Missing sections and fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CobotConfig {
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

/// Where the recommendation backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL; endpoint paths (`/api/...`) are appended to it.
    pub base_url: String,
    /// Per-request timeout in milliseconds. `0` waits indefinitely.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [chat]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Recommendations requested per chat result page.
    pub items_per_page: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { items_per_page: 10 }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `cobot serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5002".to_string(),
            open_browser: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`,
    /// `cobot=debug`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl CobotConfig {
    /// The annotated TOML written by `cobot config init`.
    pub fn default_toml() -> String {
        r#"# cobot configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (COBOT_*)
#   2. Project config (.cobot.toml in current directory)
#   3. User global config (~/.cobot/config.toml)
#   4. Built-in defaults

[backend]
base_url = "http://127.0.0.1:5001"
timeout_ms = 0                        # 0 = wait indefinitely

[chat]
items_per_page = 10

[server]
addr = "127.0.0.1:5002"
open_browser = false

[logging]
level = "info"                        # RUST_LOG takes precedence when set
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
