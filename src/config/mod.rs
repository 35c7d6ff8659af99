/// Configuration system for cobot.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::CobotConfig::default()`]
/// 2. **User global config** — `~/.cobot/config.toml`
/// 3. **Project local config** — `.cobot.toml` in the current working directory
/// 4. **Environment variables** — `COBOT_*` overrides (highest precedence)
///
/// Later layers override earlier ones key by key: a file that only sets
/// `backend.base_url` leaves every other value from the layer below intact.
///
/// # Usage
///
/// ```rust,ignore
/// use cobot::config;
///
/// let cfg = config::load();
/// let backend = cobot::backend::HttpBackend::from_config(&cfg.backend);
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::CobotConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved cobot configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. Malformed files are skipped with a warning.
pub fn load() -> CobotConfig {
    let mut merged = match toml::Value::try_from(CobotConfig::default()) {
        Ok(value) => value,
        Err(_) => return with_env(CobotConfig::default()),
    };

    for path in [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
    {
        if let Some(layer) = load_toml_layer(&path) {
            merge_values(&mut merged, layer);
        }
    }

    let config = merged.try_into().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "merged config invalid, using defaults");
        CobotConfig::default()
    });

    with_env(config)
}

fn with_env(mut config: CobotConfig) -> CobotConfig {
    apply_env_overrides(&mut config);
    config
}

/// Read one TOML layer as a raw value tree.
///
/// Returns `None` if the file doesn't exist or the content is malformed.
fn load_toml_layer(path: &PathBuf) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Recursively overlay `overlay` onto `base`: tables merge key by key, any
/// other value replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.cobot/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cobot").join("config.toml"))
}

/// Path to the project local config: `.cobot.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".cobot.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `COBOT_BACKEND_URL` — backend base URL
/// - `COBOT_BACKEND_TIMEOUT_MS` — request timeout (`0` = none)
/// - `COBOT_ITEMS_PER_PAGE` — chat page size
/// - `COBOT_SERVER_ADDR` — listen address for `cobot serve`
/// - `COBOT_LOG` — log filter used when `RUST_LOG` is unset
fn apply_env_overrides(config: &mut CobotConfig) {
    if let Ok(val) = std::env::var("COBOT_BACKEND_URL")
        && !val.is_empty()
    {
        config.backend.base_url = val;
    }
    if let Ok(val) = std::env::var("COBOT_BACKEND_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.backend.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("COBOT_ITEMS_PER_PAGE")
        && let Ok(n) = val.parse::<u32>()
        && n > 0
    {
        config.chat.items_per_page = n;
    }
    if let Ok(val) = std::env::var("COBOT_SERVER_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Ok(val) = std::env::var("COBOT_LOG")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.cobot/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.cobot/ directory")?;
    }

    fs::write(&path, CobotConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single dotted key (e.g. `backend.base_url`) in the global config
/// file, creating the file from defaults if needed.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&CobotConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    let defaults =
        toml::Value::try_from(CobotConfig::default()).context("failed to build default config")?;
    seed_key(&mut root, &defaults, key);
    set_toml_value(&mut root, key, value)?;

    // Reject edits that would leave an unloadable file behind.
    let _: CobotConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Copy the sections and leaf named by a dotted key from `defaults` into
/// `root` where a partial file leaves them out. Existing values are kept;
/// keys unknown to the defaults are left for [`set_toml_value`] to reject.
fn seed_key(root: &mut toml::Value, defaults: &toml::Value, key: &str) {
    let mut current = root;
    let mut default = defaults;
    for part in key.split('.') {
        let Some(default_child) = default.get(part) else {
            return;
        };
        let Some(table) = current.as_table_mut() else {
            return;
        };
        let seed = if default_child.is_table() {
            toml::Value::Table(toml::map::Map::new())
        } else {
            default_child.clone()
        };
        current = table.entry(part.to_string()).or_insert(seed);
        default = default_child;
    }
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The key must already exist; the new value is parsed according to the
/// type of the existing one.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted, e.g. 'backend.base_url'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("unsupported value type at '{key}'"),
        None => anyhow::bail!("config key not found: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
