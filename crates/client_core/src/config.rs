use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "client.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub debug: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            debug: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    timeout: Option<u64>,
    debug: Option<bool>,
}

/// Defaults, then `client.toml` in the working directory, then the process environment.
pub fn load_config() -> anyhow::Result<ApiConfig> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE), |key| std::env::var(key).ok())
}

pub fn load_config_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ApiConfig> {
    let mut config = ApiConfig::default();

    let raw = match fs::read_to_string(file) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", file.display()));
        }
    };

    if let Some(raw) = raw {
        let file_cfg: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", file.display()))?;
        if let Some(v) = file_cfg.base_url {
            config.base_url = v;
        }
        if let Some(v) = file_cfg.timeout {
            apply_timeout_ms(&mut config, v);
        }
        if let Some(v) = file_cfg.debug {
            config.debug = v;
        }
    }

    if let Some(v) = env_value(&env, "BASE_URL") {
        config.base_url = v;
    }

    if let Some(v) = env_value(&env, "TIMEOUT") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => apply_timeout_ms(&mut config, parsed),
            Err(_) => warn!(value = %v, "ignoring unparseable TIMEOUT"),
        }
    }

    if let Some(debug) = debug_from_env(&env) {
        config.debug = debug;
    }

    config.base_url = normalize_base_url(&config.base_url)?;
    Ok(config)
}

/// The environment's `DEBUG` flag alone, for callers that need it before the rest of
/// the config can be loaded and logged.
pub fn debug_from_env(env: impl Fn(&str) -> Option<String>) -> Option<bool> {
    env_value(&env, "DEBUG").map(|v| parse_flag(&v))
}

/// `APP__`-prefixed keys win over bare ones.
fn env_value(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(&format!("APP__{key}")).or_else(|| env(key))
}

fn apply_timeout_ms(config: &mut ApiConfig, timeout_ms: u64) {
    if timeout_ms == 0 {
        warn!("ignoring non-positive request timeout");
        return;
    }
    config.timeout = Duration::from_millis(timeout_ms);
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Collapses a repeated scheme (`https://https://host`), strips trailing slashes and
/// requires an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let mut base = raw.trim();
    if base.is_empty() {
        return Ok(DEFAULT_BASE_URL.to_string());
    }

    while let Some((_, rest)) = base.split_once("://") {
        if !(rest.starts_with("http://") || rest.starts_with("https://")) {
            break;
        }
        base = rest;
    }

    let base = base.trim_end_matches('/');
    let parsed = Url::parse(base).with_context(|| format!("invalid base url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported base url scheme '{}' in '{raw}'", parsed.scheme());
    }
    if parsed.host_str().is_none() {
        bail!("base url '{raw}' has no host");
    }

    Ok(base.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
