// ⚙️ Configuration - environment-driven server settings

use serde::Serialize;
use std::env;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_BATCH_ITEMS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// `REGNUM_BIND`
    pub bind_addr: String,

    /// `REGNUM_MAX_BATCH_ITEMS` - upper bound for one batch request
    pub max_batch_items: usize,

    /// `REGNUM_CORS_PERMISSIVE`
    pub cors_permissive: bool,

    /// `REGNUM_LOG_JSON` - JSON log lines instead of human-readable
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND.to_string(),
            max_batch_items: DEFAULT_MAX_BATCH_ITEMS,
            cors_permissive: true,
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any name → value lookup; unset or unparsable values
    /// fall back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        ServerConfig {
            bind_addr: lookup("REGNUM_BIND")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            max_batch_items: lookup("REGNUM_MAX_BATCH_ITEMS")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_batch_items),
            cors_permissive: lookup("REGNUM_CORS_PERMISSIVE")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.cors_permissive),
            log_json: lookup("REGNUM_LOG_JSON")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.log_json),
        }
    }
}

pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
