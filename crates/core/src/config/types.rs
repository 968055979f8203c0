use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::remote::OmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: OmdbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Movie cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// How long a cached movie stays fresh, in minutes
    #[serde(default = "default_staleness_mins")]
    pub staleness_mins: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            staleness_mins: default_staleness_mins(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("marquee.db")
}

fn default_staleness_mins() -> u32 {
    5
}

/// Search pagination configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Results per page as served by the movie API
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Hard cap on how many pages a session will load
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_pages() -> u32 {
    100
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub api: SanitizedApiConfig,
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub search: SearchConfig,
}

/// Sanitized movie API config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            api: SanitizedApiConfig {
                base_url: config.api.base_url.clone(),
                api_key_configured: !config.api.api_key.is_empty(),
                timeout_secs: config.api.timeout_secs,
            },
            server: config.server.clone(),
            cache: config.cache.clone(),
            search: config.search.clone(),
        }
    }
}
