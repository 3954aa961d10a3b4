//! Extension configuration model and loading.

use std::path::Path;
use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::links::{builtin_links, EscapeStyle, LinkDefinition};

/// Root configuration read from `tunelinks.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    /// Metadata provider endpoint and transport limits.
    pub provider: ProviderConfig,
    #[serde(default)]
    /// Extra link definitions appended after the built-in catalog.
    pub links: Vec<CustomLinkConfig>,
}

/// Provider endpoint preferences.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl ProviderConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// User-supplied link definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomLinkConfig {
    pub label: String,
    #[serde(default = "default_escape_style")]
    pub escape: EscapeStyle,
    #[serde(default)]
    pub artist_template: Option<String>,
    #[serde(default)]
    pub album_template: Option<String>,
    #[serde(default)]
    pub track_template: Option<String>,
}

impl CustomLinkConfig {
    fn into_definition(self) -> LinkDefinition {
        LinkDefinition {
            label: self.label,
            escape: self.escape,
            artist_template: self.artist_template,
            album_template: self.album_template,
            track_template: self.track_template,
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8100".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_read_timeout_ms() -> u64 {
    15_000
}

fn default_escape_style() -> EscapeStyle {
    EscapeStyle::PercentEncode
}

/// Full link catalog: built-ins first, then config-supplied links in
/// declaration order.
pub fn link_catalog(config: &Config) -> Vec<LinkDefinition> {
    let mut catalog = builtin_links();
    catalog.extend(
        config
            .links
            .iter()
            .cloned()
            .map(CustomLinkConfig::into_definition),
    );
    catalog
}

/// Reads configuration from `path`. A missing file yields defaults; an
/// unreadable or invalid file logs a warning and yields defaults.
pub fn load_or_default(path: &Path) -> Config {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Config::default(),
        Err(err) => {
            warn!("Failed to read config {}: {}", path.display(), err);
            return Config::default();
        }
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            warn!("Failed to parse config {}: {}", path.display(), err);
            Config::default()
        }
    }
}
