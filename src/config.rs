// Catalog configuration loaded from TOML.
// Every section is optional; missing values fall back to the demo defaults.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub log_level: String,
    pub cake: CakeConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CakeConfig {
    pub base_sugar: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub stock: u32,
    pub count_delay_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            cake: CakeConfig::default(),
            proxy: ProxyConfig::default(),
        }
    }
}

impl Default for CakeConfig {
    fn default() -> Self {
        Self { base_sugar: 300 }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            stock: 120,
            count_delay_ms: 500,
        }
    }
}

impl ProxyConfig {
    pub fn count_delay(&self) -> Duration {
        Duration::from_millis(self.count_delay_ms)
    }
}

impl CatalogConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
