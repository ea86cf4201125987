//! Engine configuration: HNSW defaults and server bind address.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use vectorlite_index::HnswConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HnswSettings {
    pub m: usize,
    pub ef_construction: usize,
    pub ef_search: usize,
}

impl Default for HnswSettings {
    fn default() -> Self {
        let balanced = HnswConfig::balanced();
        Self {
            m: balanced.m,
            ef_construction: balanced.ef_construction,
            ef_search: balanced.ef_search,
        }
    }
}

impl From<&HnswSettings> for HnswConfig {
    fn from(settings: &HnswSettings) -> Self {
        Self {
            m: settings.m,
            ef_construction: settings.ef_construction,
            ef_search: settings.ef_search,
            m_l: 1.0 / 2.0_f64.ln(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9123".to_string(),
        }
    }
}

/// Root configuration for the HTTP service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub hnsw: HnswSettings,
    pub server: ServerSettings,
}

impl EngineConfig {
    /// Loads configuration with precedence: defaults → `./config/vectorlite.yaml`
    /// → env vars prefixed `VECTORLITE__` → the file named by `VECTORLITE_CONFIG`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("hnsw.m", 16)?
            .set_default("hnsw.ef_construction", 200)?
            .set_default("hnsw.ef_search", 200)?
            .set_default("server.bind_address", "0.0.0.0:9123")?
            .add_source(File::with_name("./config/vectorlite").required(false));

        if let Ok(path) = std::env::var("VECTORLITE_CONFIG") {
            builder = builder.add_source(File::with_name(&path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("VECTORLITE")
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hnsw.m == 0 {
            return Err(ConfigError::Message("hnsw.m must be > 0".to_string()));
        }
        if self.hnsw.ef_construction == 0 {
            return Err(ConfigError::Message(
                "hnsw.ef_construction must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
