use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime settings for the binary. Experiment constants are not configurable here.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LabConfig {
    pub log_level: String,
    pub output_dir: PathBuf,
}

impl LabConfig {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let config = ConfigLoader::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().into_owned())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("INFERENCE_LAB"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}
