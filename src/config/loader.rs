use crate::config::admission::AdmissionConfig;
use crate::config::scheduling::SchedulingConfig;
use crate::error::{Error, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub admission: AdmissionConfig,
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Defaults, then `config/default.toml`, then `config/<env>.toml`, then
    /// `TASKGATE__*` environment variables.
    pub fn load(env: &str) -> Result<Self> {
        Self::load_from("config", env)
    }

    pub fn load_from(dir: &str, env: &str) -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, env)).required(false))
            .add_source(
                Environment::with_prefix("TASKGATE")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::finish(builder)
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Config::try_from(&AppConfig::default())
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        Ok(Config::builder().add_source(defaults))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: AppConfig = builder
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config.admission.validate()?;
        Ok(config)
    }
}
