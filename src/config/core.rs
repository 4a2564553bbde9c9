use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};

use super::{CliOverrides, GenerateConfig};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    pub fn load(custom_config: Option<&str>, cli_overrides: Option<CliOverrides>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // A custom config replaces the working-directory lookup
        if let Some(custom_path) = custom_config {
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            figment = figment
                .merge(Toml::file("paramfuzz.toml"))
                .merge(Json::file("paramfuzz.json"))
                .merge(Yaml::file("paramfuzz.yaml"))
                .merge(Yaml::file("paramfuzz.yml"));
        }

        figment = figment.merge(Env::prefixed("PARAMFUZZ_"));

        // CLI flags always win
        if let Some(cli) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides {:?}", cli);
            figment = figment.merge(Serialized::defaults(cli));
        }

        Ok(ConfigLoader { figment })
    }

    /// Extract and validate the merged configuration.
    pub fn extract(&self) -> Result<GenerateConfig> {
        let config: GenerateConfig = self
            .figment
            .extract()
            .context("Invalid paramfuzz configuration")?;
        Ok(config.validate())
    }
}
