//! Configuration for locating and invoking the Fuel client.
//!
//! Settings are layered: built-in defaults, then a profile from a TOML file,
//! then the `FUEL_BIN` environment variable. Callers may override the
//! executable once more with [`Config::with_fuel_bin`].
//!
//! The file holds one table per profile:
//!
//! ```toml
//! [default]
//! fuel_bin = "/usr/bin/fuel"
//!
//! [lab]
//! fuel_bin = "~/venvs/fuel/bin/fuel"
//! node_args = ["node", "--env", "4", "--json"]
//! ```

use crate::errors::FuelError;
use crate::utils::expand_home;
use failure::Error;
use std::collections::HashMap;
use std::env;
use std::fs;

pub const DEFAULT_CONFIG_PATH: &str = "~/.fuel/inventory.toml";
pub const DEFAULT_PROFILE: &str = "default";

pub const CONFIG_PATH_VAR: &str = "FUEL_INVENTORY_CONFIG";
pub const PROFILE_VAR: &str = "FUEL_PROFILE";
pub const FUEL_BIN_VAR: &str = "FUEL_BIN";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Explicit executable; when unset `fuel` is looked up on `PATH`.
    pub fuel_bin: Option<String>,
    pub node_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            fuel_bin: None,
            node_args: vec![String::from("node"), String::from("--json")],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Profile {
    fuel_bin: Option<String>,
    node_args: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from the locations named by the environment.
    pub fn from_env() -> Result<Config, Error> {
        let path = env::var(CONFIG_PATH_VAR).ok();
        let profile = env::var(PROFILE_VAR).ok();
        let fuel_bin = env::var(FUEL_BIN_VAR).ok().filter(|b| !b.is_empty());
        Config::load(path.as_deref(), profile.as_deref(), fuel_bin.as_deref())
    }

    pub fn load(
        path: Option<&str>,
        profile: Option<&str>,
        fuel_bin: Option<&str>,
    ) -> Result<Config, Error> {
        let config_path = expand_home(path.unwrap_or(DEFAULT_CONFIG_PATH));

        let mut config = if config_path.is_file() {
            debug!("Reading configuration from {}", config_path.display());
            let text = fs::read_to_string(&config_path)?;
            Config::from_toml(&text, profile).map_err(|e| match e {
                FuelError::Config(msg) => {
                    FuelError::Config(format!("{}: {}", config_path.display(), msg))
                }
                other => other,
            })?
        } else if path.is_some() {
            return Err(FuelError::Config(format!(
                "config file {} not found",
                config_path.display()
            ))
            .into());
        } else if let Some(name) = profile {
            return Err(FuelError::Config(format!(
                "profile {} requested but {} does not exist",
                name,
                config_path.display()
            ))
            .into());
        } else {
            Config::default()
        };

        if let Some(bin) = fuel_bin {
            config = config.with_fuel_bin(bin);
        }
        Ok(config)
    }

    /// Parse a configuration file and select a profile from it. A missing
    /// `default` profile falls back to the built-in defaults, a missing named
    /// profile is an error.
    pub fn from_toml(text: &str, profile: Option<&str>) -> Result<Config, FuelError> {
        let mut profiles: HashMap<String, Profile> =
            toml::from_str(text).map_err(|e| FuelError::Config(e.to_string()))?;

        let selected = match profile {
            Some(name) => profiles
                .remove(name)
                .ok_or_else(|| FuelError::Config(format!("profile {} not found", name)))?,
            None => profiles.remove(DEFAULT_PROFILE).unwrap_or_default(),
        };

        let mut config = Config::default();
        if let Some(bin) = selected.fuel_bin {
            config.fuel_bin = Some(bin);
        }
        if let Some(args) = selected.node_args {
            config.node_args = args;
        }
        Ok(config)
    }

    pub fn with_fuel_bin<S: Into<String>>(mut self, bin: S) -> Config {
        self.fuel_bin = Some(bin.into());
        self
    }
}
