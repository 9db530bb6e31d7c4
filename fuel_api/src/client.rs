use crate::config::Config;
use crate::errors::FuelError;
use crate::utils::find_executable;
use failure::Error;
use itertools::Itertools;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const FUEL_BIN: &str = "fuel";

/// Runs the Fuel command line client.
pub struct FuelClient {
    bin: PathBuf,
    node_args: Vec<String>,
}

impl fmt::Debug for FuelClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FuelClient")
            .field("command", &self.command_line())
            .finish()
    }
}

impl FuelClient {
    pub fn new<P: Into<PathBuf>>(bin: P, node_args: Vec<String>) -> FuelClient {
        FuelClient {
            bin: bin.into(),
            node_args,
        }
    }

    /// Resolve the executable named by the configuration, or `fuel` on the
    /// search path when none is configured.
    pub fn from_config(config: &Config) -> Result<FuelClient, Error> {
        let name = config.fuel_bin.as_deref().unwrap_or(FUEL_BIN);
        let bin = find_executable(name).ok_or_else(|| FuelError::ExecutableNotFound(name.into()))?;
        debug!("Using Fuel client at {}", bin.display());
        Ok(FuelClient::new(bin, config.node_args.clone()))
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    pub fn command_line(&self) -> String {
        let bin = self.bin.to_string_lossy();
        std::iter::once(&*bin)
            .chain(self.node_args.iter().map(String::as_str))
            .join(" ")
    }

    /// Run the node listing command and return its standard output.
    ///
    /// An unsuccessful exit is reported as `FuelError::InputUnavailable` with
    /// the captured standard error, so callers never see partial output.
    pub fn node_list_raw(&self) -> Result<String, Error> {
        info!("Running {}", self.command_line());
        let output = Command::new(&self.bin).args(&self.node_args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("{} failed with {}", self.command_line(), output.status);
            let msg = if stderr.is_empty() {
                format!("{} failed with {}", self.command_line(), output.status)
            } else {
                stderr
            };
            return Err(FuelError::InputUnavailable(msg).into());
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            FuelError::MalformedRecord(format!(
                "{} output is not UTF-8: {}",
                self.command_line(),
                e
            ))
        })?;
        debug!("Node listing returned {} bytes", stdout.len());
        Ok(stdout)
    }
}
