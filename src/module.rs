//! Ansible binary module and dynamic inventory script protocols.
//!
//! Ansible runs a binary module with the path of a JSON file holding the
//! module arguments, and reads a single JSON object from its standard
//! output. Internal `_ansible_*` keys are accepted and ignored.
//!
//! As an inventory script the same binary answers `--list` with the whole
//! inventory and `--host <name>` with that host's variables.

use crate::load_inventory;
use crate::models::Inventory;
use failure::Error;
use fuel_api::{Config, FuelError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const MODULE_NAME: &str = "fuel_inventory";

const SUPPORTED_PARAMETERS: &[&str] = &["fuel_bin"];
const WRAPPED_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleArgs {
    pub fuel_bin: Option<String>,
}

impl ModuleArgs {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ModuleArgs, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            FuelError::InvalidArguments(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(text.parse()?)
    }

    fn from_map(mut params: Map<String, Value>) -> Result<ModuleArgs, FuelError> {
        if let Some(Value::Object(inner)) = params.remove(WRAPPED_ARGS_KEY) {
            params = inner;
        }

        let mut unsupported: Vec<&str> = params
            .keys()
            .map(String::as_str)
            .filter(|k| !k.starts_with("_ansible_") && !SUPPORTED_PARAMETERS.contains(k))
            .collect();
        if !unsupported.is_empty() {
            unsupported.sort_unstable();
            return Err(FuelError::UnsupportedParameters {
                module: MODULE_NAME.into(),
                keys: unsupported.join(", "),
                supported: SUPPORTED_PARAMETERS.join(", "),
            });
        }

        let fuel_bin = match params.get("fuel_bin") {
            None | Some(Value::Null) => None,
            Some(Value::String(bin)) => Some(bin.clone()),
            Some(other) => {
                return Err(FuelError::InvalidArguments(format!(
                    "fuel_bin must be a string, got {}",
                    other
                )))
            }
        };
        Ok(ModuleArgs { fuel_bin })
    }
}

impl std::str::FromStr for ModuleArgs {
    type Err = FuelError;

    fn from_str(s: &str) -> Result<ModuleArgs, FuelError> {
        if s.trim().is_empty() {
            return Ok(ModuleArgs::default());
        }
        match serde_json::from_str(s) {
            Ok(Value::Object(params)) => ModuleArgs::from_map(params),
            Ok(other) => Err(FuelError::InvalidArguments(format!(
                "expected a JSON object, got {}",
                other
            ))),
            Err(e) => Err(FuelError::InvalidArguments(e.to_string())),
        }
    }
}

/// The JSON object a module prints before exiting.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ModuleResponse {
    Exit {
        changed: bool,
        ansible_facts: Inventory,
    },
    Fail {
        failed: bool,
        msg: String,
    },
}

impl ModuleResponse {
    /// Querying Fuel never changes anything on the managed hosts.
    pub fn exit(inventory: Inventory) -> ModuleResponse {
        ModuleResponse::Exit {
            changed: false,
            ansible_facts: inventory,
        }
    }

    pub fn fail(err: &Error) -> ModuleResponse {
        ModuleResponse::Fail {
            failed: true,
            msg: err.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ModuleResponse::Exit { .. } => 0,
            ModuleResponse::Fail { .. } => 1,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, Error> {
        to_json(self, pretty)
    }
}

impl From<Result<Inventory, Error>> for ModuleResponse {
    fn from(result: Result<Inventory, Error>) -> ModuleResponse {
        match result {
            Ok(inventory) => ModuleResponse::exit(inventory),
            Err(e) => {
                error!("{}", e);
                ModuleResponse::fail(&e)
            }
        }
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Run as a module. A `fuel_bin` module argument wins over `fuel_bin`
/// given on the command line.
pub fn run_module(
    args: Result<ModuleArgs, Error>,
    config: Config,
    fuel_bin: Option<&str>,
) -> ModuleResponse {
    let result = args.and_then(|args| {
        let fuel_bin = args.fuel_bin.as_deref().or(fuel_bin);
        load_inventory(config, fuel_bin)
    });
    ModuleResponse::from(result)
}

/// `--host` output: the host's variables, or `{}` for an unknown host.
/// Without a host the whole inventory is returned, as for `--list`.
pub fn host_json(
    inventory: &Inventory,
    host: Option<&str>,
    pretty: bool,
) -> Result<String, Error> {
    match host {
        Some(host) => match inventory.hostvars(host) {
            Some(vars) => to_json(vars, pretty),
            None => {
                debug!("Host {} is not in the inventory", host);
                Ok(String::from("{}"))
            }
        },
        None => to_json(inventory, pretty),
    }
}

/// What an inventory script run prints, and where.
#[derive(Debug, PartialEq)]
pub enum ScriptOutput {
    Stdout(String),
    Stderr(String),
}

impl ScriptOutput {
    pub fn exit_code(&self) -> i32 {
        match self {
            ScriptOutput::Stdout(_) => 0,
            ScriptOutput::Stderr(_) => 1,
        }
    }
}

impl From<Result<String, Error>> for ScriptOutput {
    fn from(result: Result<String, Error>) -> ScriptOutput {
        match result {
            Ok(json) => ScriptOutput::Stdout(json),
            Err(e) => ScriptOutput::Stderr(e.to_string()),
        }
    }
}

pub fn run_script(
    config: Config,
    fuel_bin: Option<&str>,
    host: Option<&str>,
    pretty: bool,
) -> ScriptOutput {
    let result =
        load_inventory(config, fuel_bin).and_then(|inventory| host_json(&inventory, host, pretty));
    ScriptOutput::from(result)
}
