//! Builds an Ansible inventory from the node list reported by Fuel.
//!
//! The interesting part is [`Inventory::build`](models::Inventory::build),
//! a pure transformation from parsed node records to inventory groups and
//! host variables. [`collect_inventory`] wires it to the Fuel client.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod models;
pub mod module;

pub use fuel_api::{Config, FuelClient, FuelError};

use crate::models::{Inventory, NodeList};
use failure::Error;

/// Fetch the current node list and turn it into an inventory.
pub fn collect_inventory(client: &FuelClient) -> Result<Inventory, Error> {
    let raw = client.node_list_raw()?;
    let nodes: NodeList = raw.parse()?;
    info!("Fuel reported {} nodes", nodes.len());
    Inventory::build(&nodes)
}

/// Resolve the Fuel client from `config`, with `fuel_bin` taking precedence
/// over the configured executable, and collect the inventory.
pub fn load_inventory(mut config: Config, fuel_bin: Option<&str>) -> Result<Inventory, Error> {
    if let Some(bin) = fuel_bin {
        config = config.with_fuel_bin(bin);
    }
    debug!("{:?}", config);
    let client = FuelClient::from_config(&config)?;
    collect_inventory(&client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(fixture: &str) -> FuelClient {
        FuelClient::new(
            "/bin/sh",
            vec![String::from("-c"), format!("cat fixtures/{}", fixture)],
        )
    }

    #[test]
    fn test_collect_inventory() {
        let inventory = collect_inventory(&cat("fuel-nodes-sample.json")).unwrap();
        assert_eq!(inventory.group("controller"), Some(&["node-24".to_string()][..]));
        assert_eq!(inventory.hostvars("node-24").unwrap().ip, "10.20.11.11");
    }

    #[test]
    fn test_collect_inventory_command_failure() {
        let client = FuelClient::new(
            "/bin/sh",
            vec![String::from("-c"), String::from("echo 'Unauthorized' >&2; exit 1")],
        );
        let err = collect_inventory(&client).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FuelError>(),
            Some(&FuelError::InputUnavailable(String::from("Unauthorized")))
        );
    }

    #[test]
    fn test_collect_inventory_malformed_output() {
        let err = collect_inventory(&cat("fuel-nodes-no-vendor.json")).unwrap_err();
        match err.downcast_ref::<FuelError>() {
            Some(FuelError::MalformedRecord(msg)) => assert!(msg.contains("manufacturer")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
