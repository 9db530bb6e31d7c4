//! Thin wrapper around the Fuel command line client.
//!
//! This crate knows how to find the `fuel` executable, how to run the node
//! listing command and how to load the small amount of configuration needed
//! to do so. It does not interpret the node records; see the
//! `fuel_inventory` crate for that.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod client;
pub mod config;
pub mod errors;
pub mod utils;

pub use crate::client::FuelClient;
pub use crate::config::Config;
pub use crate::errors::FuelError;
