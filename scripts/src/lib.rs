//! Scripts for deploying and wiring together the Battle Wager smart contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod migrations;
pub mod proxy;
pub mod registry;
pub mod runner;
mod solidity;
pub mod types;
pub mod units;
pub mod utils;
