//! Definitions of CLI arguments and commands for deploy scripts

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{migrate, status},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_RPC_URL},
    deployer::ContractDeployer,
    errors::ScriptError,
};

/// Deploys the Battle Wager contracts & wires their addresses together
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIV_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Name under which deployments are recorded, defaults to the chain ID
    #[arg(short, long)]
    pub network: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Run the pending migrations
    Migrate(MigrateArgs),
    /// Print the deployments recorded for the network
    Status,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        deployer: &dyn ContractDeployer,
        deployments_path: &Path,
        artifacts_dir: &Path,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Migrate(args) => {
                migrate(args, deployer, deployments_path, artifacts_dir).await
            }
            Command::Status => status(deployer, deployments_path).await,
        }
    }
}

/// Run the pending migrations
#[derive(Args)]
pub struct MigrateArgs {
    /// Index of the last migration to run
    #[arg(short, long)]
    pub to: Option<u32>,

    /// Discard the deployments recorded for the network and run every migration again
    #[arg(long)]
    pub reset: bool,
}
