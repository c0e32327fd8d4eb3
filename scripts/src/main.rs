use bw_scripts::{cli::Cli, deployer::RpcDeployer, errors::ScriptError};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        deployments_path,
        artifacts_dir,
        network,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let deployer = RpcDeployer::new(&priv_key, &rpc_url, network)?;

    command
        .run(&deployer, &deployments_path, &artifacts_dir)
        .await
}
