//! Implementations of the various deploy scripts

use std::path::Path;

use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    cli::MigrateArgs,
    deployer::ContractDeployer,
    errors::ScriptError,
    migrations::MigrationEnv,
    registry::{persist_registry, DeploymentRegistry, DeploymentsFile},
    runner::MigrationRunner,
};

/// Run the pending migrations against the deployer's network, recording
/// deployments in the deployments file as they complete
pub async fn migrate(
    args: MigrateArgs,
    deployer: &dyn ContractDeployer,
    deployments_path: &Path,
    artifacts_dir: &Path,
) -> Result<(), ScriptError> {
    let context = deployer.execution_context().await?;
    let artifacts = ArtifactStore::load_dir(artifacts_dir)?;

    let mut deployments = DeploymentsFile::load(deployments_path)?;
    if args.reset {
        warn!("Discarding deployments recorded for network {}", context.network);
        deployments.reset(&context.network);
        deployments.save(deployments_path)?;
    }
    let mut registry = deployments.registry(&context.network);

    let env = MigrationEnv {
        context: &context,
        deployer,
        artifacts: &artifacts,
    };

    let ran = MigrationRunner::default()
        .run(&env, &mut registry, args.to, |registry| {
            persist_registry(deployments_path, &context.network, registry)
        })
        .await?;

    info!(
        "Ran {} migrations on network {}, deployments saved to {}",
        ran,
        context.network,
        deployments_path.display()
    );

    Ok(())
}

/// Print what has been deployed on the deployer's network
pub async fn status(
    deployer: &dyn ContractDeployer,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let context = deployer.execution_context().await?;
    let registry = DeploymentsFile::load(deployments_path)?.registry(&context.network);

    println!("{}", status_report(&context.network, &registry));
    Ok(())
}

/// Render the contents of a network's registry, one line per fact
fn status_report(network: &str, registry: &DeploymentRegistry) -> String {
    let mut lines = vec![
        format!("Network: {}", network),
        format!("State: {}", registry.state()),
        format!(
            "Last completed migration: {}",
            registry.last_completed_migration()
        ),
    ];

    for (name, deployment) in registry.contracts() {
        lines.push(format!("{}: {:#x}", name, deployment.address));
        if let (Some(implementation), Some(admin)) =
            (deployment.implementation, deployment.proxy_admin)
        {
            lines.push(format!("    implementation: {:#x}", implementation));
            lines.push(format!("    proxy admin: {:#x}", admin));
        }
    }

    lines.join("\n")
}
