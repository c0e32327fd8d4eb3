//! The driver loop executing the migrations in order

use itertools::Itertools;
use tracing::{error, info};

use crate::{
    errors::ScriptError,
    migrations::{default_migrations, Migration, MigrationEnv},
    registry::DeploymentRegistry,
};

/// Runs an ordered list of migrations against a registry, skipping those
/// that already completed
pub struct MigrationRunner {
    /// The migrations, sorted by index
    migrations: Vec<Box<dyn Migration>>,
}

impl Default for MigrationRunner {
    fn default() -> Self {
        Self::new(default_migrations())
    }
}

impl MigrationRunner {
    /// Create a runner over the given migrations
    pub fn new(migrations: Vec<Box<dyn Migration>>) -> Self {
        let migrations = migrations
            .into_iter()
            .sorted_by_key(|m| m.index())
            .collect();
        Self { migrations }
    }

    /// The migrations that have yet to run, up to and including index `to`
    pub fn pending<'a>(
        &'a self,
        registry: &DeploymentRegistry,
        to: Option<u32>,
    ) -> impl Iterator<Item = &'a Box<dyn Migration>> {
        let last_completed = registry.last_completed_migration();
        self.migrations
            .iter()
            .filter(move |m| m.index() > last_completed)
            .filter(move |m| to.map_or(true, |to| m.index() <= to))
    }

    /// Run every pending migration in order.
    ///
    /// `persist` is called with the registry after each migration completes,
    /// and once more if a migration fails, so that whatever it deployed before
    /// failing is kept. The first failure stops the run.
    ///
    /// Returns the number of migrations that ran.
    pub async fn run<F>(
        &self,
        env: &MigrationEnv<'_>,
        registry: &mut DeploymentRegistry,
        to: Option<u32>,
        mut persist: F,
    ) -> Result<usize, ScriptError>
    where
        F: FnMut(&DeploymentRegistry) -> Result<(), ScriptError>,
    {
        let pending = self.pending(registry, to).collect_vec();
        if pending.is_empty() {
            info!("Network {} is up to date", env.context.network);
            return Ok(0);
        }

        for migration in pending.iter() {
            info!("Running migration {}_{}", migration.index(), migration.name());

            if let Err(e) = migration.run(env, registry).await {
                error!("Migration {}_{} failed: {}", migration.index(), migration.name(), e);
                if let Err(persist_err) = persist(registry) {
                    error!("Failed to save partial deployments: {}", persist_err);
                }
                return Err(e);
            }

            registry.complete_migration(migration.index());
            persist(registry)?;
            info!(
                "Migration {}_{} complete, network now at: {}",
                migration.index(),
                migration.name(),
                registry.state()
            );
        }

        Ok(pending.len())
    }
}
