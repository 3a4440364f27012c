/// Startup work that runs alongside the server
///
/// Seeding may race early requests; readiness only flips once it is done.

use crate::app::AppState;
use contactbook_shared::seed::{seed_sample_users, SeedOutcome};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Seeds the store and marks the service ready when seeding succeeds
///
/// A failed run is logged and leaves the service not ready, so an
/// orchestrator watching `/health/ready` sees the failure.
pub async fn run_seeding(state: AppState) -> Option<SeedOutcome> {
    match seed_sample_users(state.store.as_ref(), &state.config.seed).await {
        Ok(outcome) => {
            info!(?outcome, "Startup seeding finished");
            state.mark_ready();
            Some(outcome)
        }
        Err(e) => {
            error!(error = %e, "Startup seeding failed");
            None
        }
    }
}

/// Spawns [`run_seeding`] on the runtime
pub fn spawn_seeding(state: AppState) -> JoinHandle<Option<SeedOutcome>> {
    tokio::spawn(run_seeding(state))
}
