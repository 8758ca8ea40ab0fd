use std::process::ExitCode;

use engine::run_host;
use tracing::{error, info};

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let AppWiring {
        config,
        mut sim,
        mut script,
    } = app;

    match run_host(config, &mut sim, &mut script) {
        Ok(summary) => {
            info!(
                frames = summary.frames,
                ticks = summary.ticks,
                sim_time_seconds = summary.sim_time_seconds,
                final_score = sim.score(),
                "session_complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "startup_failed");
            ExitCode::FAILURE
        }
    }
}
