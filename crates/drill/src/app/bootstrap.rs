use engine::{HostConfig, Pacing};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::DrillSim;
use super::script::{demo_script, ScriptedSession};

const PACING_ENV_VAR: &str = "DRILL_PACING";
const SMOKE_SEED_ENV_VAR: &str = "DRILL_SMOKE_SEED";

pub(crate) struct AppWiring {
    pub(crate) config: HostConfig,
    pub(crate) sim: DrillSim,
    pub(crate) script: ScriptedSession,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Fire Drill Startup ===");

    let mut rng = match parse_smoke_seed(std::env::var(SMOKE_SEED_ENV_VAR).ok().as_deref()) {
        Some(seed) => {
            info!(seed, "smoke_seed_from_env");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let sim = DrillSim::new(&mut rng);

    let (steps, stop_at_seconds) = demo_script();
    let script = ScriptedSession::new(steps, stop_at_seconds);

    let config = HostConfig {
        pacing: parse_pacing(std::env::var(PACING_ENV_VAR).ok().as_deref()),
        ..HostConfig::default()
    };

    AppWiring {
        config,
        sim,
        script,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn parse_pacing(raw: Option<&str>) -> Pacing {
    match raw {
        Some("uncapped") => Pacing::Uncapped,
        Some("realtime") | None => Pacing::RealTime,
        Some(value) => {
            warn!(value, "pacing_invalid_value_using_realtime");
            Pacing::RealTime
        }
    }
}

fn parse_smoke_seed(raw: Option<&str>) -> Option<u64> {
    let value = raw?;
    match value.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!(value, "smoke_seed_invalid_value_ignored");
            None
        }
    }
}
