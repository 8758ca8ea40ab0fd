mod host;
mod input;
mod metrics;
mod sim;

pub use host::{
    run_host, run_host_with_metrics, DriverControl, HostConfig, HostError, HostSummary,
    InputCollector, Pacing, SessionDriver,
};
pub use input::{InputAction, KeyCode};
pub use metrics::{HostMetrics, MetricsHandle};
pub use sim::{InputSnapshot, Simulation};
