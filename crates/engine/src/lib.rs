pub mod app;

pub use app::{
    run_host, run_host_with_metrics, DriverControl, HostConfig, HostError, HostMetrics,
    HostSummary, InputAction, InputCollector, InputSnapshot, KeyCode, MetricsHandle, Pacing,
    SessionDriver, Simulation,
};
