use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use super::input::{ActionStates, InputAction, KeyCode};
use super::metrics::MetricsAccumulator;
use super::{InputSnapshot, MetricsHandle, Simulation};

/// How the host advances wall time between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep each frame toward the tick cadence; sim time tracks wall time.
    RealTime,
    /// Feed one fixed frame of synthetic time per loop pass and never
    /// sleep. Runs are identical regardless of host speed.
    Uncapped,
}

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub pacing: Pacing,
    /// Stop after this many ticks. `None` runs until the driver or an input
    /// quit stops the loop.
    pub run_limit: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            pacing: Pacing::RealTime,
            run_limit: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("target_tps must be non-zero")]
    ZeroTargetTps,
    #[error("max_ticks_per_frame must be non-zero")]
    ZeroMaxTicksPerFrame,
}

/// Whether the loop should keep running after a driver pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverControl {
    Continue,
    Stop,
}

/// Feeds input into the host once per frame, before time advances.
///
/// This is the only hook that may touch the sim between ticks, which keeps
/// every mutation on the loop thread.
pub trait SessionDriver<S: Simulation> {
    fn pump(
        &mut self,
        sim: &mut S,
        input: &mut InputCollector,
        sim_time_seconds: f64,
    ) -> DriverControl;
}

/// Totals for a completed host run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostSummary {
    pub frames: u64,
    pub ticks: u64,
    pub sim_time_seconds: f64,
}

pub fn run_host<S, D>(config: HostConfig, sim: &mut S, driver: &mut D) -> Result<HostSummary, HostError>
where
    S: Simulation,
    D: SessionDriver<S>,
{
    let metrics_handle = MetricsHandle::default();
    run_host_with_metrics(config, sim, driver, metrics_handle)
}

pub fn run_host_with_metrics<S, D>(
    config: HostConfig,
    sim: &mut S,
    driver: &mut D,
    metrics_handle: MetricsHandle,
) -> Result<HostSummary, HostError>
where
    S: Simulation,
    D: SessionDriver<S>,
{
    if config.target_tps == 0 {
        return Err(HostError::ZeroTargetTps);
    }
    if config.max_ticks_per_frame == 0 {
        return Err(HostError::ZeroMaxTicksPerFrame);
    }

    let max_frame_delta =
        normalize_non_zero_duration("max_frame_delta", config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration("metrics_log_interval", config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / config.target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();

    info!(
        target_tps = config.target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame = config.max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        pacing = ?config.pacing,
        "host_config"
    );

    let mut input_collector = InputCollector::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut summary = HostSummary::default();

    sim.boot();

    loop {
        let control = driver.pump(sim, &mut input_collector, summary.sim_time_seconds);
        if control == DriverControl::Stop {
            info!(reason = "driver_stop", "shutdown_requested");
            break;
        }
        if input_collector.quit_requested {
            info!(reason = "quit_action", "shutdown_requested");
            break;
        }

        let now = Instant::now();
        let frame_dt = match config.pacing {
            Pacing::RealTime => {
                let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                clamp_frame_delta(raw_frame_dt, max_frame_delta)
            }
            Pacing::Uncapped => fixed_dt,
        };
        last_frame_instant = now;
        accumulator = accumulator.saturating_add(frame_dt);

        let step_plan = plan_sim_steps(accumulator, fixed_dt, config.max_ticks_per_frame);
        for _ in 0..step_plan.ticks_to_run {
            if run_limit_reached(config.run_limit, summary.ticks) {
                break;
            }
            let input_snapshot = input_collector.snapshot_for_tick();
            let tick_started = Instant::now();
            sim.tick(fixed_dt_seconds, &input_snapshot);
            metrics_accumulator.record_tick(tick_started.elapsed());
            summary.ticks = summary.ticks.saturating_add(1);
            summary.sim_time_seconds += f64::from(fixed_dt_seconds);
        }
        accumulator = step_plan.remaining_accumulator;

        if step_plan.dropped_backlog > Duration::ZERO {
            warn!(
                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                max_ticks_per_frame = config.max_ticks_per_frame,
                "sim_clamp_triggered"
            );
        }

        metrics_accumulator.record_frame();
        summary.frames = summary.frames.saturating_add(1);

        if run_limit_reached(config.run_limit, summary.ticks) {
            info!(reason = "run_limit", ticks = summary.ticks, "shutdown_requested");
            break;
        }

        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
            metrics_handle.publish(snapshot);
            info!(
                fps = snapshot.fps,
                tps = snapshot.tps,
                avg_tick_ms = snapshot.avg_tick_ms,
                "loop_metrics"
            );
        }

        if config.pacing == Pacing::RealTime {
            let frame_elapsed = Instant::now().saturating_duration_since(last_frame_instant);
            let pace_sleep = compute_pace_sleep(frame_elapsed, fixed_dt);
            if pace_sleep > Duration::ZERO {
                thread::sleep(pace_sleep);
            }
        }
    }

    sim.shutdown();
    info!(
        frames = summary.frames,
        ticks = summary.ticks,
        sim_time_seconds = summary.sim_time_seconds,
        "shutdown"
    );
    Ok(summary)
}

/// Collects embedder input between frames and condenses it into per-tick
/// snapshots. Held keys persist; look deltas drain into the snapshot that
/// consumes them.
#[derive(Debug, Default)]
pub struct InputCollector {
    quit_requested: bool,
    action_states: ActionStates,
    pending_look_dx: f32,
    pending_look_dy: f32,
}

impl InputCollector {
    pub fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.update_action_state_from_key(key, true);
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.update_action_state_from_key(key, false);
    }

    pub fn add_look_delta(&mut self, delta_x: f32, delta_y: f32) {
        self.pending_look_dx += delta_x;
        self.pending_look_dy += delta_y;
    }

    fn update_action_state_from_key(&mut self, key: KeyCode, is_pressed: bool) {
        match key {
            KeyCode::KeyW => self.action_states.set(InputAction::MoveForward, is_pressed),
            KeyCode::KeyS => self.action_states.set(InputAction::MoveBackward, is_pressed),
            KeyCode::KeyA => self.action_states.set(InputAction::StrafeLeft, is_pressed),
            KeyCode::KeyD => self.action_states.set(InputAction::StrafeRight, is_pressed),
            KeyCode::Escape => {
                self.action_states.set(InputAction::Quit, is_pressed);
                if is_pressed {
                    self.mark_quit_requested();
                }
            }
        }
    }

    pub(crate) fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.quit_requested,
            self.action_states,
            self.pending_look_dx,
            self.pending_look_dy,
        );
        self.pending_look_dx = 0.0;
        self.pending_look_dy = 0.0;
        snapshot
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        let dropped_backlog = accumulator;
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn run_limit_reached(run_limit: Option<u64>, ticks: u64) -> bool {
    run_limit.map_or(false, |limit| ticks >= limit)
}

fn normalize_non_zero_duration(name: &'static str, value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        warn!(
            duration = name,
            fallback_ms = fallback.as_millis() as u64,
            "zero duration in host config; using fallback"
        );
        fallback
    } else {
        value
    }
}

fn compute_pace_sleep(elapsed: Duration, frame_target: Duration) -> Duration {
    if elapsed < frame_target {
        frame_target - elapsed
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSim {
        boots: u32,
        ticks: u32,
        shutdowns: u32,
        forward_ticks: u32,
        look_total_x: f32,
        last_dt_seconds: f32,
    }

    impl Simulation for CountingSim {
        fn boot(&mut self) {
            self.boots += 1;
        }

        fn tick(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
            self.ticks += 1;
            self.last_dt_seconds = fixed_dt_seconds;
            if input.is_down(InputAction::MoveForward) {
                self.forward_ticks += 1;
            }
            self.look_total_x += input.look_delta().0;
        }

        fn shutdown(&mut self) {
            self.shutdowns += 1;
        }
    }

    /// Presses keys on chosen pumps and stops after a fixed pump count.
    struct PumpScript {
        pumps: u32,
        stop_after_pumps: u32,
        forward_down_on_pump: Option<u32>,
        escape_on_pump: Option<u32>,
        look_on_pump: Option<u32>,
    }

    impl PumpScript {
        fn stopping_after(stop_after_pumps: u32) -> Self {
            Self {
                pumps: 0,
                stop_after_pumps,
                forward_down_on_pump: None,
                escape_on_pump: None,
                look_on_pump: None,
            }
        }
    }

    impl SessionDriver<CountingSim> for PumpScript {
        fn pump(
            &mut self,
            _sim: &mut CountingSim,
            input: &mut InputCollector,
            _sim_time_seconds: f64,
        ) -> DriverControl {
            self.pumps += 1;
            if self.forward_down_on_pump == Some(self.pumps) {
                input.key_down(KeyCode::KeyW);
            }
            if self.escape_on_pump == Some(self.pumps) {
                input.key_down(KeyCode::Escape);
            }
            if self.look_on_pump == Some(self.pumps) {
                input.add_look_delta(4.0, -1.0);
            }
            if self.pumps > self.stop_after_pumps {
                DriverControl::Stop
            } else {
                DriverControl::Continue
            }
        }
    }

    fn uncapped_config() -> HostConfig {
        HostConfig {
            pacing: Pacing::Uncapped,
            ..HostConfig::default()
        }
    }

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        let raw_frame_dt = Duration::from_millis(600);

        assert_eq!(
            clamp_frame_delta(raw_frame_dt, max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_keeps_partial_step_in_accumulator() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(40), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 2);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(8));
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn normalize_non_zero_duration_keeps_positive_value() {
        let value = Duration::from_millis(100);
        assert_eq!(
            normalize_non_zero_duration("test", value, Duration::from_secs(1)),
            value
        );
    }

    #[test]
    fn normalize_non_zero_duration_falls_back_on_zero() {
        assert_eq!(
            normalize_non_zero_duration("test", Duration::ZERO, Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn compute_pace_sleep_zero_when_over_budget() {
        let frame_target = Duration::from_secs_f64(1.0 / 60.0);
        assert_eq!(
            compute_pace_sleep(Duration::from_millis(20), frame_target),
            Duration::ZERO
        );
    }

    #[test]
    fn compute_pace_sleep_positive_when_under_budget() {
        let frame_target = Duration::from_secs_f64(1.0 / 60.0);
        assert!(compute_pace_sleep(Duration::from_millis(5), frame_target) > Duration::ZERO);
    }

    #[test]
    fn held_key_persists_across_snapshots_until_release() {
        let mut input = InputCollector::default();
        input.key_down(KeyCode::KeyW);

        assert!(input.snapshot_for_tick().is_down(InputAction::MoveForward));
        assert!(input.snapshot_for_tick().is_down(InputAction::MoveForward));

        input.key_up(KeyCode::KeyW);
        assert!(!input.snapshot_for_tick().is_down(InputAction::MoveForward));
    }

    #[test]
    fn repeated_key_down_is_idempotent() {
        let mut input = InputCollector::default();
        input.key_down(KeyCode::KeyA);
        input.key_down(KeyCode::KeyA);
        input.key_down(KeyCode::KeyA);

        assert!(input.snapshot_for_tick().is_down(InputAction::StrafeLeft));
        input.key_up(KeyCode::KeyA);
        assert!(!input.snapshot_for_tick().is_down(InputAction::StrafeLeft));
    }

    #[test]
    fn wasd_keys_map_to_movement_actions() {
        let mut input = InputCollector::default();
        input.key_down(KeyCode::KeyS);
        input.key_down(KeyCode::KeyD);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::MoveBackward));
        assert!(snapshot.is_down(InputAction::StrafeRight));
        assert!(!snapshot.is_down(InputAction::MoveForward));
    }

    #[test]
    fn look_delta_accumulates_and_drains_once() {
        let mut input = InputCollector::default();
        input.add_look_delta(3.0, 1.0);
        input.add_look_delta(-1.0, 2.0);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();

        assert_eq!(first.look_delta(), (2.0, 3.0));
        assert_eq!(second.look_delta(), (0.0, 0.0));
    }

    #[test]
    fn escape_sets_quit_action_and_request() {
        let mut input = InputCollector::default();
        input.key_down(KeyCode::Escape);

        assert!(input.quit_requested);
        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.quit_requested());
        assert!(snapshot.is_down(InputAction::Quit));
    }

    #[test]
    fn run_host_rejects_zero_target_tps() {
        let config = HostConfig {
            target_tps: 0,
            ..uncapped_config()
        };
        let mut sim = CountingSim::default();
        let mut driver = PumpScript::stopping_after(1);

        let result = run_host(config, &mut sim, &mut driver);
        assert!(matches!(result, Err(HostError::ZeroTargetTps)));
        assert_eq!(sim.boots, 0);
    }

    #[test]
    fn run_host_rejects_zero_tick_cap() {
        let config = HostConfig {
            max_ticks_per_frame: 0,
            ..uncapped_config()
        };
        let mut sim = CountingSim::default();
        let mut driver = PumpScript::stopping_after(1);

        let result = run_host(config, &mut sim, &mut driver);
        assert!(matches!(result, Err(HostError::ZeroMaxTicksPerFrame)));
        assert_eq!(sim.boots, 0);
    }

    #[test]
    fn uncapped_run_ticks_once_per_frame_and_reports_totals() {
        let mut sim = CountingSim::default();
        let mut driver = PumpScript::stopping_after(5);

        let summary = run_host(uncapped_config(), &mut sim, &mut driver).expect("summary");

        assert_eq!(summary.frames, 5);
        assert_eq!(summary.ticks, 5);
        assert_eq!(sim.boots, 1);
        assert_eq!(sim.ticks, 5);
        assert_eq!(sim.shutdowns, 1);

        let fixed_dt_seconds = Duration::from_secs_f64(1.0 / 60.0).as_secs_f32();
        let expected = 5.0 * f64::from(fixed_dt_seconds);
        assert!((summary.sim_time_seconds - expected).abs() < 1e-9);
    }

    #[test]
    fn driver_key_press_reaches_every_following_tick() {
        let mut sim = CountingSim::default();
        let mut driver = PumpScript {
            forward_down_on_pump: Some(2),
            ..PumpScript::stopping_after(4)
        };

        run_host(uncapped_config(), &mut sim, &mut driver).expect("summary");

        assert_eq!(sim.ticks, 4);
        assert_eq!(sim.forward_ticks, 3);
    }

    #[test]
    fn look_delta_reaches_exactly_one_tick() {
        let mut sim = CountingSim::default();
        let mut driver = PumpScript {
            look_on_pump: Some(1),
            ..PumpScript::stopping_after(3)
        };

        run_host(uncapped_config(), &mut sim, &mut driver).expect("summary");

        assert_eq!(sim.ticks, 3);
        assert!((sim.look_total_x - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn escape_stops_loop_before_next_tick() {
        let mut sim = CountingSim::default();
        let mut driver = PumpScript {
            escape_on_pump: Some(3),
            ..PumpScript::stopping_after(10)
        };

        let summary = run_host(uncapped_config(), &mut sim, &mut driver).expect("summary");

        assert_eq!(summary.frames, 2);
        assert_eq!(sim.ticks, 2);
        assert_eq!(sim.shutdowns, 1);
    }

    #[test]
    fn run_limit_stops_loop_at_exact_tick_count() {
        let config = HostConfig {
            run_limit: Some(7),
            ..uncapped_config()
        };
        let mut sim = CountingSim::default();
        let mut driver = PumpScript::stopping_after(100);

        let summary = run_host(config, &mut sim, &mut driver).expect("summary");

        assert_eq!(summary.ticks, 7);
        assert_eq!(sim.ticks, 7);
        assert_eq!(sim.shutdowns, 1);
    }

    #[test]
    fn zero_run_limit_stops_before_first_tick() {
        let config = HostConfig {
            run_limit: Some(0),
            ..uncapped_config()
        };
        let mut sim = CountingSim::default();
        let mut driver = PumpScript::stopping_after(100);

        let summary = run_host(config, &mut sim, &mut driver).expect("summary");

        assert_eq!(summary.ticks, 0);
        assert_eq!(sim.boots, 1);
        assert_eq!(sim.shutdowns, 1);
    }

    #[test]
    fn tick_dt_matches_configured_rate() {
        let config = HostConfig {
            target_tps: 50,
            ..uncapped_config()
        };
        let mut sim = CountingSim::default();
        let mut driver = PumpScript::stopping_after(2);

        run_host(config, &mut sim, &mut driver).expect("summary");

        assert!((sim.last_dt_seconds - 0.02).abs() < 0.000_001);
    }
}
