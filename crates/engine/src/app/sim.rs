use super::input::{ActionStates, InputAction};

/// Immutable view of collected input handed to exactly one sim tick.
/// Held keys persist across snapshots; accumulated deltas (mouse look)
/// are consumed by the snapshot that observes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    look_delta_x: f32,
    look_delta_y: f32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self {
            quit_requested: false,
            actions: ActionStates::default(),
            look_delta_x: 0.0,
            look_delta_y: 0.0,
        }
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        look_delta_x: f32,
        look_delta_y: f32,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            look_delta_x,
            look_delta_y,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// Mouse movement accumulated since the previous snapshot, in counts.
    pub fn look_delta(&self) -> (f32, f32) {
        (self.look_delta_x, self.look_delta_y)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_look_delta(mut self, delta_x: f32, delta_y: f32) -> Self {
        self.look_delta_x = delta_x;
        self.look_delta_y = delta_y;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}

/// A headless simulation stepped by the host at a fixed cadence.
///
/// The host owns the clock and the input pipeline; implementations own all
/// game state and must only mutate it inside these callbacks.
pub trait Simulation {
    /// Called once before the first tick.
    fn boot(&mut self);

    /// Advance game state by exactly `fixed_dt_seconds`. Ticks are uniform;
    /// frame-rate jitter never leaks in here.
    fn tick(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);

    /// Called once after the loop exits, before the host returns.
    fn shutdown(&mut self);
}
