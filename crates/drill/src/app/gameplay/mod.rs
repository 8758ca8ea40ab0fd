use engine::{InputAction, InputSnapshot, Simulation};
use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

const WALK_SPEED_UNITS_PER_SECOND: f32 = 3.0;
const EYE_HEIGHT_UNITS: f32 = 1.6;
const LOOK_SENSITIVITY_RADIANS_PER_COUNT: f32 = 0.002;
const PITCH_CLAMP_RADIANS: f32 = 1.55;
const PLAYER_SPAWN_POSITION: Vec3 = Vec3::new(0.0, EYE_HEIGHT_UNITS, 6.0);
const FIRE_SCALE_AMPLITUDE: f32 = 0.12;
const FIRE_SCALE_RATE_RADIANS_PER_SECOND: f32 = 6.0;
const FIRE_GLOW_AMPLITUDE: f32 = 0.6;
const FIRE_GLOW_RATE_RADIANS_PER_SECOND: f32 = 10.0;
const SMOKE_PARTICLE_COUNT: usize = 8;
const SMOKE_RISE_BASE_UNITS_PER_TICK: f32 = 0.002;
const SMOKE_RISE_PER_INDEX_UNITS_PER_TICK: f32 = 0.001;
const SMOKE_RECYCLE_CEILING_UNITS: f32 = 4.0;
const SMOKE_RESPAWN_HEIGHT_UNITS: f32 = 1.8;
const SMOKE_FADE_START_HEIGHT_UNITS: f32 = 2.0;
const SMOKE_FADE_PER_UNIT: f32 = 0.1;
const SMOKE_MAX_OPACITY: f32 = 0.5;
const SMOKE_SPAWN_HEIGHT_BASE_UNITS: f32 = 1.6;
const SMOKE_SPAWN_HEIGHT_JITTER_UNITS: f32 = 0.8;
const SMOKE_COLUMN_SPACING_UNITS: f32 = 0.12;
const FLOOR_WIDTH_UNITS: f32 = 12.0;
const FLOOR_DEPTH_UNITS: f32 = 8.0;
const FIRE_POSITION: Vec3 = Vec3::new(3.0, 0.6, -2.0);
const EXTINGUISHER_POSITION: Vec3 = Vec3::new(5.5, 0.6, -1.0);
const WINDOW_POSITION: Vec3 = Vec3::new(-5.9, 2.0, -1.5);
const EXIT_DOOR_POSITION: Vec3 = Vec3::new(0.0, 1.0, 4.05);
const WEST_DOOR_POSITION: Vec3 = Vec3::new(-6.05, 1.0, -1.5);
const EAST_DOOR_POSITION: Vec3 = Vec3::new(6.05, 1.0, -1.5);
const DESK_GRID_ROWS: usize = 3;
const DESK_GRID_COLUMNS: usize = 3;
const DESK_GRID_ORIGIN: Vec3 = Vec3::new(-2.0, 0.45, -2.0);
const DESK_COLUMN_SPACING_UNITS: f32 = 2.0;
const DESK_ROW_SPACING_UNITS: f32 = 1.8;
const MESSAGE_TTL_SECONDS: f64 = 3.5;
const QUIZ_OPEN_DELAY_SECONDS: f64 = 0.8;
const QUIZ_QUESTION_COUNT: usize = 3;
const QUIZ_OPTION_COUNT: usize = 3;
const EXTINGUISHER_MESSAGE: &str =
    "Correct: Fire extinguisher present. Use only if trained. Best to evacuate if fire is big.";
const WINDOW_MESSAGE: &str =
    "Wrong: Breaking windows can feed oxygen to fire and cause more danger. Use exits instead.";
const DESK_MESSAGE: &str =
    "Info: Desks are obstacles - don't crowd around them. Move to exits quickly.";
const ESCAPE_MESSAGE: &str = "You Escaped Safely! Good job.";
const TRAPPED_MESSAGE: &str = "Wrong Choice! Trapped by Fire. Learn and try again.";

include!("types.rs");
include!("effects.rs");
include!("locomotion.rs");
include!("interaction.rs");
include!("quiz.rs");
include!("scene.rs");
include!("session.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
