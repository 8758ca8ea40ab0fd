/// First-person camera rig. Yaw turns the body, pitch only tilts the
/// view; ground movement ignores pitch entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlayerRig {
    position: Vec3,
    yaw_radians: f32,
    pitch_radians: f32,
}

impl PlayerRig {
    fn at_spawn() -> Self {
        Self {
            position: PLAYER_SPAWN_POSITION,
            yaw_radians: 0.0,
            pitch_radians: 0.0,
        }
    }

    fn look_direction(&self) -> Vec3 {
        look_direction(self.yaw_radians, self.pitch_radians)
    }
}

fn advance_player(rig: &mut PlayerRig, input: &InputSnapshot, fixed_dt_seconds: f32) {
    let (look_dx, look_dy) = input.look_delta();
    apply_look_delta(rig, look_dx, look_dy);

    let delta = movement_delta(
        input,
        rig.yaw_radians,
        fixed_dt_seconds,
        WALK_SPEED_UNITS_PER_SECOND,
    );
    rig.position += delta;
    rig.position.y = EYE_HEIGHT_UNITS;
}

fn apply_look_delta(rig: &mut PlayerRig, delta_x_counts: f32, delta_y_counts: f32) {
    rig.yaw_radians = wrap_angle(
        rig.yaw_radians - delta_x_counts * LOOK_SENSITIVITY_RADIANS_PER_COUNT,
    );
    rig.pitch_radians = (rig.pitch_radians - delta_y_counts * LOOK_SENSITIVITY_RADIANS_PER_COUNT)
        .clamp(-PITCH_CLAMP_RADIANS, PITCH_CLAMP_RADIANS);
}

/// Keyboard movement rotated into the world by yaw. Forward always tracks
/// the view heading; diagonals are normalized so they are not faster.
fn movement_delta(input: &InputSnapshot, yaw_radians: f32, fixed_dt_seconds: f32, speed: f32) -> Vec3 {
    let mut x = 0.0f32;
    let mut z = 0.0f32;

    if input.is_down(InputAction::StrafeRight) {
        x += 1.0;
    }
    if input.is_down(InputAction::StrafeLeft) {
        x -= 1.0;
    }
    if input.is_down(InputAction::MoveForward) {
        z -= 1.0;
    }
    if input.is_down(InputAction::MoveBackward) {
        z += 1.0;
    }

    let len_sq = x * x + z * z;
    if len_sq == 0.0 {
        return Vec3::ZERO;
    }
    let inv_len = len_sq.sqrt().recip();
    x *= inv_len;
    z *= inv_len;

    let (sin_yaw, cos_yaw) = yaw_radians.sin_cos();
    let world_x = x * cos_yaw + z * sin_yaw;
    let world_z = z * cos_yaw - x * sin_yaw;

    Vec3::new(
        world_x * speed * fixed_dt_seconds,
        0.0,
        world_z * speed * fixed_dt_seconds,
    )
}

/// Unit view vector for the given yaw and pitch. Yaw zero faces -Z.
fn look_direction(yaw_radians: f32, pitch_radians: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw_radians.sin_cos();
    let (sin_pitch, cos_pitch) = pitch_radians.sin_cos();
    Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

fn wrap_angle(radians: f32) -> f32 {
    let mut wrapped = radians;
    while wrapped > std::f32::consts::PI {
        wrapped -= std::f32::consts::TAU;
    }
    while wrapped < -std::f32::consts::PI {
        wrapped += std::f32::consts::TAU;
    }
    wrapped
}
