#[derive(Debug, Clone, Copy, PartialEq)]
struct FireGlow {
    scale: f32,
    emissive: f32,
}

/// Flicker driven purely by elapsed sim time, so replays reproduce the
/// same flame.
fn fire_glow_at(elapsed_seconds: f32) -> FireGlow {
    let scale_phase = (elapsed_seconds * FIRE_SCALE_RATE_RADIANS_PER_SECOND).sin();
    let glow_phase = (elapsed_seconds * FIRE_GLOW_RATE_RADIANS_PER_SECOND).sin().abs();
    FireGlow {
        scale: 1.0 + scale_phase * FIRE_SCALE_AMPLITUDE,
        emissive: 1.0 + glow_phase * FIRE_GLOW_AMPLITUDE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SmokeParticle {
    position: Vec3,
    opacity: f32,
}

/// Fixed pool of smoke sprites above the fire. Particles rise a per-index
/// step each tick and recycle to a low respawn height at the ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SmokeField {
    particles: [SmokeParticle; SMOKE_PARTICLE_COUNT],
}

impl SmokeField {
    fn seeded(rng: &mut impl Rng) -> Self {
        let mut particles = [SmokeParticle {
            position: Vec3::ZERO,
            opacity: 0.0,
        }; SMOKE_PARTICLE_COUNT];

        for (index, particle) in particles.iter_mut().enumerate() {
            let column_x = FIRE_POSITION.x + (index % 3) as f32 * SMOKE_COLUMN_SPACING_UNITS;
            let column_z = FIRE_POSITION.z + (index % 2) as f32 * SMOKE_COLUMN_SPACING_UNITS;
            let height = SMOKE_SPAWN_HEIGHT_BASE_UNITS
                + rng.gen::<f32>() * SMOKE_SPAWN_HEIGHT_JITTER_UNITS;
            particle.position = Vec3::new(column_x, height, column_z);
            particle.opacity = smoke_opacity_at(height);
        }

        Self { particles }
    }

    fn advance(&mut self) {
        for (index, particle) in self.particles.iter_mut().enumerate() {
            particle.position.y += smoke_rise_step(index);
            if particle.position.y > SMOKE_RECYCLE_CEILING_UNITS {
                particle.position.y = SMOKE_RESPAWN_HEIGHT_UNITS;
            }
            particle.opacity = smoke_opacity_at(particle.position.y);
        }
    }

    fn particles(&self) -> &[SmokeParticle] {
        &self.particles
    }
}

fn smoke_rise_step(index: usize) -> f32 {
    SMOKE_RISE_BASE_UNITS_PER_TICK + index as f32 * SMOKE_RISE_PER_INDEX_UNITS_PER_TICK
}

fn smoke_opacity_at(height: f32) -> f32 {
    let faded = SMOKE_MAX_OPACITY - (height - SMOKE_FADE_START_HEIGHT_UNITS) * SMOKE_FADE_PER_UNIT;
    faded.clamp(0.0, SMOKE_MAX_OPACITY)
}
