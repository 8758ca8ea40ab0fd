/// Authoritative drill state. One instance per session, stepped only by
/// the host loop; clicks and quiz calls mutate it synchronously between
/// ticks on the same thread.
pub(crate) struct DrillSim {
    clock_seconds: f64,
    phase: DrillPhase,
    score: u32,
    message: Option<FeedbackMessage>,
    quiz: QuizForm,
    player: PlayerRig,
    fire: FireGlow,
    smoke: SmokeField,
    outbox: UiEventOutbox,
}

impl DrillSim {
    pub(crate) fn new(rng: &mut impl Rng) -> Self {
        Self {
            clock_seconds: 0.0,
            phase: DrillPhase::Exploring,
            score: 0,
            message: None,
            quiz: QuizForm::fresh(),
            player: PlayerRig::at_spawn(),
            fire: fire_glow_at(0.0),
            smoke: SmokeField::seeded(rng),
            outbox: UiEventOutbox::default(),
        }
    }

    fn quiz_is_open(&self) -> bool {
        matches!(self.phase, DrillPhase::Quiz { .. })
    }

    pub(crate) fn drain_events(&mut self) -> Vec<UiEvent> {
        self.outbox.drain()
    }

    pub(crate) fn player_position(&self) -> Vec3 {
        self.player.position
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    fn log_scene_state(&self) {
        let particles = self.smoke.particles();
        let smoke_mean_height =
            particles.iter().map(|p| p.position.y).sum::<f32>() / particles.len() as f32;
        let smoke_mean_opacity =
            particles.iter().map(|p| p.opacity).sum::<f32>() / particles.len() as f32;
        debug!(
            sim_time_seconds = self.clock_seconds,
            position = ?self.player.position,
            look = ?self.player.look_direction(),
            fire_scale = self.fire.scale,
            fire_emissive = self.fire.emissive,
            smoke_mean_height,
            smoke_mean_opacity,
            hud_message = self.message.map(|message| message.text).unwrap_or(""),
            hud_kind = self.message.map(|message| message.kind.as_token()).unwrap_or("none"),
            "scene_state"
        );
    }
}

impl Simulation for DrillSim {
    fn boot(&mut self) {
        info!(
            spawn = ?self.player.position,
            floor_width = FLOOR_WIDTH_UNITS,
            floor_depth = FLOOR_DEPTH_UNITS,
            smoke_particles = SMOKE_PARTICLE_COUNT,
            "drill_ready"
        );
        for door in [ObjectId::ExitDoor, ObjectId::WestDoor, ObjectId::EastDoor] {
            debug!(
                door = door.as_token(),
                position = ?object_position(door),
                leads_outside = door.leads_outside().unwrap_or(false),
                "door_catalog"
            );
        }
    }

    fn tick(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        let previous_clock = self.clock_seconds;
        self.clock_seconds += f64::from(fixed_dt_seconds);

        self.fire = fire_glow_at(self.clock_seconds as f32);
        self.smoke.advance();
        advance_player(&mut self.player, input, fixed_dt_seconds);
        self.expire_message_if_due();
        self.open_quiz_if_due();

        // Render-facing state trace, once per whole sim second.
        if self.clock_seconds as u64 > previous_clock as u64 {
            self.log_scene_state();
        }
    }

    fn shutdown(&mut self) {
        let counts = self.outbox.session_counts();
        info!(
            score = self.score,
            sim_time_seconds = self.clock_seconds,
            position = ?self.player.position,
            ui_events = counts.total,
            messages_shown = counts.messages_shown,
            messages_cleared = counts.messages_cleared,
            score_changes = counts.score_changes,
            drills_resolved = counts.drills_resolved,
            quizzes_opened = counts.quizzes_opened,
            quizzes_scored = counts.quizzes_scored,
            quizzes_closed = counts.quizzes_closed,
            "drill_summary"
        );
    }
}
