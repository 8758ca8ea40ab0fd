use engine::{DriverControl, InputCollector, KeyCode, SessionDriver};
use tracing::{debug, info};

use super::gameplay::{
    correct_answer_text, object_position, question_prompt, DrillSim, ObjectId, UiEvent,
};

/// One scripted stimulus, applied once sim time reaches `at_seconds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ScriptStep {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Look { delta_x: f32, delta_y: f32 },
    Click(ObjectId),
    SelectAnswer { question_index: usize, option_index: usize },
    SubmitQuiz,
    CloseQuiz,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimedStep {
    pub(crate) at_seconds: f64,
    pub(crate) step: ScriptStep,
}

/// Replays a fixed timeline of player actions against the sim and mirrors
/// drained UI events to the log. Stops the host once every step has fired
/// and `stop_at_seconds` has passed.
pub(crate) struct ScriptedSession {
    steps: Vec<TimedStep>,
    cursor: usize,
    stop_at_seconds: f64,
}

impl ScriptedSession {
    pub(crate) fn new(mut steps: Vec<TimedStep>, stop_at_seconds: f64) -> Self {
        steps.sort_by(|a, b| a.at_seconds.total_cmp(&b.at_seconds));
        Self {
            steps,
            cursor: 0,
            stop_at_seconds,
        }
    }
}

impl SessionDriver<DrillSim> for ScriptedSession {
    fn pump(
        &mut self,
        sim: &mut DrillSim,
        input: &mut InputCollector,
        sim_time_seconds: f64,
    ) -> DriverControl {
        while let Some(timed) = self.steps.get(self.cursor) {
            if timed.at_seconds > sim_time_seconds {
                break;
            }
            apply_step(sim, input, timed.step);
            self.cursor += 1;
        }

        for event in sim.drain_events() {
            log_ui_event(event);
        }

        if self.cursor >= self.steps.len() && sim_time_seconds >= self.stop_at_seconds {
            let report = sim.quiz_report();
            info!(
                position = ?sim.player_position(),
                score = sim.score(),
                quiz_submitted = report.is_some(),
                quiz_correct = report.map(|report| report.correct).unwrap_or(0),
                quiz_total = report.map(|report| report.total).unwrap_or(0),
                "walkthrough_complete"
            );
            return DriverControl::Stop;
        }
        DriverControl::Continue
    }
}

fn apply_step(sim: &mut DrillSim, input: &mut InputCollector, step: ScriptStep) {
    match step {
        ScriptStep::KeyDown(key) => input.key_down(key),
        ScriptStep::KeyUp(key) => input.key_up(key),
        ScriptStep::Look { delta_x, delta_y } => input.add_look_delta(delta_x, delta_y),
        ScriptStep::Click(object) => {
            debug!(
                object = ?object,
                target = ?object_position(object),
                player = ?sim.player_position(),
                "script_click"
            );
            sim.click(object);
        }
        ScriptStep::SelectAnswer {
            question_index,
            option_index,
        } => sim.select_quiz_answer(question_index, option_index),
        ScriptStep::SubmitQuiz => sim.submit_quiz(),
        ScriptStep::CloseQuiz => sim.close_quiz(),
    }
}

fn log_ui_event(event: UiEvent) {
    match event {
        UiEvent::MessageShown { text, kind } => {
            info!(kind = kind.as_token(), text, "ui_message");
        }
        UiEvent::MessageCleared => info!("ui_message_cleared"),
        UiEvent::ScoreChanged { score } => info!(score, "ui_score"),
        UiEvent::DrillResolved { outcome } => {
            info!(outcome = outcome.as_token(), "ui_drill_resolved");
        }
        UiEvent::QuizOpened => {
            info!("ui_quiz_opened");
            let mut question_index = 0;
            while let Some(prompt) = question_prompt(question_index) {
                info!(question_index, prompt, "ui_quiz_question");
                question_index += 1;
            }
        }
        UiEvent::QuizScored { correct, total } => {
            info!(correct, total, "ui_quiz_scored");
            let mut question_index = 0;
            while let Some(answer) = correct_answer_text(question_index) {
                info!(question_index, answer, "ui_quiz_answer_key");
                question_index += 1;
            }
        }
        UiEvent::QuizClosed => info!("ui_quiz_closed"),
    }
}

/// The stock walkthrough: walk to the fire corner, credit the extinguisher,
/// read the safety poster, try the window, then take the exit door and sit
/// the quiz with one deliberate wrong answer.
pub(crate) fn demo_script() -> (Vec<TimedStep>, f64) {
    let steps = vec![
        TimedStep {
            at_seconds: 0.5,
            step: ScriptStep::Look {
                delta_x: 335.0,
                delta_y: 0.0,
            },
        },
        TimedStep {
            at_seconds: 1.0,
            step: ScriptStep::KeyDown(KeyCode::KeyW),
        },
        TimedStep {
            at_seconds: 4.0,
            step: ScriptStep::KeyUp(KeyCode::KeyW),
        },
        TimedStep {
            at_seconds: 4.2,
            step: ScriptStep::Click(ObjectId::Extinguisher),
        },
        TimedStep {
            at_seconds: 5.0,
            step: ScriptStep::Click(ObjectId::Desk),
        },
        TimedStep {
            at_seconds: 6.0,
            step: ScriptStep::Click(ObjectId::Window),
        },
        TimedStep {
            at_seconds: 6.5,
            step: ScriptStep::Look {
                delta_x: -1490.0,
                delta_y: 0.0,
            },
        },
        TimedStep {
            at_seconds: 7.0,
            step: ScriptStep::KeyDown(KeyCode::KeyW),
        },
        TimedStep {
            at_seconds: 9.4,
            step: ScriptStep::KeyUp(KeyCode::KeyW),
        },
        TimedStep {
            at_seconds: 9.6,
            step: ScriptStep::Click(ObjectId::ExitDoor),
        },
        TimedStep {
            at_seconds: 11.0,
            step: ScriptStep::SelectAnswer {
                question_index: 0,
                option_index: 1,
            },
        },
        TimedStep {
            at_seconds: 11.3,
            step: ScriptStep::SelectAnswer {
                question_index: 1,
                option_index: 2,
            },
        },
        TimedStep {
            at_seconds: 11.6,
            step: ScriptStep::SelectAnswer {
                question_index: 2,
                option_index: 0,
            },
        },
        TimedStep {
            at_seconds: 12.0,
            step: ScriptStep::SubmitQuiz,
        },
        TimedStep {
            at_seconds: 12.5,
            step: ScriptStep::CloseQuiz,
        },
    ];
    (steps, 13.0)
}

#[cfg(test)]
mod tests {
    use engine::{run_host, DriverControl, HostConfig, InputCollector, Pacing, SessionDriver};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::super::gameplay::{DrillSim, ObjectId, QuizReport};
    use super::{demo_script, ScriptStep, ScriptedSession, TimedStep};

    fn test_sim() -> DrillSim {
        let mut rng = StdRng::seed_from_u64(5);
        DrillSim::new(&mut rng)
    }

    fn click_at(at_seconds: f64, object: ObjectId) -> TimedStep {
        TimedStep {
            at_seconds,
            step: ScriptStep::Click(object),
        }
    }

    #[test]
    fn pump_applies_only_steps_due_at_current_sim_time() {
        let mut sim = test_sim();
        let mut input = InputCollector::default();
        let mut script = ScriptedSession::new(
            vec![
                click_at(0.0, ObjectId::Extinguisher),
                click_at(1.0, ObjectId::Extinguisher),
            ],
            2.0,
        );

        script.pump(&mut sim, &mut input, 0.5);
        assert_eq!(sim.score(), 1);

        script.pump(&mut sim, &mut input, 1.0);
        assert_eq!(sim.score(), 2);
    }

    #[test]
    fn steps_fire_in_timeline_order_even_when_given_unsorted() {
        let mut sim = test_sim();
        let mut input = InputCollector::default();
        let mut script = ScriptedSession::new(
            vec![
                click_at(1.0, ObjectId::Extinguisher),
                click_at(0.0, ObjectId::Extinguisher),
            ],
            2.0,
        );

        script.pump(&mut sim, &mut input, 0.0);
        assert_eq!(sim.score(), 1);
    }

    #[test]
    fn pump_stops_only_after_timeline_and_tail_elapse() {
        let mut sim = test_sim();
        let mut input = InputCollector::default();
        let mut script = ScriptedSession::new(vec![click_at(0.0, ObjectId::Desk)], 1.0);

        assert_eq!(
            script.pump(&mut sim, &mut input, 0.0),
            DriverControl::Continue
        );
        assert_eq!(
            script.pump(&mut sim, &mut input, 0.9),
            DriverControl::Continue
        );
        assert_eq!(script.pump(&mut sim, &mut input, 1.0), DriverControl::Stop);
    }

    #[test]
    fn scripted_walkthrough_reaches_quiz_and_final_score() {
        let mut sim = test_sim();
        let spawn = sim.player_position();
        let (steps, stop_at_seconds) = demo_script();
        let mut script = ScriptedSession::new(steps, stop_at_seconds);
        let config = HostConfig {
            pacing: Pacing::Uncapped,
            ..HostConfig::default()
        };

        let summary = run_host(config, &mut sim, &mut script).expect("host run");

        assert!(summary.sim_time_seconds >= 13.0);
        assert!(summary.ticks >= 780);
        assert_eq!(sim.score(), 2);
        assert_eq!(sim.quiz_report(), Some(QuizReport { correct: 2, total: 3 }));
        assert!(sim.player_position() != spawn);
    }
}
