#[derive(Debug, Clone, Copy, PartialEq)]
enum ClickEffect {
    Feedback {
        text: &'static str,
        kind: MessageKind,
        score_delta: u32,
    },
    Door {
        outcome: Outcome,
    },
}

fn classify_click(object: ObjectId) -> ClickEffect {
    match object {
        ObjectId::Extinguisher => ClickEffect::Feedback {
            text: EXTINGUISHER_MESSAGE,
            kind: MessageKind::Info,
            score_delta: 1,
        },
        ObjectId::Window => ClickEffect::Feedback {
            text: WINDOW_MESSAGE,
            kind: MessageKind::Fail,
            score_delta: 0,
        },
        ObjectId::Desk => ClickEffect::Feedback {
            text: DESK_MESSAGE,
            kind: MessageKind::Info,
            score_delta: 0,
        },
        ObjectId::ExitDoor | ObjectId::WestDoor | ObjectId::EastDoor => {
            let outcome = match object.leads_outside() {
                Some(true) => Outcome::Escaped,
                _ => Outcome::Trapped,
            };
            ClickEffect::Door { outcome }
        }
    }
}

fn outcome_feedback(outcome: Outcome) -> (&'static str, MessageKind) {
    match outcome {
        Outcome::Escaped => (ESCAPE_MESSAGE, MessageKind::Success),
        Outcome::Trapped => (TRAPPED_MESSAGE, MessageKind::Fail),
    }
}

impl DrillSim {
    /// Entry point for renderer picks. Clicks apply synchronously; only
    /// time-based follow-ups (message expiry, quiz opening) wait for ticks.
    pub(crate) fn click(&mut self, object: ObjectId) {
        if self.quiz_is_open() {
            debug!(object = object.as_token(), "click ignored while quiz is open");
            return;
        }

        match classify_click(object) {
            ClickEffect::Feedback {
                text,
                kind,
                score_delta,
            } => {
                self.show_message(text, kind);
                if score_delta > 0 {
                    self.score = self.score.saturating_add(score_delta);
                    self.outbox.emit(UiEvent::ScoreChanged { score: self.score });
                    info!(
                        object = object.as_token(),
                        score = self.score,
                        "score_changed"
                    );
                }
            }
            ClickEffect::Door { outcome } => {
                if !matches!(self.phase, DrillPhase::Exploring) {
                    debug!(object = object.as_token(), "door click ignored; drill already resolved");
                    return;
                }
                let (text, kind) = outcome_feedback(outcome);
                self.show_message(text, kind);
                self.phase = DrillPhase::Resolved {
                    outcome,
                    quiz_opens_at: self.clock_seconds + QUIZ_OPEN_DELAY_SECONDS,
                };
                self.outbox.emit(UiEvent::DrillResolved { outcome });
                info!(
                    object = object.as_token(),
                    outcome = outcome.as_token(),
                    won = outcome.won(),
                    "drill_resolved"
                );
            }
        }
    }

    fn show_message(&mut self, text: &'static str, kind: MessageKind) {
        self.message = Some(FeedbackMessage {
            text,
            kind,
            expires_at: self.clock_seconds + MESSAGE_TTL_SECONDS,
        });
        self.outbox.emit(UiEvent::MessageShown { text, kind });
        debug!(kind = kind.as_token(), text, "feedback_shown");
    }

    fn expire_message_if_due(&mut self) {
        let Some(message) = self.message else {
            return;
        };
        if self.clock_seconds >= message.expires_at {
            self.message = None;
            self.outbox.emit(UiEvent::MessageCleared);
            debug!("feedback_cleared");
        }
    }

    fn open_quiz_if_due(&mut self) {
        let DrillPhase::Resolved {
            outcome,
            quiz_opens_at,
        } = self.phase
        else {
            return;
        };
        if self.clock_seconds >= quiz_opens_at {
            self.phase = DrillPhase::Quiz { outcome };
            self.quiz = QuizForm::fresh();
            self.outbox.emit(UiEvent::QuizOpened);
            info!(outcome = outcome.as_token(), "quiz_opened");
        }
    }
}
