/// Clickable scene objects, identified the way the renderer picks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ObjectId {
    Extinguisher,
    Window,
    Desk,
    ExitDoor,
    WestDoor,
    EastDoor,
}

impl ObjectId {
    /// `Some(true)` leads outside, `Some(false)` is a dead end, `None` is
    /// not a door.
    fn leads_outside(self) -> Option<bool> {
        match self {
            ObjectId::ExitDoor => Some(true),
            ObjectId::WestDoor | ObjectId::EastDoor => Some(false),
            ObjectId::Extinguisher | ObjectId::Window | ObjectId::Desk => None,
        }
    }

    fn as_token(self) -> &'static str {
        match self {
            ObjectId::Extinguisher => "extinguisher",
            ObjectId::Window => "window",
            ObjectId::Desk => "desk",
            ObjectId::ExitDoor => "exit_door",
            ObjectId::WestDoor => "west_door",
            ObjectId::EastDoor => "east_door",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKind {
    Info,
    Success,
    Fail,
}

impl MessageKind {
    pub(crate) fn as_token(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Escaped,
    Trapped,
}

impl Outcome {
    fn won(self) -> bool {
        matches!(self, Outcome::Escaped)
    }

    pub(crate) fn as_token(self) -> &'static str {
        match self {
            Outcome::Escaped => "escaped",
            Outcome::Trapped => "trapped",
        }
    }
}

/// Drill lifecycle. A door click resolves the drill; the quiz opens on a
/// short delay and closing it returns to free exploration.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DrillPhase {
    Exploring,
    Resolved { outcome: Outcome, quiz_opens_at: f64 },
    Quiz { outcome: Outcome },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FeedbackMessage {
    text: &'static str,
    kind: MessageKind,
    expires_at: f64,
}

/// Facts the embedding UI needs to mirror, drained once per frame by the
/// driver. The sim never calls out; it only queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiEvent {
    MessageShown {
        text: &'static str,
        kind: MessageKind,
    },
    MessageCleared,
    ScoreChanged {
        score: u32,
    },
    DrillResolved {
        outcome: Outcome,
    },
    QuizOpened,
    QuizScored {
        correct: u32,
        total: u32,
    },
    QuizClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiEventKind {
    MessageShown,
    MessageCleared,
    ScoreChanged,
    DrillResolved,
    QuizOpened,
    QuizScored,
    QuizClosed,
}

impl UiEvent {
    fn kind(self) -> UiEventKind {
        match self {
            Self::MessageShown { .. } => UiEventKind::MessageShown,
            Self::MessageCleared => UiEventKind::MessageCleared,
            Self::ScoreChanged { .. } => UiEventKind::ScoreChanged,
            Self::DrillResolved { .. } => UiEventKind::DrillResolved,
            Self::QuizOpened => UiEventKind::QuizOpened,
            Self::QuizScored { .. } => UiEventKind::QuizScored,
            Self::QuizClosed => UiEventKind::QuizClosed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct UiEventCounts {
    total: u32,
    messages_shown: u32,
    messages_cleared: u32,
    score_changes: u32,
    drills_resolved: u32,
    quizzes_opened: u32,
    quizzes_scored: u32,
    quizzes_closed: u32,
}

impl UiEventCounts {
    fn record(&mut self, kind: UiEventKind) {
        self.total = self.total.saturating_add(1);
        match kind {
            UiEventKind::MessageShown => {
                self.messages_shown = self.messages_shown.saturating_add(1)
            }
            UiEventKind::MessageCleared => {
                self.messages_cleared = self.messages_cleared.saturating_add(1)
            }
            UiEventKind::ScoreChanged => self.score_changes = self.score_changes.saturating_add(1),
            UiEventKind::DrillResolved => {
                self.drills_resolved = self.drills_resolved.saturating_add(1)
            }
            UiEventKind::QuizOpened => self.quizzes_opened = self.quizzes_opened.saturating_add(1),
            UiEventKind::QuizScored => self.quizzes_scored = self.quizzes_scored.saturating_add(1),
            UiEventKind::QuizClosed => self.quizzes_closed = self.quizzes_closed.saturating_add(1),
        }
    }
}

#[derive(Default)]
struct UiEventOutbox {
    pending: Vec<UiEvent>,
    session_counts: UiEventCounts,
}

impl UiEventOutbox {
    fn emit(&mut self, event: UiEvent) {
        self.session_counts.record(event.kind());
        self.pending.push(event);
    }

    fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.pending)
    }

    fn session_counts(&self) -> UiEventCounts {
        self.session_counts
    }
}
