#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Question {
    prompt: &'static str,
    options: [&'static str; QUIZ_OPTION_COUNT],
    correct_option: usize,
}

const QUESTION_BANK: [Question; QUIZ_QUESTION_COUNT] = [
    Question {
        prompt: "If a big fire breaks out, what's the first safe action?",
        options: [
            "Try to extinguish by yourself",
            "Evacuate to the nearest exit and call for help",
            "Break a window and jump out",
        ],
        correct_option: 1,
    },
    Question {
        prompt: "Which choice is wrong during smoke-filled room?",
        options: [
            "Stay low and crawl",
            "Cover your mouth and nose and exit",
            "Stand upright and run full speed",
        ],
        correct_option: 2,
    },
    Question {
        prompt: "Should you use a fire extinguisher if you are untrained?",
        options: [
            "Yes, always",
            "Only if small fire and you're trained, otherwise evacuate",
            "No, never use it",
        ],
        correct_option: 1,
    },
];

/// One filled-in quiz attempt. Selections overwrite freely until submit;
/// after submit the form is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QuizForm {
    answers: [Option<usize>; QUIZ_QUESTION_COUNT],
    submitted: bool,
}

impl QuizForm {
    fn fresh() -> Self {
        Self {
            answers: [None; QUIZ_QUESTION_COUNT],
            submitted: false,
        }
    }

    fn select(&mut self, question_index: usize, option_index: usize) -> bool {
        if self.submitted || question_index >= QUIZ_QUESTION_COUNT || option_index >= QUIZ_OPTION_COUNT
        {
            return false;
        }
        self.answers[question_index] = Some(option_index);
        true
    }

    fn submit(&mut self) -> Option<u32> {
        if self.submitted {
            return None;
        }
        self.submitted = true;
        Some(self.correct_count())
    }

    fn correct_count(&self) -> u32 {
        QUESTION_BANK
            .iter()
            .zip(self.answers.iter())
            .filter(|(question, answer)| **answer == Some(question.correct_option))
            .count() as u32
    }
}

/// Result surfaced once a quiz attempt is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuizReport {
    pub(crate) correct: u32,
    pub(crate) total: u32,
}

pub(crate) fn question_prompt(question_index: usize) -> Option<&'static str> {
    QUESTION_BANK
        .get(question_index)
        .map(|question| question.prompt)
}

pub(crate) fn correct_answer_text(question_index: usize) -> Option<&'static str> {
    QUESTION_BANK
        .get(question_index)
        .map(|question| question.options[question.correct_option])
}

impl DrillSim {
    pub(crate) fn select_quiz_answer(&mut self, question_index: usize, option_index: usize) {
        if !self.quiz_is_open() {
            debug!(question_index, option_index, "quiz selection ignored; quiz not open");
            return;
        }
        if self.quiz.select(question_index, option_index) {
            debug!(question_index, option_index, "quiz_answer_selected");
        } else {
            debug!(question_index, option_index, "quiz selection rejected");
        }
    }

    pub(crate) fn submit_quiz(&mut self) {
        if !self.quiz_is_open() {
            debug!("quiz submit ignored; quiz not open");
            return;
        }
        let Some(correct) = self.quiz.submit() else {
            debug!("quiz submit ignored; already submitted");
            return;
        };

        let total = QUIZ_QUESTION_COUNT as u32;
        self.score = correct;
        self.outbox.emit(UiEvent::QuizScored { correct, total });
        self.outbox.emit(UiEvent::ScoreChanged { score: self.score });
        info!(correct, total, "quiz_scored");
    }

    pub(crate) fn close_quiz(&mut self) {
        let DrillPhase::Quiz { outcome } = self.phase else {
            debug!("quiz close ignored; quiz not open");
            return;
        };
        self.phase = DrillPhase::Exploring;
        self.outbox.emit(UiEvent::QuizClosed);
        info!(
            outcome = outcome.as_token(),
            submitted = self.quiz.submitted,
            "quiz_closed"
        );
    }

    pub(crate) fn quiz_report(&self) -> Option<QuizReport> {
        if !self.quiz.submitted {
            return None;
        }
        Some(QuizReport {
            correct: self.quiz.correct_count(),
            total: QUIZ_QUESTION_COUNT as u32,
        })
    }
}
