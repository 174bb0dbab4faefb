use super::Problem;
use serde::{Deserialize, Serialize};

/// One submitted answer. Appended to the session history and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub problem: Problem,
    pub submitted_answer: i64,
    pub submitted_at_epoch_ms: i64,
    pub response_time_ms: i64,
}

/// Verdict tag handed back to the UI after grading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Feedback::Correct => "correct",
            Feedback::Incorrect => "incorrect",
        }
    }
}

/// Outcome of [`crate::DrillSession::submit_answer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub attempt: AttemptResult,
    pub is_correct: bool,
    pub feedback: Feedback,
}
