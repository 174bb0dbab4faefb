//! Drill session: owns the selection, the current problem, the attempt history
//! and the review stats, and decides which problem to show next.
//!
//! Every mutation of the selection or the stats is checkpointed through the
//! injected [`StateStore`]. A failed checkpoint is logged and ignored; the
//! in-memory state stays authoritative.

use super::clock::{Clock, SystemClock};
use super::saved_state::SavedState;
use super::sm2::update_stats;
use super::{AttemptResult, Feedback, Operator, Problem, StatsMap, Submission};
use super::{evaluator, problem_set};
use crate::database::StateStore;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeSet;

/// Snapshot of the operand and operator selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub selected_operands: BTreeSet<i64>,
    pub selected_operator: Operator,
}

/// Progress counters over the current session and the eligible set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub attempted: usize,
    pub correct: usize,
    pub due: usize,
    pub unseen: usize,
    pub eligible: usize,
}

/// The aggregate session state. History lives only as long as the process.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub selected_operands: BTreeSet<i64>,
    pub selected_operator: Operator,
    pub current_problem: Problem,
    pub history: Vec<AttemptResult>,
    pub review_stats: StatsMap,
    pub session_start_epoch_ms: i64,
    pub feedback: Option<Feedback>,
}

impl SessionState {
    fn from_saved(saved: SavedState, now_epoch_ms: i64) -> Self {
        Self {
            current_problem: Problem::fallback(saved.selected_operator),
            selected_operands: saved.selected_operands,
            selected_operator: saved.selected_operator,
            history: Vec::new(),
            review_stats: saved.review_stats,
            session_start_epoch_ms: now_epoch_ms,
            feedback: None,
        }
    }

    fn to_saved(&self) -> SavedState {
        SavedState {
            selected_operands: self.selected_operands.clone(),
            selected_operator: self.selected_operator,
            review_stats: self.review_stats.clone(),
        }
    }
}

pub struct DrillSession {
    state: SessionState,
    eligible: Vec<Problem>,
    store: Box<dyn StateStore>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl DrillSession {
    /// Restores the session from `store`, falling back to defaults when nothing
    /// usable was saved.
    pub fn load(store: Box<dyn StateStore>) -> Self {
        Self::with_parts(store, Box::new(SystemClock), StdRng::from_entropy())
    }

    pub fn with_parts(store: Box<dyn StateStore>, clock: Box<dyn Clock>, rng: StdRng) -> Self {
        let saved = match store.load() {
            Ok(Some(saved)) => {
                info!(
                    "Restored selection {:?} {} with {} review entries",
                    saved.selected_operands,
                    saved.selected_operator,
                    saved.review_stats.len()
                );
                saved
            }
            Ok(None) => {
                info!("No saved state, starting fresh");
                SavedState::default()
            }
            Err(e) => {
                warn!("Could not load saved state, starting fresh: {}", e);
                SavedState::default()
            }
        };

        let state = SessionState::from_saved(saved, clock.now_epoch_ms());
        let eligible = problem_set::generate_eligible_problems(
            &state.selected_operands,
            state.selected_operator,
        );

        Self {
            state,
            eligible,
            store,
            clock,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_selection(&self) -> Selection {
        Selection {
            selected_operands: self.state.selected_operands.clone(),
            selected_operator: self.state.selected_operator,
        }
    }

    pub fn current_problem(&self) -> Problem {
        self.state.current_problem
    }

    pub fn eligible_problems(&self) -> &[Problem] {
        &self.eligible
    }

    pub fn history(&self) -> &[AttemptResult] {
        &self.state.history
    }

    pub fn review_stats(&self) -> &StatsMap {
        &self.state.review_stats
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.state.feedback
    }

    pub fn clear_feedback(&mut self) {
        self.state.feedback = None;
    }

    /// Adds or removes `operand` from the selection and returns the new selection.
    pub fn set_selected_operand(&mut self, operand: i64, included: bool) -> BTreeSet<i64> {
        let changed = if included {
            self.state.selected_operands.insert(operand)
        } else {
            self.state.selected_operands.remove(&operand)
        };
        if changed {
            debug!("Operand {} included={}", operand, included);
        }

        self.regenerate_eligible();
        self.checkpoint();
        self.state.selected_operands.clone()
    }

    /// Switches the operator. The current problem is kept until the next
    /// [`DrillSession::request_next_problem`].
    pub fn set_selected_operator(&mut self, operator: Operator) {
        debug!("Operator set to {}", operator);
        self.state.selected_operator = operator;
        self.regenerate_eligible();
        self.checkpoint();
    }

    /// Picks the next problem, makes it current and starts its response timer.
    ///
    /// Priority: the most overdue review, then a random unseen problem, then
    /// whichever review comes due soonest.
    pub fn request_next_problem(&mut self) -> Problem {
        let now = self.clock.now_epoch_ms();
        self.regenerate_eligible();

        let problem = self.choose_problem(now);
        self.state.current_problem = problem;
        self.state.session_start_epoch_ms = now;
        problem
    }

    fn choose_problem(&mut self, now: i64) -> Problem {
        if self.eligible.is_empty() {
            let fallback = Problem::fallback(self.state.selected_operator);
            debug!("Nothing eligible, showing fallback {}", fallback);
            return fallback;
        }

        let stats = &self.state.review_stats;
        let with_due: Vec<(Problem, Option<i64>)> = self
            .eligible
            .iter()
            .map(|p| (*p, stats.get(&p.key()).map(|s| s.next_review_epoch_ms)))
            .collect();

        // Overdue reviews first, oldest due date wins. `min_by_key` keeps the first of equals.
        if let Some((problem, due)) = with_due
            .iter()
            .filter_map(|(p, due)| due.filter(|d| *d <= now).map(|d| (*p, d)))
            .min_by_key(|(_, d)| *d)
        {
            debug!("Serving overdue review {} (due {})", problem, due);
            return problem;
        }

        let unseen: Vec<Problem> = with_due
            .iter()
            .filter(|(_, due)| due.is_none())
            .map(|(p, _)| *p)
            .collect();
        if let Some(problem) = unseen.choose(&mut self.rng) {
            debug!("Serving new problem {} ({} unseen)", problem, unseen.len());
            return *problem;
        }

        // Everything seen and nothing due: take the one closest to due.
        let (problem, due) = with_due
            .iter()
            .filter_map(|(p, due)| due.map(|d| (*p, d)))
            .min_by_key(|(_, d)| *d)
            .unwrap_or((self.eligible[0], now));
        debug!("Nothing due, serving earliest upcoming {} (due {})", problem, due);
        problem
    }

    /// Grades `value` against the current problem, records the attempt and
    /// updates the review stats.
    pub fn submit_answer(&mut self, value: i64) -> Submission {
        let now = self.clock.now_epoch_ms();
        let problem = self.state.current_problem;

        let attempt = AttemptResult {
            problem,
            submitted_answer: value,
            submitted_at_epoch_ms: now,
            response_time_ms: now - self.state.session_start_epoch_ms,
        };

        let is_correct = evaluator::is_correct(&problem, value as f64);
        let feedback = Feedback::from_correct(is_correct);
        info!(
            "{} = {} is {} ({}ms)",
            problem,
            value,
            feedback.as_str(),
            attempt.response_time_ms
        );

        self.state.review_stats = update_stats(
            &self.state.review_stats,
            &problem.key(),
            is_correct,
            attempt.response_time_ms,
            now,
        );
        self.state.history.push(attempt.clone());
        self.state.feedback = Some(feedback);
        self.checkpoint();

        Submission {
            attempt,
            is_correct,
            feedback,
        }
    }

    /// Forgets all review stats and history. The selection is kept.
    pub fn reset_progress(&mut self) {
        info!(
            "Resetting progress ({} review entries, {} attempts)",
            self.state.review_stats.len(),
            self.state.history.len()
        );
        self.state.review_stats.clear();
        self.state.history.clear();
        self.checkpoint();
    }

    /// Replaces selection and stats with imported ones. History is cleared.
    pub fn replace_progress(&mut self, saved: SavedState) {
        let now = self.clock.now_epoch_ms();
        info!(
            "Importing progress with {} review entries",
            saved.review_stats.len()
        );
        self.state = SessionState::from_saved(saved, now);
        self.regenerate_eligible();
        self.checkpoint();
    }

    /// The state that would be written by the next checkpoint.
    pub fn saved_state(&self) -> SavedState {
        self.state.to_saved()
    }

    pub fn summary(&self) -> SessionSummary {
        let now = self.clock.now_epoch_ms();
        let stats = &self.state.review_stats;

        let mut summary = SessionSummary {
            attempted: self.state.history.len(),
            correct: self
                .state
                .history
                .iter()
                .filter(|a| evaluator::is_correct(&a.problem, a.submitted_answer as f64))
                .count(),
            eligible: self.eligible.len(),
            ..Default::default()
        };
        for problem in &self.eligible {
            match stats.get(&problem.key()) {
                Some(s) if s.is_due(now) => summary.due += 1,
                Some(_) => {}
                None => summary.unseen += 1,
            }
        }
        summary
    }

    fn regenerate_eligible(&mut self) {
        self.eligible = problem_set::generate_eligible_problems(
            &self.state.selected_operands,
            self.state.selected_operator,
        );
    }

    fn checkpoint(&self) {
        if let Err(e) = self.store.save(&self.state.to_saved()) {
            warn!("Failed to save state, keeping it in memory only: {}", e);
        }
    }
}
