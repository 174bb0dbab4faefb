pub mod attempt;
pub mod clock;
pub mod evaluator;
pub mod operator;
pub mod problem;
pub mod problem_set;
pub mod review_data;
pub mod saved_state;
pub mod session;
pub mod sm2;

pub use attempt::{AttemptResult, Feedback, Submission};
pub use clock::{Clock, ManualClock, SystemClock};
pub use operator::Operator;
pub use problem::Problem;
pub use review_data::{ReviewStats, StatsMap};
pub use saved_state::SavedState;
pub use session::{DrillSession, Selection, SessionState, SessionSummary};
