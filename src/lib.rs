pub mod config;
pub mod database;
pub mod export;
pub mod models;

pub use models::{DrillSession, Feedback, Operator, Problem, ReviewStats, SavedState};
