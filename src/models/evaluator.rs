//! Grades submitted answers. Grading never fails: anything that cannot be a correct answer is `false`.
use super::{Operator, Problem};

/// Returns whether `answer` solves `problem`.
///
/// Answers are compared as `f64` so a fractional answer such as 2.5 can be graded
/// (and is never correct, as every expected result is a whole number).
pub fn is_correct(problem: &Problem, answer: f64) -> bool {
    match expected_answer(problem) {
        Some(expected) => answer == expected as f64,
        None => false,
    }
}

/// The whole-number answer to `problem`, or `None` if it has none
/// (division by zero, an uneven quotient, or overflow).
pub fn expected_answer(problem: &Problem) -> Option<i64> {
    let (a, b) = (problem.operand1, problem.operand2);
    match problem.operator {
        Operator::Multiply => a.checked_mul(b),
        Operator::Divide => {
            if b == 0 || a.checked_rem(b)? != 0 {
                return None;
            }
            a.checked_div(b)
        }
    }
}

/// Grades a raw attempt whose operator arrives as a symbol. Unknown symbols are never correct.
pub fn is_correct_raw(operand1: i64, operand2: i64, operator_symbol: &str, answer: f64) -> bool {
    match Operator::from_symbol(operator_symbol) {
        Some(operator) => is_correct(&Problem::new(operand1, operand2, operator), answer),
        None => false,
    }
}
