//! A fact problem is a pair of operands and an operator, e.g. 6 × 7 or 8 ÷ 2 (dividend first).
use super::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    pub operand1: i64,
    pub operand2: i64,
    pub operator: Operator,
}

impl Problem {
    pub fn new(operand1: i64, operand2: i64, operator: Operator) -> Self {
        Self {
            operand1,
            operand2,
            operator,
        }
    }

    /// Problem shown when the current selection yields nothing to practice.
    pub fn fallback(operator: Operator) -> Self {
        match operator {
            Operator::Multiply => Self::new(1, 1, operator),
            Operator::Divide => Self::new(4, 2, operator),
        }
    }

    /// Key used to index review statistics, e.g. `"4,2,÷"`.
    pub fn key(&self) -> String {
        format!("{},{},{}", self.operand1, self.operand2, self.operator.symbol())
    }

    /// Parses a key produced by [`Problem::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        let mut parts = key.splitn(3, ',');
        let operand1 = parts.next()?.trim().parse().ok()?;
        let operand2 = parts.next()?.trim().parse().ok()?;
        let operator = Operator::from_symbol(parts.next()?.trim())?;
        Some(Self::new(operand1, operand2, operator))
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.operand1, self.operator, self.operand2)
    }
}
