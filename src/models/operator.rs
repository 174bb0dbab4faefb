//! Arithmetic operators a fact problem can use.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const TIMES: &str = "×";
pub const DIVIDE: &str = "÷";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    #[default]
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Multiply => TIMES,
            Operator::Divide => DIVIDE,
        }
    }

    /// Parses an operator symbol. Unknown symbols yield `None`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            TIMES => Some(Operator::Multiply),
            DIVIDE => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// Stored as the bare symbol so saved state stays readable.
impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Operator::from_symbol(&symbol)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown operator '{}'", symbol)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(Operator::Multiply.symbol(), "×");
        assert_eq!(Operator::Divide.symbol(), "÷");
        assert_eq!(Operator::from_symbol("÷"), Some(Operator::Divide));
        assert_eq!(Operator::from_symbol("+"), None);
    }

    #[test]
    fn test_serializes_as_symbol() {
        let json = serde_json::to_string(&Operator::Divide).unwrap();
        assert_eq!(json, "\"÷\"");

        let op: Operator = serde_json::from_str("\"×\"").unwrap();
        assert_eq!(op, Operator::Multiply);

        assert!(serde_json::from_str::<Operator>("\"-\"").is_err());
    }
}
