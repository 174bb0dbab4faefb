//! Enumerates every fact problem eligible for practice under the current selection.
use super::{Operator, Problem};
use std::collections::{BTreeSet, HashSet};
use std::ops::RangeInclusive;

/// The fixed 1..10 range every selected operand is combined with.
pub const REFERENCE_RANGE: RangeInclusive<i64> = 1..=10;

/// Returns all distinct problems for `selected` operands and `operator`.
///
/// Output is deterministic for the same input. An empty selection yields no problems.
pub fn generate_eligible_problems(selected: &BTreeSet<i64>, operator: Operator) -> Vec<Problem> {
    if selected.is_empty() {
        return Vec::new();
    }

    let mut pairs = PairCollector::default();

    match operator {
        Operator::Multiply => {
            for i in REFERENCE_RANGE {
                for &s in selected {
                    pairs.push(i, s);
                    if i != s {
                        pairs.push(s, i);
                    }
                }
            }
            for &s1 in selected {
                for &s2 in selected {
                    pairs.push(s1, s2);
                }
            }
        }
        Operator::Divide => {
            let reference: Vec<i64> = REFERENCE_RANGE.collect();
            let selected: Vec<i64> = selected.iter().copied().collect();

            for (dividends, divisors) in [
                (&selected, &selected),
                (&reference, &selected),
                (&selected, &reference),
            ] {
                for &dividend in dividends {
                    for &divisor in divisors {
                        if divides_evenly(dividend, divisor) {
                            pairs.push(dividend, divisor);
                        }
                    }
                }
            }
        }
    }

    pairs
        .into_vec()
        .into_iter()
        .map(|(a, b)| Problem::new(a, b, operator))
        .collect()
}

/// True when `dividend ÷ divisor` is a whole number of at least 1.
fn divides_evenly(dividend: i64, divisor: i64) -> bool {
    divisor != 0 && dividend % divisor == 0 && dividend / divisor >= 1
}

/// Keeps first-seen order while dropping repeated pairs.
#[derive(Default)]
struct PairCollector {
    seen: HashSet<(i64, i64)>,
    ordered: Vec<(i64, i64)>,
}

impl PairCollector {
    fn push(&mut self, a: i64, b: i64) {
        if self.seen.insert((a, b)) {
            self.ordered.push((a, b));
        }
    }

    fn into_vec(self) -> Vec<(i64, i64)> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[i64]) -> BTreeSet<i64> {
        values.iter().copied().collect()
    }

    fn has(problems: &[Problem], a: i64, b: i64) -> bool {
        problems.iter().any(|p| p.operand1 == a && p.operand2 == b)
    }

    fn assert_no_duplicates(problems: &[Problem]) {
        let unique: HashSet<(i64, i64)> = problems.iter().map(|p| (p.operand1, p.operand2)).collect();
        assert_eq!(unique.len(), problems.len());
    }

    #[test]
    fn test_empty_selection() {
        assert!(generate_eligible_problems(&BTreeSet::new(), Operator::Multiply).is_empty());
        assert!(generate_eligible_problems(&BTreeSet::new(), Operator::Divide).is_empty());
    }

    #[test]
    fn test_multiply_includes_both_orderings() {
        let problems = generate_eligible_problems(&set(&[2, 3]), Operator::Multiply);
        assert!(has(&problems, 2, 3));
        assert!(has(&problems, 3, 2));
        assert!(has(&problems, 1, 2));
        assert!(has(&problems, 2, 1));
        assert!(has(&problems, 2, 2));
        assert!(!has(&problems, 4, 5));
        assert!(problems.iter().all(|p| p.operator == Operator::Multiply));
        assert_no_duplicates(&problems);
    }

    #[test]
    fn test_multiply_single_operand_count() {
        // 10 pairs (i, 5) plus 9 reversed pairs (5, i) for i != 5
        let problems = generate_eligible_problems(&set(&[5]), Operator::Multiply);
        assert_eq!(problems.len(), 19);
    }

    #[test]
    fn test_multiply_full_range_count() {
        let all: BTreeSet<i64> = REFERENCE_RANGE.collect();
        let problems = generate_eligible_problems(&all, Operator::Multiply);
        assert_eq!(problems.len(), 100);
    }

    #[test]
    fn test_multiply_out_of_range_operand() {
        let problems = generate_eligible_problems(&set(&[12]), Operator::Multiply);
        assert!(has(&problems, 12, 12));
        assert!(has(&problems, 12, 7));
        assert_no_duplicates(&problems);
    }

    #[test]
    fn test_divide_problems_are_valid() {
        let problems = generate_eligible_problems(&set(&[1, 2, 4, 8]), Operator::Divide);
        assert!(!problems.is_empty());
        for p in &problems {
            assert_eq!(p.operator, Operator::Divide);
            assert_ne!(p.operand2, 0);
            assert_eq!(p.operand1 % p.operand2, 0);
            assert!(p.operand1 / p.operand2 >= 1);
        }
        for (a, b) in [(4, 2), (8, 2), (8, 4), (2, 1), (8, 1), (6, 2), (4, 4), (8, 8)] {
            assert!(has(&problems, a, b), "missing {} ÷ {}", a, b);
        }
        assert_no_duplicates(&problems);
    }

    #[test]
    fn test_divide_uses_reference_range() {
        let problems = generate_eligible_problems(&set(&[1, 2, 3, 5]), Operator::Divide);
        for (a, b) in [(2, 1), (3, 1), (5, 1), (6, 2), (9, 3), (10, 5)] {
            assert!(has(&problems, a, b), "missing {} ÷ {}", a, b);
        }
        // quotient below 1 is never offered
        assert!(!has(&problems, 2, 4));
    }

    #[test]
    fn test_divide_zero_operand() {
        let problems = generate_eligible_problems(&set(&[0]), Operator::Divide);
        assert!(problems.iter().all(|p| p.operand2 != 0 && p.operand1 != 0));
    }

    #[test]
    fn test_deterministic() {
        let selected = set(&[3, 7, 9]);
        assert_eq!(
            generate_eligible_problems(&selected, Operator::Divide),
            generate_eligible_problems(&selected, Operator::Divide)
        );
    }
}
