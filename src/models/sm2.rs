//! SM-2 (SuperMemo 2) spaced repetition update for fact problems.
//!
//! Recall quality is derived from the attempt rather than self-graded:
//! - A wrong answer resets repetitions and schedules the problem for tomorrow
//! - A correct answer under 3 seconds scores quality 5, a slower one scores 4
//! - Correct answers grow the interval 1 day → 6 days → interval × EF
//! - EF is only adjusted on correct answers and never falls below 1.3

use super::review_data::{MAX_INTERVAL_DAYS, MIN_EASE_FACTOR, ReviewStats, StatsMap};
use log::debug;

/// Answers faster than this count as a perfect response.
pub const FAST_RESPONSE_THRESHOLD_MS: i64 = 3_000;
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Recall quality (0-5 scale) for a correct answer given its response time.
pub fn quality_for_response(response_time_ms: i64) -> u8 {
    if response_time_ms < FAST_RESPONSE_THRESHOLD_MS {
        5
    } else {
        4
    }
}

/// Calculates the review statistics following one attempt.
pub fn calculate_next_review(
    review: &ReviewStats,
    is_correct: bool,
    response_time_ms: i64,
    now_epoch_ms: i64,
) -> ReviewStats {
    let mut repetitions = review.repetitions;
    let mut interval_days = review.interval_days;
    let mut ease_factor = review.ease_factor;

    if !is_correct {
        repetitions = 0;
        interval_days = 1.0;
    } else {
        let q = quality_for_response(response_time_ms) as f64;

        interval_days = match repetitions {
            0 => 1.0,
            1 => 6.0,
            _ => (interval_days * ease_factor).round().min(MAX_INTERVAL_DAYS),
        };
        repetitions = repetitions.saturating_add(1);

        ease_factor += 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        if ease_factor < MIN_EASE_FACTOR {
            ease_factor = MIN_EASE_FACTOR;
        }
    }

    let interval_ms = (interval_days.clamp(0.0, MAX_INTERVAL_DAYS) * DAY_MS as f64).round() as i64;
    let next_review_epoch_ms = now_epoch_ms.saturating_add(interval_ms);

    ReviewStats {
        repetitions,
        interval_days,
        ease_factor,
        next_review_epoch_ms,
    }
}

/// Returns a copy of `stats` with the entry for `problem_key` updated.
/// Unknown keys start from [`ReviewStats::default`].
pub fn update_stats(
    stats: &StatsMap,
    problem_key: &str,
    is_correct: bool,
    response_time_ms: i64,
    now_epoch_ms: i64,
) -> StatsMap {
    let current = stats.get(problem_key).cloned().unwrap_or_default();
    let next = calculate_next_review(&current, is_correct, response_time_ms, now_epoch_ms);

    debug!(
        "[SM-2] {}: correct={}, {}ms, reps {} -> {}, interval {} -> {}, EF {:.2} -> {:.2}",
        problem_key,
        is_correct,
        response_time_ms,
        current.repetitions,
        next.repetitions,
        current.interval_days,
        next.interval_days,
        current.ease_factor,
        next.ease_factor
    );

    let mut updated = stats.clone();
    updated.insert(problem_key.to_string(), next);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn review(repetitions: u32, interval_days: f64, ease_factor: f64) -> ReviewStats {
        ReviewStats {
            repetitions,
            interval_days,
            ease_factor,
            next_review_epoch_ms: NOW - 1000,
        }
    }

    #[test]
    fn test_first_review() {
        let stats = update_stats(&StatsMap::new(), "2,3,×", true, 1000, NOW);
        let entry = &stats["2,3,×"];
        assert_eq!(entry.repetitions, 1);
        assert_eq!(entry.interval_days, 1.0);
        assert_eq!(entry.next_review_epoch_ms, NOW + DAY_MS);
    }

    #[test]
    fn test_second_review() {
        let next = calculate_next_review(&review(1, 1.0, 2.5), true, 1000, NOW);
        assert_eq!(next.interval_days, 6.0);
        assert_eq!(next.repetitions, 2);
        assert_eq!(next.next_review_epoch_ms, NOW + 6 * DAY_MS);
    }

    #[test]
    fn test_later_review_multiplies_by_ease() {
        let next = calculate_next_review(&review(2, 6.0, 2.5), true, 1000, NOW);
        assert_eq!(next.interval_days, 15.0);
        assert_eq!(next.repetitions, 3);
    }

    #[test]
    fn test_incorrect_resets() {
        let next = calculate_next_review(&review(5, 16.0, 2.2), false, 500, NOW);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 1.0);
        // EF is untouched on a miss
        assert_eq!(next.ease_factor, 2.2);
        assert_eq!(next.next_review_epoch_ms, NOW + DAY_MS);
    }

    #[test]
    fn test_fast_answer_raises_ease() {
        let next = calculate_next_review(&review(0, 0.0, 2.5), true, 2999, NOW);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_slow_answer_keeps_ease() {
        let next = calculate_next_review(&review(0, 0.0, 2.5), true, 3000, NOW);
        assert!((next.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_ef_floor() {
        // a correct but slow answer from below the floor is lifted to it
        let next = calculate_next_review(&review(2, 6.0, 0.2), true, 10_000, NOW);
        assert_eq!(next.ease_factor, MIN_EASE_FACTOR);

        let mut current = review(0, 0.0, MIN_EASE_FACTOR);
        for i in 0..20 {
            current = calculate_next_review(&current, i % 3 == 0, 10_000, NOW);
            assert!(current.ease_factor >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let next = calculate_next_review(&review(u32::MAX, 1e300, 2.5), true, 1000, NOW);
        assert_eq!(next.repetitions, u32::MAX);
        assert_eq!(next.interval_days, MAX_INTERVAL_DAYS);
        assert!(next.next_review_epoch_ms > NOW);

        let next = calculate_next_review(&review(3, 10.0, 2.5), true, 1000, i64::MAX - 1);
        assert_eq!(next.next_review_epoch_ms, i64::MAX);
    }

    #[test]
    fn test_update_does_not_mutate_input() {
        let mut stats = StatsMap::new();
        stats.insert("4,2,÷".to_string(), review(3, 10.0, 2.5));

        let updated = update_stats(&stats, "4,2,÷", false, 1000, NOW);
        assert_eq!(stats["4,2,÷"].repetitions, 3);
        assert_eq!(updated["4,2,÷"].repetitions, 0);
    }

    #[test]
    fn test_quality() {
        assert_eq!(quality_for_response(0), 5);
        assert_eq!(quality_for_response(2999), 5);
        assert_eq!(quality_for_response(3000), 4);
    }
}
