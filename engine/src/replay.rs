//! C3 — keylog replay & anomaly detection (spec.md §4.3). Pure: replays a
//! timestamped keystroke sequence against a prompt's typing target.

use models::schemas::session::{AnomalyReport, Issue, KeylogEntry};
use unicode_normalization::UnicodeNormalization;

const BACKSPACE_ALIASES: [&str; 4] = ["Backspace", "BACKSPACE", "BackspaceKey", "KeyBackspace"];
const KEY_LIMIT: usize = 2000;

/// Everything the replay produces (spec.md §4.3).
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub correct: usize,
    pub mistakes: i64,
    pub completed: bool,
    pub duration_ms: i64,
    pub issues: Vec<Issue>,
    pub forbidden_backspace_count: i64,
    pub processed: usize,
}

/// Replays `keylog` against `typing_target`, indexed by NFC-normalized code
/// point (spec.md §9: never split a combining sequence).
pub fn replay(typing_target: &str, keylog: &[KeylogEntry], allow_backspace: bool) -> ReplayOutcome {
    let target: Vec<char> = typing_target.nfc().collect();
    let target_len = target.len();

    let mut issues = Vec::new();
    if keylog.len() > KEY_LIMIT {
        issues.push(Issue::KeyLimitExceeded);
    }

    let mut pointer = 0usize;
    let mut mistakes = 0i64;
    let mut forbidden_backspace_count = 0i64;
    let mut last_time: Option<f64> = None;
    let mut first_time: Option<f64> = None;
    let mut last_effective_time = 0.0f64;
    let mut effective_times = Vec::with_capacity(keylog.len());

    for entry in keylog {
        let t = entry.t;
        if !t.is_finite() {
            issues.push(Issue::InvalidTimestamp);
            continue;
        }
        if t < 0.0 {
            issues.push(Issue::NegativeTimestamp);
            continue;
        }

        let effective_t = match last_time {
            Some(lt) if t < lt => {
                issues.push(Issue::TimestampNotSorted);
                lt.max(t)
            }
            _ => t,
        };
        last_time = Some(effective_t);
        first_time.get_or_insert(effective_t);
        last_effective_time = effective_t;
        effective_times.push(effective_t);

        if BACKSPACE_ALIASES.contains(&entry.k.as_str()) {
            if allow_backspace {
                pointer = pointer.saturating_sub(1);
            } else {
                mistakes += 1;
                forbidden_backspace_count += 1;
            }
        } else if pointer >= target_len {
            mistakes += 1;
        } else if key_matches(&entry.k, target[pointer]) {
            pointer += 1;
        } else {
            mistakes += 1;
        }
    }

    let duration_ms = match first_time {
        Some(first) => ((last_effective_time - first).max(0.0)) as i64,
        None => 0,
    };

    ReplayOutcome {
        correct: pointer,
        mistakes,
        completed: pointer >= target_len,
        duration_ms,
        issues,
        forbidden_backspace_count,
        processed: keylog.len(),
    }
}

fn key_matches(reported_key: &str, expected: char) -> bool {
    let mut chars = reported_key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c == expected,
        _ => false,
    }
}

/// Interval statistics over consecutive effective timestamps, used by the
/// evaluator's anomaly check (spec.md §4.3/§4.4).
pub fn interval_stats(typing_target: &str, keylog: &[KeylogEntry]) -> AnomalyReport {
    let _ = typing_target;
    let times: Vec<f64> = collect_effective_times(keylog);

    if times.len() < 2 {
        return AnomalyReport {
            mean: 0.0,
            stdev: 0.0,
            cv: 0.0,
            count: times.len().saturating_sub(1).max(0) as u32,
        };
    }

    let deltas: Vec<f64> = times
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .collect();

    let count = deltas.len();
    let mean = deltas.iter().sum::<f64>() / count as f64;
    let variance = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / count as f64;
    let stdev = variance.sqrt();
    let cv = if mean == 0.0 { f64::INFINITY } else { stdev / mean };

    AnomalyReport {
        mean,
        stdev,
        cv,
        count: count as u32,
    }
}

fn collect_effective_times(keylog: &[KeylogEntry]) -> Vec<f64> {
    let mut last_time: Option<f64> = None;
    let mut times = Vec::with_capacity(keylog.len());
    for entry in keylog {
        let t = entry.t;
        if !t.is_finite() || t < 0.0 {
            continue;
        }
        let effective_t = match last_time {
            Some(lt) if t < lt => lt.max(t),
            _ => t,
        };
        last_time = Some(effective_t);
        times.push(effective_t);
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(t: f64, k: &str) -> KeylogEntry {
        KeylogEntry {
            t,
            k: k.to_string(),
            ok: None,
        }
    }

    #[test]
    fn clean_completion_matches_s1() {
        let keylog = vec![
            entry(0.0, "r"),
            entry(310.0, "o"),
            entry(660.0, "m"),
            entry(1000.0, "a"),
            entry(1500.0, "j"),
            entry(2150.0, "i"),
        ];
        let outcome = replay("romaji", &keylog, true);
        assert_eq!(outcome.correct, 6);
        assert_eq!(outcome.mistakes, 0);
        assert!(outcome.completed);
        assert_eq!(outcome.duration_ms, 2150);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn forbidden_backspace_matches_s2() {
        let keylog = vec![
            entry(0.0, "a"),
            entry(300.0, "Backspace"),
            entry(600.0, "a"),
            entry(900.0, "b"),
        ];
        let outcome = replay("ab", &keylog, false);
        assert!(outcome.issues.contains(&Issue::KeyLimitExceeded).then_some(()).is_none());
        assert_eq!(outcome.forbidden_backspace_count, 1);
        assert_eq!(outcome.correct, 2);
    }

    #[test]
    fn backspace_allowed_moves_pointer_back() {
        let keylog = vec![entry(0.0, "a"), entry(100.0, "x"), entry(200.0, "Backspace"), entry(300.0, "b")];
        let outcome = replay("ab", &keylog, true);
        assert_eq!(outcome.correct, 2);
        assert_eq!(outcome.mistakes, 1); // the wrong 'x'
        assert_eq!(outcome.forbidden_backspace_count, 0);
    }

    #[test]
    fn overrun_past_target_counts_as_mistake() {
        let keylog = vec![entry(0.0, "a"), entry(100.0, "b"), entry(200.0, "c")];
        let outcome = replay("ab", &keylog, true);
        assert_eq!(outcome.correct, 2);
        assert_eq!(outcome.mistakes, 1);
        assert!(outcome.completed);
    }

    #[test]
    fn non_finite_and_negative_timestamps_are_flagged_and_skipped() {
        let keylog = vec![
            entry(f64::NAN, "a"),
            entry(-5.0, "a"),
            entry(0.0, "a"),
        ];
        let outcome = replay("a", &keylog, true);
        assert!(outcome.issues.contains(&Issue::InvalidTimestamp));
        assert!(outcome.issues.contains(&Issue::NegativeTimestamp));
        assert_eq!(outcome.correct, 1);
    }

    #[test]
    fn out_of_order_timestamps_are_flagged_but_processed() {
        let keylog = vec![entry(100.0, "a"), entry(50.0, "b")];
        let outcome = replay("ab", &keylog, true);
        assert!(outcome.issues.contains(&Issue::TimestampNotSorted));
        assert_eq!(outcome.correct, 2);
        assert_eq!(outcome.duration_ms, 0);
    }

    #[test]
    fn empty_target_is_vacuously_completed() {
        let outcome = replay("", &[], true);
        assert!(outcome.completed);
        assert_eq!(outcome.correct, 0);
        assert_eq!(outcome.duration_ms, 0);
    }

    #[test]
    fn key_limit_exceeded_is_flagged_without_truncating() {
        let keylog: Vec<KeylogEntry> = (0..2001)
            .map(|i| entry(i as f64, "x"))
            .collect();
        let outcome = replay(&"x".repeat(2001), &keylog, true);
        assert!(outcome.issues.contains(&Issue::KeyLimitExceeded));
        assert_eq!(outcome.processed, 2001);
    }

    #[test]
    fn combining_sequence_in_target_is_nfc_folded() {
        // "cafe" + combining acute accent, decomposed form of "café".
        let target = "cafe\u{0301}";
        let keylog = vec![
            entry(0.0, "c"),
            entry(10.0, "a"),
            entry(20.0, "f"),
            entry(30.0, "\u{e9}"), // precomposed é, matches the NFC-folded target
        ];
        let outcome = replay(target, &keylog, true);
        assert!(outcome.completed);
        assert_eq!(outcome.correct, 4);
    }

    #[test]
    fn interval_cv_is_zero_for_uniform_typing() {
        let keylog: Vec<KeylogEntry> = (0..20).map(|i| entry(i as f64 * 100.0, "a")).collect();
        let stats = interval_stats("aaaaaaaaaaaaaaaaaaaa", &keylog);
        assert_eq!(stats.cv, 0.0);
        assert_eq!(stats.count, 19);
    }

    #[test]
    fn interval_stats_with_fewer_than_two_entries_are_zero() {
        let stats = interval_stats("a", &[entry(0.0, "a")]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
    }
}
