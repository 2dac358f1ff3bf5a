//! C1 — scoring kernel (spec.md §4.1). Pure: given replayed counts and an
//! elapsed duration, produces the authoritative typing metrics, and compares
//! a client's reported metrics against them within a tolerance.

use models::schemas::session::TypingStats;

use crate::error::CoreError;

/// Per-field absolute-delta tolerances for the reported-vs-authoritative
/// comparison (spec.md §4.1).
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub cpm: f64,
    pub wpm: f64,
    pub accuracy: f64,
    pub score: f64,
}

impl Default for Tolerances {
    /// Default tolerances (spec.md §4.1): `{cpm:1.0, wpm:1.0, accuracy:0.02,
    /// score:1}`.
    fn default() -> Self {
        Self {
            cpm: 1.0,
            wpm: 1.0,
            accuracy: 0.02,
            score: 1.0,
        }
    }
}

impl Tolerances {
    /// The session evaluator's (C4) relaxed tolerances for network jitter.
    pub fn relaxed() -> Self {
        Self {
            cpm: 1.5,
            wpm: 1.5,
            accuracy: 0.05,
            score: 2.0,
        }
    }
}

/// Per-field absolute deltas and the overall verdict of a comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComparisonResult {
    pub ok: bool,
    pub cpm_delta: f64,
    pub wpm_delta: f64,
    pub accuracy_delta: f64,
    pub score_delta: f64,
}

/// Computes `(cpm, wpm, accuracy, score)` from replayed counts and elapsed
/// time (spec.md §4.1). `elapsed_ms <= 0` degenerates to `cpm=wpm=score=0`
/// with `accuracy=1` iff there were no mistakes. Negative `correct`/
/// `mistakes` are a programmer error.
pub fn calculate_typing_stats(
    correct: i64,
    mistakes: i64,
    elapsed_ms: f64,
) -> Result<TypingStats, CoreError> {
    if correct < 0 || mistakes < 0 {
        return Err(CoreError::validation(
            "correct and mistakes must be non-negative",
        ));
    }

    let total = correct + mistakes;
    let accuracy = if total == 0 {
        1.0
    } else {
        correct as f64 / total as f64
    };

    if elapsed_ms <= 0.0 {
        return Ok(TypingStats {
            cpm: 0.0,
            wpm: 0.0,
            accuracy: if mistakes == 0 { 1.0 } else { 0.0 },
            score: 0,
        });
    }

    let elapsed_minutes = elapsed_ms / 60_000.0;
    let cpm = correct as f64 / elapsed_minutes;
    let wpm = cpm / 5.0;
    let score = (cpm * accuracy * accuracy / 2.0).floor() as i64;

    Ok(TypingStats {
        cpm,
        wpm,
        accuracy,
        score,
    })
}

/// Compares a client-reported value against the authoritative one,
/// returning `f64::INFINITY` when the report is missing or NaN (spec.md
/// §4.1).
fn field_delta(reported: Option<f64>, authoritative: f64) -> f64 {
    match reported {
        Some(v) if v.is_finite() => (v - authoritative).abs(),
        _ => f64::INFINITY,
    }
}

/// Compares reported metrics against the authoritative ones within
/// `tolerances`, per spec.md §4.1.
pub fn compare_reported(
    reported_cpm: Option<f64>,
    reported_wpm: Option<f64>,
    reported_accuracy: Option<f64>,
    reported_score: Option<f64>,
    authoritative: &TypingStats,
    tolerances: &Tolerances,
) -> ComparisonResult {
    let cpm_delta = field_delta(reported_cpm, authoritative.cpm);
    let wpm_delta = field_delta(reported_wpm, authoritative.wpm);
    let accuracy_delta = field_delta(reported_accuracy, authoritative.accuracy);
    let score_delta = field_delta(reported_score, authoritative.score as f64);

    let ok = cpm_delta <= tolerances.cpm
        && wpm_delta <= tolerances.wpm
        && accuracy_delta <= tolerances.accuracy
        && score_delta <= tolerances.score;

    ComparisonResult {
        ok,
        cpm_delta,
        wpm_delta,
        accuracy_delta,
        score_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_finish_matches_s1() {
        // S1 from spec.md §8: target "romaji", 6 correct keystrokes over 2150ms.
        let stats = calculate_typing_stats(6, 0, 2150.0).unwrap();
        assert!((stats.cpm - 167.441_86).abs() < 0.01);
        assert!((stats.wpm - 33.488_37).abs() < 0.01);
        assert_eq!(stats.accuracy, 1.0);
        assert_eq!(stats.score, 83);
    }

    #[test]
    fn zero_total_is_full_accuracy() {
        let stats = calculate_typing_stats(0, 0, 1000.0).unwrap();
        assert_eq!(stats.accuracy, 1.0);
        assert_eq!(stats.cpm, 0.0);
        assert_eq!(stats.score, 0);
    }

    #[test]
    fn non_positive_elapsed_degenerates() {
        let clean = calculate_typing_stats(5, 0, 0.0).unwrap();
        assert_eq!(clean.accuracy, 1.0);
        assert_eq!(clean.cpm, 0.0);

        let dirty = calculate_typing_stats(5, 2, -10.0).unwrap();
        assert_eq!(dirty.accuracy, 0.0);
        assert_eq!(dirty.cpm, 0.0);
    }

    #[test]
    fn negative_inputs_reject() {
        assert!(calculate_typing_stats(-1, 0, 1000.0).is_err());
        assert!(calculate_typing_stats(0, -1, 1000.0).is_err());
    }

    #[test]
    fn accuracy_is_always_bounded() {
        for correct in 0..20i64 {
            for mistakes in 0..20i64 {
                let stats = calculate_typing_stats(correct, mistakes, 5000.0).unwrap();
                assert!(stats.accuracy >= 0.0 && stats.accuracy <= 1.0);
            }
        }
    }

    #[test]
    fn score_is_monotonic_in_correctness() {
        let (mistakes, elapsed) = (3, 10_000.0);
        let mut prev_score = -1i64;
        for correct in 0..50 {
            let stats = calculate_typing_stats(correct, mistakes, elapsed).unwrap();
            assert!(stats.score >= prev_score);
            prev_score = stats.score;
        }
    }

    #[test]
    fn missing_or_nan_report_forces_mismatch() {
        let authoritative = TypingStats {
            cpm: 100.0,
            wpm: 20.0,
            accuracy: 1.0,
            score: 50,
        };
        let result = compare_reported(
            None,
            Some(f64::NAN),
            Some(1.0),
            Some(50.0),
            &authoritative,
            &Tolerances::default(),
        );
        assert!(!result.ok);
        assert!(result.cpm_delta.is_infinite());
        assert!(result.wpm_delta.is_infinite());
    }

    #[test]
    fn within_tolerance_is_ok() {
        let authoritative = TypingStats {
            cpm: 100.0,
            wpm: 20.0,
            accuracy: 0.98,
            score: 50,
        };
        let result = compare_reported(
            Some(100.5),
            Some(20.4),
            Some(0.96),
            Some(51.0),
            &authoritative,
            &Tolerances::relaxed(),
        );
        assert!(result.ok);
    }
}
