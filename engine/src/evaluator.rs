//! C4 — session evaluator (spec.md §4.4). Composes the kernel (C1) and
//! replay (C3) into a single verdict: `dq` beats `expired` beats `finished`.

use models::domains::entries;
use models::schemas::session::{ClientFlags, FinishPayload, Issue, TypingStats, Verdict};

use crate::error::CoreError;
use crate::kernel::{self, Tolerances};
use crate::replay::{self, ReplayOutcome};
use models::schemas::session::AnomalyReport;

/// Issues that disqualify a session outright, independent of whether the
/// prompt was completed (spec.md §4.4). Everything else is recorded but
/// surfaced only for operator review.
const DISQUALIFYING: [Issue; 3] = [
    Issue::MetricMismatch,
    Issue::KeyLimitExceeded,
    Issue::BackspaceForbidden,
];

/// Allowed slack, in milliseconds, before a session is flagged as having run
/// past the contest's time limit (spec.md §4.4 step 8: 1s network slack).
const TIME_LIMIT_SLACK_MS: i64 = 1_000;

/// Everything `evaluateSession` produces before the typing store persists it.
#[derive(Clone, Debug)]
pub struct EvaluationOutcome {
    pub verdict: Verdict,
    pub stats: TypingStats,
    pub mistakes: i64,
    pub issues: Vec<Issue>,
    pub anomaly: AnomalyReport,
}

/// `evaluateSession(entry, contest, prompt, payload, now)`, spec.md §4.4.
pub fn evaluate_session(
    entry: Option<&entries::Model>,
    typing_target: &str,
    allow_backspace: bool,
    time_limit_sec: i32,
    payload: &FinishPayload,
) -> Result<EvaluationOutcome, CoreError> {
    let ReplayOutcome {
        correct,
        mistakes,
        completed,
        duration_ms,
        mut issues,
        forbidden_backspace_count,
        ..
    } = replay::replay(typing_target, &payload.keylog, allow_backspace);

    if entry.is_none() {
        issues.push(Issue::EntryNotFound);
    }

    let anomaly = replay::interval_stats(typing_target, &payload.keylog);

    let elapsed_ms = duration_ms.max(1) as f64;
    let stats = kernel::calculate_typing_stats(correct as i64, mistakes, elapsed_ms)?;

    let comparison = kernel::compare_reported(
        payload.cpm,
        payload.wpm,
        payload.accuracy,
        payload.score,
        &stats,
        &Tolerances::relaxed(),
    );
    if !comparison.ok {
        issues.push(Issue::MetricMismatch);
    }

    match payload.errors {
        None => {}
        Some(reported) if (reported - mistakes).abs() <= 1 => {}
        Some(_) => issues.push(Issue::ErrorCountMismatch),
    }

    if !completed && !typing_target.is_empty() {
        issues.push(Issue::PromptNotCompleted);
    }

    if forbidden_backspace_count > 0 {
        issues.push(Issue::BackspaceForbidden);
    }

    let limit_ms = time_limit_sec as i64 * 1_000;
    if duration_ms > limit_ms + TIME_LIMIT_SLACK_MS {
        issues.push(Issue::TimeLimitExceeded);
    }

    if anomaly.count > 10 && anomaly.cv != 0.0 && anomaly.cv < 0.1 {
        issues.push(Issue::LowVarianceTyping);
    }

    let verdict = if issues.iter().any(|i| DISQUALIFYING.contains(i)) {
        Verdict::Dq
    } else if !completed {
        Verdict::Expired
    } else {
        Verdict::Finished
    };

    Ok(EvaluationOutcome {
        verdict,
        stats,
        mistakes,
        issues,
        anomaly,
    })
}

/// `isBetter(candidate, current)`, spec.md §4.4: lexicographic over
/// `(score desc, accuracy desc, cpm desc)`.
pub fn is_better(candidate: &TypingStats, current_best_score: Option<i64>, current_best_accuracy: Option<f64>, current_best_cpm: Option<f64>) -> bool {
    let (Some(best_score), Some(best_accuracy), Some(best_cpm)) =
        (current_best_score, current_best_accuracy, current_best_cpm)
    else {
        return true;
    };

    if candidate.score != best_score {
        return candidate.score > best_score;
    }
    if candidate.accuracy != best_accuracy {
        return candidate.accuracy > best_accuracy;
    }
    candidate.cpm > best_cpm
}

/// Whether `flags` (client-reported, spec.md §4.4) reflect a pasted-in
/// submission. Never trusted alone for disqualification, only surfaced.
pub fn flags_suspicious(flags: &ClientFlags) -> bool {
    flags.paste_blocked == Some(false) && flags.defocus.unwrap_or(0) > 0
}
