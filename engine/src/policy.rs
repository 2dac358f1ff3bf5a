//! C2 — contest policy (spec.md §4.2). Pure predicates over a contest
//! record, an entry, and the current time.

use chrono::{DateTime, Utc};
use models::domains::sea_orm_active_enums::ContestVisibility;
use models::domains::{contests, entries};
use models::schemas::contest::ContestStatus;

/// `status(contest, now)`.
pub fn status(contest: &contests::Model, now: DateTime<Utc>) -> ContestStatus {
    let starts_at = contest.starts_at.to_utc();
    let ends_at = contest.ends_at.to_utc();
    if now < starts_at {
        ContestStatus::Scheduled
    } else if now >= ends_at {
        ContestStatus::Finished
    } else {
        ContestStatus::Running
    }
}

/// `leaderboardVisible(contest, now)`.
pub fn leaderboard_visible(contest: &contests::Model, now: DateTime<Utc>) -> bool {
    use models::domains::sea_orm_active_enums::LeaderboardVisibility::*;
    match contest.leaderboard_visibility {
        During => status(contest, now) == ContestStatus::Running,
        After => status(contest, now) == ContestStatus::Finished,
        Hidden => false,
    }
}

/// `requiresJoinCode(contest)`.
pub fn requires_join_code(contest: &contests::Model) -> bool {
    matches!(contest.visibility, ContestVisibility::Private)
}

/// `remainingAttempts(contest, entry)`. With no entry, the contest's full
/// cap (or `None` for unlimited) is what remains.
pub fn remaining_attempts(contest: &contests::Model, entry: Option<&entries::Model>) -> Option<i32> {
    let max_attempts = contest.max_attempts?;
    let used = entry.map(|e| e.attempts_used).unwrap_or(0);
    Some((max_attempts - used).max(0))
}

/// Reasons `validateSessionStart` can fail with (spec.md §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRejection {
    NotRunning,
    NotJoined,
    AttemptsExhausted,
}

impl StartRejection {
    pub fn reason_code(self) -> &'static str {
        match self {
            StartRejection::NotRunning => "CONTEST_NOT_RUNNING",
            StartRejection::NotJoined => "NOT_JOINED",
            StartRejection::AttemptsExhausted => "ATTEMPTS_EXHAUSTED",
        }
    }
}

/// `validateSessionStart(contest, entry, now)`.
pub fn validate_session_start(
    contest: &contests::Model,
    entry: Option<&entries::Model>,
    now: DateTime<Utc>,
) -> Result<(), StartRejection> {
    if status(contest, now) != ContestStatus::Running {
        return Err(StartRejection::NotRunning);
    }

    let entry = entry.ok_or(StartRejection::NotJoined)?;

    if let Some(max_attempts) = contest.max_attempts {
        if entry.attempts_used >= max_attempts {
            return Err(StartRejection::AttemptsExhausted);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use models::domains::sea_orm_active_enums::{
        ContestVisibility, LeaderboardVisibility, PromptLanguage,
    };

    fn contest(starts_in: i64, duration_min: i64, max_attempts: Option<i32>) -> contests::Model {
        let now = Utc::now();
        contests::Model {
            id: "c1".into(),
            title: "t".into(),
            description: None,
            visibility: ContestVisibility::Public,
            join_code: None,
            starts_at: (now + Duration::seconds(starts_in)).fixed_offset(),
            ends_at: (now + Duration::seconds(starts_in) + Duration::minutes(duration_min))
                .fixed_offset(),
            timezone: "UTC".into(),
            time_limit_sec: 60,
            allow_backspace: true,
            leaderboard_visibility: LeaderboardVisibility::During,
            language: PromptLanguage::English,
            max_attempts,
            created_by: "u1".into(),
            created_at: now.fixed_offset(),
        }
    }

    fn entry(attempts_used: i32) -> entries::Model {
        entries::Model {
            id: 1,
            user_id: "u1".into(),
            contest_id: "c1".into(),
            attempts_used,
            best_score: None,
            best_cpm: None,
            best_accuracy: None,
            last_attempt_at: None,
        }
    }

    #[test]
    fn status_transitions() {
        let scheduled = contest(3600, 60, None);
        assert_eq!(status(&scheduled, Utc::now()), ContestStatus::Scheduled);

        let running = contest(-60, 60, None);
        assert_eq!(status(&running, Utc::now()), ContestStatus::Running);

        let finished = contest(-7200, 1, None);
        assert_eq!(status(&finished, Utc::now()), ContestStatus::Finished);
    }

    #[test]
    fn start_rejects_when_not_running() {
        let scheduled = contest(3600, 60, None);
        assert_eq!(
            validate_session_start(&scheduled, Some(&entry(0)), Utc::now()),
            Err(StartRejection::NotRunning)
        );
    }

    #[test]
    fn start_rejects_missing_entry() {
        let running = contest(-60, 60, None);
        assert_eq!(
            validate_session_start(&running, None, Utc::now()),
            Err(StartRejection::NotJoined)
        );
    }

    #[test]
    fn start_rejects_exhausted_attempts() {
        // S6 from spec.md §8: maxAttempts=3, attemptsUsed=3.
        let running = contest(-60, 60, Some(3));
        assert_eq!(
            validate_session_start(&running, Some(&entry(3)), Utc::now()),
            Err(StartRejection::AttemptsExhausted)
        );
    }

    #[test]
    fn start_allows_when_cap_absent() {
        let running = contest(-60, 60, None);
        assert!(validate_session_start(&running, Some(&entry(999)), Utc::now()).is_ok());
    }

    #[test]
    fn remaining_attempts_with_no_entry_is_full_cap() {
        let running = contest(-60, 60, Some(5));
        assert_eq!(remaining_attempts(&running, None), Some(5));
    }
}
