//! The submission record and its row encoding.
//!
//! Column order is fixed:
//!
//! ```text
//! unscored: id, sex, age, type, category, style, choice_1 .. choice_n, submitted_at
//! scored:   id, sex, age, type, category, style, (choice_1, score_1) .. (choice_n, score_n), submitted_at
//! ```
//!
//! The writer never checks the sheet's header row against this order.

use std::str::FromStr;

use chrono::FixedOffset;
use serde::Serialize;
use serde_json::Value;

use crate::demographics::{Age, Score, Sex};
use crate::error::CoreError;
use crate::mbti::Mbti;
use crate::style::FirstImpressionStyle;
use crate::types::{SessionId, Timestamp};

/// `strftime` pattern for the submission timestamp column.
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Index of the identifier column in every layout.
pub const IDENTIFIER_COLUMN: usize = 0;

/// Asia/Seoul, the default wall clock.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Which wall clock the submission timestamp is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallClock {
    /// The host's local time zone.
    Local,
    Fixed(FixedOffset),
}

impl WallClock {
    pub fn format(&self, at: Timestamp) -> String {
        match self {
            WallClock::Local => at
                .with_timezone(&chrono::Local)
                .format(SUBMITTED_AT_FORMAT)
                .to_string(),
            WallClock::Fixed(offset) => at
                .with_timezone(offset)
                .format(SUBMITTED_AT_FORMAT)
                .to_string(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).map_or(WallClock::Local, WallClock::Fixed)
    }
}

impl FromStr for WallClock {
    type Err = CoreError;

    /// Accepts `local` or a `+HH:MM` / `-HH:MM` offset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("local") {
            return Ok(WallClock::Local);
        }

        let invalid = || CoreError::Validation(format!("Invalid UTC offset '{s}'. Expected local or +HH:MM"));

        let (sign, rest) = match raw.as_bytes().first() {
            Some(b'+') => (1, &raw[1..]),
            Some(b'-') => (-1, &raw[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(WallClock::Fixed)
            .ok_or_else(invalid)
    }
}

/// The participant's answer to one scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepAnswer {
    pub choice: String,
    /// Present only in scored variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

/// One finalized survey submission, ready to become a sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub session_id: SessionId,
    pub sex: Sex,
    pub age: Age,
    pub mbti: Mbti,
    /// Scenario category used: the type itself, or the style label.
    pub category: String,
    pub style: FirstImpressionStyle,
    pub answers: Vec<StepAnswer>,
    /// Already rendered with [`SUBMITTED_AT_FORMAT`].
    pub submitted_at: String,
}

impl SubmissionRecord {
    /// Encode the record as one sheet row in column order.
    pub fn to_row(&self) -> Vec<Value> {
        let mut row = vec![
            Value::from(self.session_id.as_str()),
            Value::from(self.sex.label()),
            Value::from(self.age.get()),
            Value::from(self.mbti.as_str()),
            Value::from(self.category.as_str()),
            Value::from(self.style.label()),
        ];

        for answer in &self.answers {
            row.push(Value::from(answer.choice.as_str()));
            if let Some(score) = answer.score {
                row.push(Value::from(score.get()));
            }
        }

        row.push(Value::from(self.submitted_at.as_str()));
        row
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demographics::{clamp_age, clamp_score};
    use chrono::TimeZone;
    use serde_json::json;

    fn record(answers: Vec<StepAnswer>) -> SubmissionRecord {
        SubmissionRecord {
            session_id: SessionId::from("u-1"),
            sex: Sex::Male,
            age: clamp_age(25),
            mbti: Mbti::Intj,
            category: "INTJ".to_string(),
            style: FirstImpressionStyle::Rational,
            answers,
            submitted_at: "2025-01-02 03:04:05".to_string(),
        }
    }

    #[test]
    fn unscored_row_layout() {
        let row = record(vec![
            StepAnswer { choice: "a".into(), score: None },
            StepAnswer { choice: "b".into(), score: None },
        ])
        .to_row();

        assert_eq!(
            row,
            vec![
                json!("u-1"),
                json!("남성"),
                json!(25),
                json!("INTJ"),
                json!("INTJ"),
                json!("차갑고 이성적"),
                json!("a"),
                json!("b"),
                json!("2025-01-02 03:04:05"),
            ]
        );
    }

    #[test]
    fn scored_row_interleaves_choice_and_score() {
        let row = record(vec![
            StepAnswer { choice: "a".into(), score: Some(clamp_score(3)) },
            StepAnswer { choice: "b".into(), score: Some(clamp_score(10)) },
        ])
        .to_row();

        assert_eq!(row.len(), 6 + 4 + 1);
        assert_eq!(&row[6..10], &[json!("a"), json!(3), json!("b"), json!(10)]);
        assert_eq!(row[IDENTIFIER_COLUMN], json!("u-1"));
    }

    #[test]
    fn fixed_wall_clock_applies_offset() {
        let at = chrono::Utc.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap();
        let clock: WallClock = "+09:00".parse().unwrap();
        assert_eq!(clock.format(at), "2025-03-02 00:30:00");
    }

    #[test]
    fn negative_offset_parses() {
        let at = chrono::Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let clock: WallClock = "-05:30".parse().unwrap();
        assert_eq!(clock.format(at), "2025-02-28 18:30:00");
    }

    #[test]
    fn default_wall_clock_is_seoul() {
        assert_eq!(WallClock::default(), "+09:00".parse::<WallClock>().unwrap());
    }

    #[test]
    fn local_wall_clock_parses() {
        assert_eq!("LOCAL".parse::<WallClock>().unwrap(), WallClock::Local);
    }

    #[test]
    fn malformed_offsets_are_rejected() {
        for raw in ["09:00", "+9", "+09:75", "+ab:cd", ""] {
            assert!(raw.parse::<WallClock>().is_err(), "{raw}");
        }
    }

    #[test]
    fn out_of_range_hours_are_rejected() {
        for raw in ["+24:00", "-25:30", "+9999999:00", "+-5:00"] {
            assert!(raw.parse::<WallClock>().is_err(), "{raw}");
        }
        assert!("+23:59".parse::<WallClock>().is_ok());
    }
}
