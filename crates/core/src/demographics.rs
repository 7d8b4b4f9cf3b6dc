//! Demographic inputs and the numeric widget bounds of the form.
//!
//! Out-of-range numbers are clamped the way the input widgets clamp them;
//! they are never rejected.

use serde::{Deserialize, Serialize};

pub const MIN_AGE: u8 = 10;
pub const MAX_AGE: u8 = 100;
pub const DEFAULT_AGE: u8 = 20;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "남성")]
    Male,
    #[serde(rename = "여성")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "남성",
            Sex::Female => "여성",
        }
    }
}

/// Participant age, always within `[MIN_AGE, MAX_AGE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Age {
    fn default() -> Self {
        Age(DEFAULT_AGE)
    }
}

/// Self-rating attached to a scenario answer, always within `[MIN_SCORE, MAX_SCORE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Clamp a raw age entry into `[MIN_AGE, MAX_AGE]`.
pub fn clamp_age(raw: i64) -> Age {
    Age(raw.clamp(i64::from(MIN_AGE), i64::from(MAX_AGE)) as u8)
}

/// Clamp a raw rating into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(raw: i64) -> Score {
    Score(raw.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_age_passes_through_valid_value() {
        assert_eq!(clamp_age(25).get(), 25);
        assert_eq!(clamp_age(10).get(), 10);
        assert_eq!(clamp_age(100).get(), 100);
    }

    #[test]
    fn clamp_age_floors_at_min() {
        assert_eq!(clamp_age(9).get(), MIN_AGE);
        assert_eq!(clamp_age(-40).get(), MIN_AGE);
    }

    #[test]
    fn clamp_age_caps_at_max() {
        assert_eq!(clamp_age(101).get(), MAX_AGE);
        assert_eq!(clamp_age(i64::MAX).get(), MAX_AGE);
    }

    #[test]
    fn default_age_is_twenty() {
        assert_eq!(Age::default().get(), 20);
    }

    #[test]
    fn clamp_score_bounds() {
        assert_eq!(clamp_score(-1).get(), 0);
        assert_eq!(clamp_score(7).get(), 7);
        assert_eq!(clamp_score(11).get(), 10);
    }

    #[test]
    fn sex_serializes_as_korean_label() {
        assert_eq!(serde_json::to_value(Sex::Male).unwrap(), "남성");
        let parsed: Sex = serde_json::from_value(serde_json::json!("여성")).unwrap();
        assert_eq!(parsed, Sex::Female);
    }
}
