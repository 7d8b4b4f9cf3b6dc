//! Deployment variant of the survey.
//!
//! The form exists in several near-identical flavours that differ only in
//! how the scenario is keyed, whether steps carry a rating, and how the
//! duplicate guard behaves. Each axis is an explicit setting here.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Which answer picks the dialogue scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKeying {
    /// The participant's MBTI type (via its temperament group).
    PersonalityType,
    /// The first-impression style label.
    Style,
}

/// How prior submissions are looked up before appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Append unconditionally.
    Disabled,
    /// Scan the identifier column.
    IdentifierColumn,
    /// Read every row and match the identifier header's column.
    FullRecords,
}

/// What to do when the store cannot be read during a duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckFailurePolicy {
    /// Treat the participant as new and go on to append.
    FailOpen,
    /// Refuse the submission.
    FailClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyVariant {
    pub keying: ScenarioKeying,
    pub scored: bool,
    pub duplicate_check: DuplicateCheck,
    pub on_check_failure: CheckFailurePolicy,
}

impl Default for SurveyVariant {
    fn default() -> Self {
        Self {
            keying: ScenarioKeying::PersonalityType,
            scored: false,
            duplicate_check: DuplicateCheck::IdentifierColumn,
            on_check_failure: CheckFailurePolicy::FailClosed,
        }
    }
}

impl FromStr for ScenarioKeying {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "type" | "mbti" | "personality-type" => Ok(Self::PersonalityType),
            "style" => Ok(Self::Style),
            other => Err(CoreError::Validation(format!(
                "Invalid scenario keying '{other}'. Must be one of: type, style"
            ))),
        }
    }
}

impl FromStr for DuplicateCheck {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "disabled" | "none" => Ok(Self::Disabled),
            "identifier-column" | "id-column" => Ok(Self::IdentifierColumn),
            "full-records" => Ok(Self::FullRecords),
            other => Err(CoreError::Validation(format!(
                "Invalid duplicate check '{other}'. Must be one of: off, identifier-column, full-records"
            ))),
        }
    }
}

impl FromStr for CheckFailurePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(Self::FailOpen),
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            other => Err(CoreError::Validation(format!(
                "Invalid check failure policy '{other}'. Must be one of: fail-open, fail-closed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_variant_matches_the_type_keyed_checked_form() {
        let variant = SurveyVariant::default();
        assert_eq!(variant.keying, ScenarioKeying::PersonalityType);
        assert!(!variant.scored);
        assert_eq!(variant.duplicate_check, DuplicateCheck::IdentifierColumn);
        assert_eq!(variant.on_check_failure, CheckFailurePolicy::FailClosed);
    }

    #[test]
    fn parse_keying() {
        assert_eq!("type".parse::<ScenarioKeying>().unwrap(), ScenarioKeying::PersonalityType);
        assert_eq!("STYLE".parse::<ScenarioKeying>().unwrap(), ScenarioKeying::Style);
        assert!("random".parse::<ScenarioKeying>().is_err());
    }

    #[test]
    fn parse_duplicate_check() {
        assert_eq!("off".parse::<DuplicateCheck>().unwrap(), DuplicateCheck::Disabled);
        assert_eq!(
            "identifier-column".parse::<DuplicateCheck>().unwrap(),
            DuplicateCheck::IdentifierColumn
        );
        assert_eq!("full-records".parse::<DuplicateCheck>().unwrap(), DuplicateCheck::FullRecords);
        assert!("sometimes".parse::<DuplicateCheck>().is_err());
    }

    #[test]
    fn parse_failure_policy() {
        assert_eq!("fail-open".parse::<CheckFailurePolicy>().unwrap(), CheckFailurePolicy::FailOpen);
        assert_eq!(
            " fail-closed ".parse::<CheckFailurePolicy>().unwrap(),
            CheckFailurePolicy::FailClosed
        );
        assert!("maybe".parse::<CheckFailurePolicy>().is_err());
    }
}
