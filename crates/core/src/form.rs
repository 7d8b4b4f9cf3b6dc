//! Form screens and answer collection.
//!
//! [`FormDefinition`] describes what the browser renders; [`SurveyAnswers`]
//! is what comes back on submit and is turned into a [`SubmissionRecord`]
//! once every scenario step is answered.

use serde::{Deserialize, Serialize};

use crate::demographics::{clamp_age, clamp_score, Sex, DEFAULT_AGE, MAX_AGE, MAX_SCORE, MIN_AGE, MIN_SCORE};
use crate::error::CoreError;
use crate::mbti::Mbti;
use crate::record::{StepAnswer, SubmissionRecord};
use crate::scenario::{scenario_for_style, scenario_for_type, Scenario};
use crate::style::{FirstImpressionStyle, FIRST_IMPRESSION_PROMPT};
use crate::types::SessionId;
use crate::variant::{ScenarioKeying, SurveyVariant};

pub const FORM_TITLE: &str = "내 MBTI를 공략해라 🔍";

/// Confirmation shown after a row is appended.
pub const SUBMITTED_NOTICE: &str = "데이터가 저장되었습니다! 참여해주셔서 고마워요 🙌";

/// Shown instead of the form (or on submit) when the identifier is already recorded.
pub const DUPLICATE_NOTICE: &str = "⚠ 이미 참여한 기록이 있습니다. 한 번만 참여할 수 있어요!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberBounds {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

#[derive(Debug, Serialize)]
pub struct ChoiceQuestion {
    pub prompt: &'static str,
    pub choices: Vec<&'static str>,
}

/// Everything the browser needs to draw the form screens.
#[derive(Debug, Serialize)]
pub struct FormDefinition {
    pub title: &'static str,
    pub sexes: Vec<&'static str>,
    pub age: NumberBounds,
    pub types: Vec<&'static str>,
    pub first_impression: ChoiceQuestion,
    pub keying: ScenarioKeying,
    pub scored: bool,
    /// Rating widget bounds; absent in unscored variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<NumberBounds>,
}

impl FormDefinition {
    pub fn for_variant(variant: &SurveyVariant) -> Self {
        Self {
            title: FORM_TITLE,
            sexes: Sex::ALL.iter().map(|s| s.label()).collect(),
            age: NumberBounds {
                min: MIN_AGE,
                max: MAX_AGE,
                default: DEFAULT_AGE,
            },
            types: Mbti::ALL.iter().map(|t| t.as_str()).collect(),
            first_impression: ChoiceQuestion {
                prompt: FIRST_IMPRESSION_PROMPT,
                choices: FirstImpressionStyle::ALL.iter().map(|s| s.label()).collect(),
            },
            keying: variant.keying,
            scored: variant.scored,
            score: variant.scored.then_some(NumberBounds {
                min: MIN_SCORE,
                max: MAX_SCORE,
                default: MIN_SCORE,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Collected answers
// ---------------------------------------------------------------------------

fn default_age() -> i64 {
    i64::from(DEFAULT_AGE)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStepAnswer {
    pub choice: String,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Raw answers as posted by the form, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyAnswers {
    pub sex: Sex,
    /// Clamped, not rejected, when out of range.
    #[serde(default = "default_age")]
    pub age: i64,
    pub mbti: Mbti,
    pub style: FirstImpressionStyle,
    pub steps: Vec<RawStepAnswer>,
}

impl SurveyAnswers {
    /// Scenario these answers were given against.
    pub fn scenario(&self, keying: ScenarioKeying) -> &'static Scenario {
        match keying {
            ScenarioKeying::PersonalityType => scenario_for_type(self.mbti),
            ScenarioKeying::Style => scenario_for_style(self.style),
        }
    }

    /// Category written next to the type column.
    pub fn category(&self, keying: ScenarioKeying) -> &'static str {
        match keying {
            ScenarioKeying::PersonalityType => self.mbti.as_str(),
            ScenarioKeying::Style => self.style.label(),
        }
    }

    /// Validate against the scenario and build the record.
    ///
    /// Each step must carry exactly one of its offered responses, in step
    /// order, plus a rating when the variant is scored. Ratings sent to an
    /// unscored variant are dropped.
    pub fn into_record(
        self,
        session_id: SessionId,
        variant: &SurveyVariant,
        submitted_at: String,
    ) -> Result<SubmissionRecord, CoreError> {
        let scenario = self.scenario(variant.keying);

        if self.steps.len() != scenario.steps.len() {
            return Err(CoreError::Validation(format!(
                "Expected {} scenario answers, got {}",
                scenario.steps.len(),
                self.steps.len()
            )));
        }

        let mut answers = Vec::with_capacity(self.steps.len());
        for (idx, (step, raw)) in scenario.steps.iter().zip(&self.steps).enumerate() {
            if !step.offers(&raw.choice) {
                return Err(CoreError::Validation(format!(
                    "Step {}: '{}' is not one of the offered responses",
                    idx + 1,
                    raw.choice
                )));
            }

            let score = if variant.scored {
                let raw_score = raw.score.ok_or_else(|| {
                    CoreError::Validation(format!("Step {}: a rating is required", idx + 1))
                })?;
                Some(clamp_score(raw_score))
            } else {
                None
            };

            answers.push(StepAnswer {
                choice: raw.choice.clone(),
                score,
            });
        }

        Ok(SubmissionRecord {
            session_id,
            sex: self.sex,
            age: clamp_age(self.age),
            mbti: self.mbti,
            category: self.category(variant.keying).to_string(),
            style: self.style,
            answers,
            submitted_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn unscored() -> SurveyVariant {
        SurveyVariant::default()
    }

    fn scored_by_style() -> SurveyVariant {
        SurveyVariant {
            keying: ScenarioKeying::Style,
            scored: true,
            ..SurveyVariant::default()
        }
    }

    fn intj_answers() -> SurveyAnswers {
        serde_json::from_value(json!({
            "sex": "남성",
            "age": 25,
            "mbti": "INTJ",
            "style": "차갑고 이성적",
            "steps": [
                { "choice": "차분하게 천천히 말을 건다" },
                { "choice": "혼자서 하는 조용한 취미를 말한다" },
                { "choice": "좀 더 시간을 갖고 생각해보고 싶다고 말한다" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn definition_lists_every_option() {
        let form = FormDefinition::for_variant(&unscored());
        assert_eq!(form.sexes, vec!["남성", "여성"]);
        assert_eq!(form.types.len(), 16);
        assert_eq!(form.types[0], "INFP");
        assert_eq!(form.first_impression.choices.len(), 3);
        assert_eq!(form.age, NumberBounds { min: 10, max: 100, default: 20 });
        assert!(form.score.is_none());
    }

    #[test]
    fn scored_definition_carries_score_bounds() {
        let form = FormDefinition::for_variant(&scored_by_style());
        assert_eq!(form.score.map(|b| (b.min, b.max)), Some((0, 10)));
        assert_eq!(form.keying, ScenarioKeying::Style);
    }

    #[test]
    fn intj_answers_build_the_expected_row() {
        let record = intj_answers()
            .into_record(SessionId::from("u-1"), &unscored(), "2025-01-01 09:00:00".into())
            .unwrap();

        assert_eq!(
            record.to_row(),
            vec![
                json!("u-1"),
                json!("남성"),
                json!(25),
                json!("INTJ"),
                json!("INTJ"),
                json!("차갑고 이성적"),
                json!("차분하게 천천히 말을 건다"),
                json!("혼자서 하는 조용한 취미를 말한다"),
                json!("좀 더 시간을 갖고 생각해보고 싶다고 말한다"),
                json!("2025-01-01 09:00:00"),
            ]
        );
    }

    #[test]
    fn out_of_range_age_is_clamped() {
        let mut answers = intj_answers();
        answers.age = 300;
        let record = answers
            .clone()
            .into_record(SessionId::from("u-1"), &unscored(), String::new())
            .unwrap();
        assert_eq!(record.age.get(), 100);

        answers.age = 3;
        let record = answers
            .into_record(SessionId::from("u-1"), &unscored(), String::new())
            .unwrap();
        assert_eq!(record.age.get(), 10);
    }

    #[test]
    fn missing_age_defaults_to_twenty() {
        let answers: SurveyAnswers = serde_json::from_value(json!({
            "sex": "여성",
            "mbti": "ENFP",
            "style": "밝고 활발",
            "steps": []
        }))
        .unwrap();
        assert_eq!(answers.age, 20);
    }

    #[test]
    fn wrong_step_count_is_rejected() {
        let mut answers = intj_answers();
        answers.steps.pop();
        assert_matches!(
            answers.into_record(SessionId::from("u-1"), &unscored(), String::new()),
            Err(CoreError::Validation(msg)) if msg.contains("Expected 3")
        );
    }

    #[test]
    fn choice_not_offered_is_rejected() {
        let mut answers = intj_answers();
        answers.steps[1].choice = "아무 말도 하지 않는다".into();
        assert_matches!(
            answers.into_record(SessionId::from("u-1"), &unscored(), String::new()),
            Err(CoreError::Validation(msg)) if msg.starts_with("Step 2")
        );
    }

    #[test]
    fn style_keyed_category_is_the_style_label() {
        let answers: SurveyAnswers = serde_json::from_value(json!({
            "sex": "여성",
            "age": 31,
            "mbti": "ESFJ",
            "style": "차분하고 안정적",
            "steps": [
                { "choice": "고개를 끄덕이며 끝까지 들어준다", "score": 8 },
                { "choice": "쑥스러워하며 웃어넘긴다", "score": 42 }
            ]
        }))
        .unwrap();

        let record = answers
            .into_record(SessionId::from("u-2"), &scored_by_style(), "t".into())
            .unwrap();

        assert_eq!(record.category, "차분하고 안정적");
        assert_eq!(record.answers[0].score.map(|s| s.get()), Some(8));
        assert_eq!(record.answers[1].score.map(|s| s.get()), Some(10));
    }

    #[test]
    fn scored_variant_requires_a_rating() {
        let answers: SurveyAnswers = serde_json::from_value(json!({
            "sex": "남성",
            "mbti": "ISTP",
            "style": "밝고 활발",
            "steps": [
                { "choice": "텐션을 유지하며 재밌는 이야기를 이어간다", "score": 5 },
                { "choice": "원래 이렇다며 솔직하게 웃는다" }
            ]
        }))
        .unwrap();

        assert_matches!(
            answers.into_record(SessionId::from("u-3"), &scored_by_style(), String::new()),
            Err(CoreError::Validation(msg)) if msg == "Step 2: a rating is required"
        );
    }

    #[test]
    fn unscored_variant_drops_ratings() {
        let mut answers = intj_answers();
        answers.steps[0].score = Some(7);
        let record = answers
            .into_record(SessionId::from("u-1"), &unscored(), String::new())
            .unwrap();
        assert!(record.answers.iter().all(|a| a.score.is_none()));
    }
}
