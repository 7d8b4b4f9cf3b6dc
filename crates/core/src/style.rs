//! First-impression style: the opening step shared by every variant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// NPC prompt shown before the style choice.
pub const FIRST_IMPRESSION_PROMPT: &str = "첫인상은 어떻게 보여야 좋을까요?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirstImpressionStyle {
    #[serde(rename = "밝고 활발")]
    Bright,
    #[serde(rename = "차갑고 이성적")]
    Rational,
    #[serde(rename = "차분하고 안정적")]
    Calm,
}

impl FirstImpressionStyle {
    pub const ALL: [FirstImpressionStyle; 3] = [
        FirstImpressionStyle::Bright,
        FirstImpressionStyle::Rational,
        FirstImpressionStyle::Calm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FirstImpressionStyle::Bright => "밝고 활발",
            FirstImpressionStyle::Rational => "차갑고 이성적",
            FirstImpressionStyle::Calm => "차분하고 안정적",
        }
    }
}

impl std::fmt::Display for FirstImpressionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FirstImpressionStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        FirstImpressionStyle::ALL
            .into_iter()
            .find(|style| style.label() == label)
            .ok_or_else(|| CoreError::Validation(format!("Unknown first-impression style '{s}'")))
    }
}
