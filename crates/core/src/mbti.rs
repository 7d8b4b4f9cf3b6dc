//! The 16 MBTI personality types and their temperament grouping.
//!
//! Types are only ever used as an enumerated input and as the lookup key for
//! the scenario table; no psychometric logic lives here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mbti {
    Infp,
    Infj,
    Intp,
    Intj,
    Isfp,
    Isfj,
    Istp,
    Istj,
    Enfp,
    Enfj,
    Entp,
    Entj,
    Esfp,
    Esfj,
    Estp,
    Estj,
}

/// Keirsey-style grouping used to pick a scenario for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperament {
    /// NT
    Analyst,
    /// NF
    Diplomat,
    /// SJ
    Sentinel,
    /// SP
    Explorer,
}

impl Mbti {
    /// Select-box order of the survey form.
    pub const ALL: [Mbti; 16] = [
        Mbti::Infp,
        Mbti::Infj,
        Mbti::Intp,
        Mbti::Intj,
        Mbti::Isfp,
        Mbti::Isfj,
        Mbti::Istp,
        Mbti::Istj,
        Mbti::Enfp,
        Mbti::Enfj,
        Mbti::Entp,
        Mbti::Entj,
        Mbti::Esfp,
        Mbti::Esfj,
        Mbti::Estp,
        Mbti::Estj,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mbti::Infp => "INFP",
            Mbti::Infj => "INFJ",
            Mbti::Intp => "INTP",
            Mbti::Intj => "INTJ",
            Mbti::Isfp => "ISFP",
            Mbti::Isfj => "ISFJ",
            Mbti::Istp => "ISTP",
            Mbti::Istj => "ISTJ",
            Mbti::Enfp => "ENFP",
            Mbti::Enfj => "ENFJ",
            Mbti::Entp => "ENTP",
            Mbti::Entj => "ENTJ",
            Mbti::Esfp => "ESFP",
            Mbti::Esfj => "ESFJ",
            Mbti::Estp => "ESTP",
            Mbti::Estj => "ESTJ",
        }
    }

    /// Temperament group: N types split on T/F, S types split on J/P.
    pub fn temperament(self) -> Temperament {
        let code = self.as_str().as_bytes();
        match (code[1], code[2], code[3]) {
            (b'N', b'T', _) => Temperament::Analyst,
            (b'N', _, _) => Temperament::Diplomat,
            (_, _, b'J') => Temperament::Sentinel,
            _ => Temperament::Explorer,
        }
    }
}

impl std::fmt::Display for Mbti {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mbti {
    type Err = CoreError;

    /// Parse a four-letter code, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Mbti::ALL
            .into_iter()
            .find(|t| t.as_str() == code)
            .ok_or_else(|| CoreError::Validation(format!("Unknown MBTI type '{s}'")))
    }
}
