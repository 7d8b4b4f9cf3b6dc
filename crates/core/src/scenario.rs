//! Static dialogue scenarios keyed by temperament group or first-impression style.
//!
//! Every scenario is a fixed, ordered list of NPC steps. Lookups are pure:
//! no randomness, no state.

use serde::Serialize;

use crate::error::CoreError;
use crate::mbti::{Mbti, Temperament};
use crate::style::FirstImpressionStyle;
use crate::variant::ScenarioKeying;

/// One scripted NPC prompt and the responses a participant may pick.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioStep {
    pub npc: &'static str,
    pub choices: &'static [&'static str],
}

impl ScenarioStep {
    pub fn offers(&self, choice: &str) -> bool {
        self.choices.contains(&choice)
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Stable name of the script (not the category written to the sheet).
    pub key: &'static str,
    pub steps: &'static [ScenarioStep],
}

// ---------------------------------------------------------------------------
// Personality-type scenarios (by temperament)
// ---------------------------------------------------------------------------

pub static ANALYST_SCENARIO: Scenario = Scenario {
    key: "analyst",
    steps: &[
        ScenarioStep {
            npc: "소개팅 자리에 먼저 도착한 상대가 조용히 책을 읽고 있어요. 어떻게 다가갈까요?",
            choices: &[
                "차분하게 천천히 말을 건다",
                "읽고 있는 책에 대해 바로 질문한다",
                "상대가 고개를 들 때까지 기다린다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '쉬는 날엔 보통 뭐 하세요?'라고 물어요.",
            choices: &[
                "혼자서 하는 조용한 취미를 말한다",
                "요즘 파고드는 공부나 프로젝트 이야기를 한다",
                "친구들과 어울려 노는 이야기를 한다",
            ],
        },
        ScenarioStep {
            npc: "헤어질 무렵 상대가 '우리 다음에 또 볼까요?'라고 물어요.",
            choices: &[
                "바로 다음 약속 날짜를 정한다",
                "좀 더 시간을 갖고 생각해보고 싶다고 말한다",
                "연락처만 주고받고 웃으며 헤어진다",
            ],
        },
    ],
};

pub static DIPLOMAT_SCENARIO: Scenario = Scenario {
    key: "diplomat",
    steps: &[
        ScenarioStep {
            npc: "상대가 오늘 하루 힘들었다며 살짝 지친 얼굴로 자리에 앉아요.",
            choices: &[
                "무슨 일이 있었는지 다정하게 물어본다",
                "분위기를 풀어줄 가벼운 농담을 건넨다",
                "따뜻한 음료부터 주문해준다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '사람을 볼 때 제일 중요하게 생각하는 게 뭐예요?'라고 물어요.",
            choices: &[
                "서로의 가치관이 잘 맞는지라고 말한다",
                "함께 있을 때 편안한지라고 말한다",
                "대화가 끊기지 않고 잘 통하는지라고 말한다",
            ],
        },
        ScenarioStep {
            npc: "카페를 나서는데 상대가 노을이 예쁘다며 잠깐 걷자고 해요.",
            choices: &[
                "좋다고 하며 천천히 함께 걷는다",
                "노을 사진을 찍어 상대에게 보내준다",
                "다음엔 노을 명소에 같이 가자고 약속한다",
            ],
        },
    ],
};

pub static SENTINEL_SCENARIO: Scenario = Scenario {
    key: "sentinel",
    steps: &[
        ScenarioStep {
            npc: "약속 시간 10분 전, 상대에게서 조금 늦을 것 같다는 연락이 와요.",
            choices: &[
                "괜찮다고 천천히 오라고 답한다",
                "근처 카페 위치를 보내고 기다린다",
                "도착 예정 시간을 물어본다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '계획 세우는 거 좋아하세요?'라고 물어요.",
            choices: &[
                "여행 일정표까지 짜는 편이라고 말한다",
                "큰 틀만 정하고 나머지는 맞춘다고 말한다",
                "그때그때 즉흥적인 편이라고 말한다",
            ],
        },
        ScenarioStep {
            npc: "식사가 끝나고 계산할 시간이에요.",
            choices: &[
                "이번엔 내가 내고 다음에 사달라고 한다",
                "깔끔하게 반반 나누자고 한다",
                "상대의 의견을 먼저 물어본다",
            ],
        },
    ],
};

pub static EXPLORER_SCENARIO: Scenario = Scenario {
    key: "explorer",
    steps: &[
        ScenarioStep {
            npc: "상대가 '근처에 새로 생긴 방탈출 카페가 있던데, 가볼래요?'라고 해요.",
            choices: &[
                "재밌겠다며 바로 따라나선다",
                "밥부터 먹고 가자고 한다",
                "다음 데이트 코스로 남겨두자고 한다",
            ],
        },
        ScenarioStep {
            npc: "방탈출 마지막 자물쇠에서 막혔어요.",
            choices: &[
                "직감을 믿고 빠르게 숫자를 눌러본다",
                "상대와 힌트를 하나씩 다시 정리한다",
                "힌트 찬스를 써서 깔끔하게 탈출한다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '오늘 진짜 재밌었어요!'라며 웃어요.",
            choices: &[
                "다음 주말에 또 놀자고 바로 제안한다",
                "오늘 찍은 사진을 보내주겠다고 한다",
                "나도 즐거웠다고 솔직하게 말한다",
            ],
        },
    ],
};

/// Fallback for type keys that are not one of the 16 codes.
pub static DEFAULT_SCENARIO: Scenario = Scenario {
    key: "default",
    steps: &[
        ScenarioStep {
            npc: "처음 만난 상대가 수줍게 인사를 건네요.",
            choices: &[
                "반갑게 웃으며 인사한다",
                "가볍게 날씨 이야기로 시작한다",
                "자기소개부터 차근차근 한다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '평소에 어떤 걸 좋아하세요?'라고 물어요.",
            choices: &["좋아하는 음식 이야기를 한다", "좋아하는 취미 이야기를 한다"],
        },
        ScenarioStep {
            npc: "헤어질 시간이 다가와요.",
            choices: &["다음 약속을 잡는다", "오늘 즐거웠다고 인사한다"],
        },
    ],
};

// ---------------------------------------------------------------------------
// Style scenarios
// ---------------------------------------------------------------------------

pub static BRIGHT_STYLE_SCENARIO: Scenario = Scenario {
    key: "style_bright",
    steps: &[
        ScenarioStep {
            npc: "활발한 인사에 상대가 환하게 웃으며 '에너지가 좋으시네요!'라고 해요.",
            choices: &[
                "텐션을 유지하며 재밌는 이야기를 이어간다",
                "상대의 이야기도 궁금하다며 질문한다",
                "살짝 톤을 낮춰 차분하게 대화한다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '평소에도 이렇게 밝으세요?'라고 물어요.",
            choices: &[
                "원래 이렇다며 솔직하게 웃는다",
                "좋은 사람 앞이라 더 밝아진다고 말한다",
                "사실은 조용한 면도 있다고 털어놓는다",
            ],
        },
    ],
};

pub static RATIONAL_STYLE_SCENARIO: Scenario = Scenario {
    key: "style_rational",
    steps: &[
        ScenarioStep {
            npc: "차분한 표정에 상대가 조금 긴장한 듯 말을 아껴요.",
            choices: &[
                "먼저 가벼운 질문으로 분위기를 푼다",
                "상대가 편해질 때까지 기다린다",
                "솔직하게 긴장되는지 물어본다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '생각보다 말씀을 논리적으로 하시네요'라고 해요.",
            choices: &[
                "칭찬으로 받아들이고 고맙다고 한다",
                "감성적인 면도 있다고 덧붙인다",
                "상대의 생각을 되물어 대화를 이어간다",
            ],
        },
    ],
};

pub static CALM_STYLE_SCENARIO: Scenario = Scenario {
    key: "style_calm",
    steps: &[
        ScenarioStep {
            npc: "편안한 분위기 덕분에 상대가 자기 이야기를 술술 털어놓아요.",
            choices: &[
                "고개를 끄덕이며 끝까지 들어준다",
                "비슷한 경험을 나누며 공감한다",
                "궁금한 점을 하나씩 물어본다",
            ],
        },
        ScenarioStep {
            npc: "상대가 '같이 있으니까 마음이 편해요'라고 말해요.",
            choices: &[
                "나도 그렇다고 따뜻하게 답한다",
                "다음에도 편하게 보자고 한다",
                "쑥스러워하며 웃어넘긴다",
            ],
        },
    ],
};

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn scenario_for_temperament(group: Temperament) -> &'static Scenario {
    match group {
        Temperament::Analyst => &ANALYST_SCENARIO,
        Temperament::Diplomat => &DIPLOMAT_SCENARIO,
        Temperament::Sentinel => &SENTINEL_SCENARIO,
        Temperament::Explorer => &EXPLORER_SCENARIO,
    }
}

pub fn scenario_for_type(mbti: Mbti) -> &'static Scenario {
    scenario_for_temperament(mbti.temperament())
}

pub fn scenario_for_style(style: FirstImpressionStyle) -> &'static Scenario {
    match style {
        FirstImpressionStyle::Bright => &BRIGHT_STYLE_SCENARIO,
        FirstImpressionStyle::Rational => &RATIONAL_STYLE_SCENARIO,
        FirstImpressionStyle::Calm => &CALM_STYLE_SCENARIO,
    }
}

/// Resolve a raw category key under the given keying.
///
/// Unrecognized type keys fall back to [`DEFAULT_SCENARIO`]; style keying has
/// no default, so an unknown label is `NotFound`.
pub fn scenario_for_key(key: &str, keying: ScenarioKeying) -> Result<&'static Scenario, CoreError> {
    match keying {
        ScenarioKeying::PersonalityType => Ok(key
            .parse::<Mbti>()
            .map(scenario_for_type)
            .unwrap_or(&DEFAULT_SCENARIO)),
        ScenarioKeying::Style => key
            .parse::<FirstImpressionStyle>()
            .map(scenario_for_style)
            .map_err(|_| CoreError::NotFound {
                entity: "Scenario",
                key: key.to_string(),
            }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
