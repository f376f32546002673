//! Prompt builder for the three task modes.
//!
//! User text is embedded as a JSON string literal, so quotes, backslashes and
//! control characters in it cannot break out of the quoted sentence.

use std::fmt;

use crate::client::GenerationParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    Chat,
    Tone,
    Praise,
}

impl TaskMode {
    /// Sampling parameters sent with this mode. Chat uses the service defaults.
    pub fn generation_params(self) -> Option<GenerationParams> {
        match self {
            TaskMode::Chat => None,
            TaskMode::Tone | TaskMode::Praise => Some(GenerationParams::STRUCTURED),
        }
    }
}

impl fmt::Display for TaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskMode::Chat => write!(f, "chat"),
            TaskMode::Tone => write!(f, "tone"),
            TaskMode::Praise => write!(f, "praise"),
        }
    }
}

const TONE_TEMPLATE: &str = r#"다음 문장의 어투와 감정 톤을 분석해줘.

문장: {text}

분석 항목:
- 감정 톤 (예: 따뜻함, 차가움, 무관심, 걱정, 분노 등)
- 공감 가능성 (높음, 보통, 낮음 중 하나)
- 어투 (예: 공손함, 딱딱함, 부드러움, 직설적 등)

각 항목에 대해 간단한 평가 이유도 함께 적어줘.

규칙:
- 반드시 아래 형식의 JSON 객체 하나만 출력해.
- JSON 앞뒤에 설명, 인사말, 코드 블록 표시 등 다른 텍스트를 절대 붙이지 마.
- 키 이름은 그대로 사용해.

{
    "emotional_tone": {
        "rating": "분석된 감정",
        "reason": "평가 이유"
    },
    "empathy_possibility": {
        "rating": "높음/보통/낮음",
        "reason": "평가 이유"
    },
    "tone": {
        "rating": "분석된 어투",
        "reason": "평가 이유"
    },
    "summary": "전체 분석을 한 문장으로 요약"
}"#;

const PRAISE_TEMPLATE: &str = r#"상대방이 아래와 같은 말을 했을 때, 자연스럽게 이어지는 다음 두 가지 문장을 각각 만들어줘:

1. 해당 문장에 어울리는 칭찬 한 문장
2. 해당 문장에 어울리는 공감 한 문장

문장: {text}

규칙:
- 반드시 아래 형식의 JSON 객체 하나만 출력하고, 키는 "praise"와 "empathy" 두 개만 사용해.
- 일상적인 대화처럼 자연스러운 말투로, 과하거나 과장된 표현은 피해.
- 각 문장은 1~2줄 이내로 간결하게 작성해.
- JSON 외의 설명이나 부연은 절대 붙이지 마.

{
    "praise": "칭찬 메시지",
    "empathy": "공감 메시지"
}"#;

/// Builds the instruction sent to the completion service for `mode`.
///
/// The caller rejects empty text before getting here.
pub fn build_prompt(mode: TaskMode, text: &str) -> String {
    match mode {
        TaskMode::Chat => text.to_string(),
        TaskMode::Tone => TONE_TEMPLATE.replacen("{text}", &quote(text), 1),
        TaskMode::Praise => PRAISE_TEMPLATE.replacen("{text}", &quote(text), 1),
    }
}

fn quote(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
