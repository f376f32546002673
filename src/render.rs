//! Terminal rendering of results and errors.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};

use crate::analysis::{PraiseEmpathyResult, ToneAnalysisResult};
use crate::config::SETUP_INSTRUCTIONS;
use crate::error::AppError;

pub fn tone_table(result: &ToneAnalysisResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["분석 항목", "평가", "평가 이유"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

    table.add_row(vec![
        "감정 톤",
        result.emotional_tone.rating.as_str(),
        result.emotional_tone.reason.as_str(),
    ]);
    table.add_row(vec![
        "공감 가능성",
        result.empathy_possibility.rating.label(),
        result.empathy_possibility.reason.as_str(),
    ]);
    table.add_row(vec![
        "어투",
        result.tone.rating.as_str(),
        result.tone.reason.as_str(),
    ]);
    table
}

pub fn tone_report(result: &ToneAnalysisResult) -> String {
    format!("{}\n✅ {}", tone_table(result), result.summary)
}

pub fn praise_report(result: &PraiseEmpathyResult) -> String {
    format!("💖 {}\n🌿 {}", result.praise, result.empathy)
}

/// User-visible text for a failed request.
pub fn error_message(err: &AppError) -> String {
    match err {
        AppError::Configuration(_) => format!("🚫 {err}\n\n{SETUP_INSTRUCTIONS}"),
        AppError::Service(e) => format!("오류가 발생했습니다: {e}"),
        AppError::Extraction(e) => format!(
            "결과 처리 중 오류가 발생했습니다. 다시 시도해주세요. ({})\n--- 모델 응답 ---\n{}",
            e.source, e.working_text
        ),
        AppError::EmptyInput => "입력된 문장이 없습니다. 내용을 입력해주세요.".to_string(),
    }
}

/// Like [`error_message`], for a session that already showed the setup
/// instructions once: configuration errors shrink to a single line.
pub fn inline_error_message(err: &AppError) -> String {
    match err {
        AppError::Configuration(_) => format!("🚫 {err}"),
        _ => error_message(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Assessment, EmpathyAssessment, EmpathyLevel};
    use crate::error::{ConfigError, ExtractionError};

    fn sample() -> ToneAnalysisResult {
        ToneAnalysisResult {
            emotional_tone: Assessment {
                rating: "따뜻함".to_string(),
                reason: "다정한 표현".to_string(),
            },
            empathy_possibility: EmpathyAssessment {
                rating: EmpathyLevel::High,
                reason: "배려가 느껴짐".to_string(),
            },
            tone: Assessment {
                rating: "부드러움".to_string(),
                reason: "이모지 사용".to_string(),
            },
            summary: "긍정적인 메시지".to_string(),
        }
    }

    #[test]
    fn test_tone_report_has_three_rows_and_summary() {
        let report = tone_report(&sample());
        for cell in ["감정 톤", "공감 가능성", "어투", "따뜻함", "높음", "이모지 사용"] {
            assert!(report.contains(cell), "missing {cell}");
        }
        assert!(report.ends_with("✅ 긍정적인 메시지"));
    }

    #[test]
    fn test_praise_report() {
        let report = praise_report(&PraiseEmpathyResult {
            praise: "정말 잘했어요!".to_string(),
            empathy: "힘들었겠다".to_string(),
        });
        assert_eq!(report, "💖 정말 잘했어요!\n🌿 힘들었겠다");
    }

    #[test]
    fn test_error_messages() {
        let msg = error_message(&AppError::Configuration(ConfigError::MissingCredential));
        assert!(msg.contains("GEMINI_API_KEY=YOUR_GEMINI_API_KEY"));

        let source = serde_json::from_str::<serde_json::Value>("Sure!").unwrap_err();
        let msg = error_message(&AppError::Extraction(ExtractionError {
            working_text: "Sure!".to_string(),
            source,
        }));
        assert!(msg.ends_with("--- 모델 응답 ---\nSure!"));
    }

    #[test]
    fn test_inline_error_message_skips_setup_block() {
        let err = AppError::Configuration(ConfigError::MissingCredential);
        assert_eq!(inline_error_message(&err), "🚫 GEMINI_API_KEY is not set");

        let err = AppError::EmptyInput;
        assert_eq!(inline_error_message(&err), error_message(&err));
    }
}
