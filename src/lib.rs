//! Conversation helper backed by a hosted LLM: open chat, tone checks for a
//! drafted message, and praise/empathy replies to a received one.

pub mod analysis;
pub mod assistant;
pub mod chat;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod render;
pub mod session;
pub mod web_server;

pub use analysis::{
    Assessment, EmpathyAssessment, EmpathyLevel, PraiseEmpathyResult, ToneAnalysisResult,
};
pub use assistant::Assistant;
pub use client::{CompletionClient, GeminiClient, GenerationParams};
pub use config::Settings;
pub use error::{AppError, ConfigError, ExtractionError, ServiceError};
pub use extract::{extract_praise_empathy, extract_tone_analysis, unwrap_fence};
pub use prompt::{build_prompt, TaskMode};
pub use session::{ConversationTurn, Role, SessionState};
