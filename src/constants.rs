// Defaults for configuration, overridable from the environment or a .env file.

use std::env;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";
pub const TIMEOUT_VAR: &str = "FEELBOT_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_PORT: u16 = 9900;

// Example inputs the tone and praise flows fall back to when none is given.
pub const TONE_EXAMPLE: &str = "조금 서운했지만, 다음엔 더 잘 얘기해보자 😊";
pub const PRAISE_EXAMPLE: &str = "오늘 진짜 힘들었어.";

// Use lazy_static so the log filter default is read once.
lazy_static::lazy_static! {
    pub static ref LOG_FILTER: String = env::var("RUST_LOG").unwrap_or_else(|_| "feelbot=info".to_string());
}
