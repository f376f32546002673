//! Runtime settings: credential, model and transport options.
//!
//! Values come from the process environment (after `.env` has been loaded by
//! `main`) or from an explicit dotenv file. Both paths funnel into
//! [`Settings::from_lookup`], which keeps the parsing testable without
//! touching global state.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::constants::{
    API_BASE_VAR, API_KEY_VAR, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, MODEL_VAR,
    TIMEOUT_VAR,
};
use crate::error::ConfigError;

/// Shown whenever the credential is missing. Mirrors the dotenv line to add.
pub const SETUP_INSTRUCTIONS: &str = "\
🔐 API 키 설정이 필요합니다!

이 앱은 Google Gemini API를 사용하며, 실행을 위해 API 키 설정이 필요합니다.
환경 변수로 지정하거나 실행 디렉터리의 .env 파일에 아래 형식으로 등록하세요:

    GEMINI_API_KEY=YOUR_GEMINI_API_KEY

API 키는 절대로 소스 코드에 직접 포함하지 마세요!";

#[derive(Clone)]
pub struct Settings {
    api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads a dotenv file and lets its entries override the process env.
    /// The process environment itself is left untouched.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let env_file_err = |source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };
        let mut overrides = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_err)? {
            let (key, value) = item.map_err(env_file_err)?;
            overrides.insert(key, value);
        }
        debug!(path = %path.display(), entries = overrides.len(), "Loaded env file");
        Self::from_lookup(|key| overrides.get(key).cloned().or_else(|| std::env::var(key).ok()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_blank(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: TIMEOUT_VAR,
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: non_blank(API_KEY_VAR).map(|k| k.trim().to_string()),
            model: non_blank(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_blank(API_BASE_VAR)
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The API credential, or the error every model-dependent feature reports.
    pub fn credential(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingCredential)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}
