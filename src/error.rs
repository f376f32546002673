//! Error taxonomy shared by the orchestrators and every presentation surface.

use std::path::PathBuf;

use thiserror::Error;

/// Credential or settings problem. Detected once, before any model call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingCredential,
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read env file {}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// The completion call itself failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to the completion service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("prompt was blocked by the completion service ({0})")]
    Blocked(String),
    #[error("completion service returned no text{}", finish_suffix(.finish_reason))]
    EmptyCompletion { finish_reason: Option<String> },
}

/// The completion succeeded but its text is not the structure we asked for.
#[derive(Debug, Error)]
#[error("could not parse the model output: {source}")]
pub struct ExtractionError {
    /// Text left after fence unwrapping, exactly as handed to the parser.
    pub working_text: String,
    #[source]
    pub source: serde_json::Error,
}

fn finish_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" (finish reason: {r})"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("input text is empty")]
    EmptyInput,
}

impl AppError {
    /// Short machine-readable name, used in web error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration",
            AppError::Service(_) => "service",
            AppError::Extraction(_) => "extraction",
            AppError::EmptyInput => "empty_input",
        }
    }

    pub fn working_text(&self) -> Option<&str> {
        match self {
            AppError::Extraction(e) => Some(&e.working_text),
            _ => None,
        }
    }
}
