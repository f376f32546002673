//! The three user-facing flows: chat, tone analysis and praise generation.
//!
//! Each flow is one prompt, one completion call and (for the structured
//! flows) one extraction. Nothing is retried; the user retries by asking
//! again.

use tracing::{info, instrument, warn};

use crate::analysis::{PraiseEmpathyResult, ToneAnalysisResult};
use crate::client::CompletionClient;
use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::extract::{extract, Structured};
use crate::prompt::{build_prompt, TaskMode};
use crate::session::{Role, SessionState};

pub struct Assistant<C> {
    client: Option<C>,
}

impl<C: CompletionClient> Assistant<C> {
    /// Builds the client only when a credential is configured. Without one the
    /// assistant still comes up, but every flow reports
    /// [`ConfigError::MissingCredential`] and no call is made. Any other
    /// configuration problem is returned to the caller.
    pub fn from_settings<F>(settings: &Settings, make_client: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Settings) -> Result<C, ConfigError>,
    {
        match settings.credential() {
            Ok(_) => Ok(Self {
                client: Some(make_client(settings)?),
            }),
            Err(e) => {
                warn!(error = %e, "Model features disabled until a credential is configured");
                Ok(Self { client: None })
            }
        }
    }

    pub fn with_client(client: C) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn ready(&self, text: &str) -> Result<&C, AppError> {
        let client = self
            .client
            .as_ref()
            .ok_or(AppError::Configuration(ConfigError::MissingCredential))?;
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }
        Ok(client)
    }

    /// Sends `text` as a chat turn. The user turn is recorded before the call;
    /// the assistant turn only when the call succeeds.
    #[instrument(skip(self, session, text), fields(history_len = session.len()))]
    pub async fn send_chat(
        &self,
        session: &mut SessionState,
        text: &str,
    ) -> Result<String, AppError> {
        let client = self.ready(text)?;
        session.push(Role::User, text);

        let prompt = build_prompt(TaskMode::Chat, text);
        let reply = client
            .complete(&prompt, TaskMode::Chat.generation_params().as_ref())
            .await?;

        session.push(Role::Assistant, reply.clone());
        info!(reply_len = reply.len(), "Chat turn completed");
        Ok(reply)
    }

    #[instrument(skip(self, text))]
    pub async fn run_tone_analysis(&self, text: &str) -> Result<ToneAnalysisResult, AppError> {
        self.run_structured(TaskMode::Tone, text).await
    }

    #[instrument(skip(self, text))]
    pub async fn run_praise_generation(
        &self,
        text: &str,
    ) -> Result<PraiseEmpathyResult, AppError> {
        self.run_structured(TaskMode::Praise, text).await
    }

    async fn run_structured<T: Structured>(
        &self,
        mode: TaskMode,
        text: &str,
    ) -> Result<T, AppError> {
        let client = self.ready(text)?;
        let prompt = build_prompt(mode, text);
        let raw = client
            .complete(&prompt, mode.generation_params().as_ref())
            .await?;
        let record = extract::<T>(&raw)?;
        info!(%mode, "Structured reply extracted");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GenerationParams;
    use crate::error::ServiceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Replays canned completions and records what it was asked.
    #[derive(Clone, Default)]
    struct ScriptedClient {
        replies: Arc<Mutex<Vec<Result<String, ServiceError>>>>,
        prompts: Arc<Mutex<Vec<(String, Option<GenerationParams>)>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedClient {
        fn replying(replies: Vec<Result<String, ServiceError>>) -> Self {
            let client = Self::default();
            *client.replies.lock().unwrap() = replies.into_iter().rev().collect();
            client
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            prompt: &str,
            params: Option<&GenerationParams>,
        ) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), params.copied()));
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ServiceError::EmptyCompletion { finish_reason: None }))
        }
    }

    fn configured() -> Settings {
        Settings::from_lookup(|_| None).unwrap().with_api_key("test-key")
    }

    #[tokio::test]
    async fn test_chat_appends_both_turns() {
        let client = ScriptedClient::replying(vec![Ok("반가워요!".to_string())]);
        let assistant = Assistant::with_client(client.clone());
        let mut session = SessionState::new();

        let reply = assistant.send_chat(&mut session, "안녕").await.unwrap();

        assert_eq!(reply, "반가워요!");
        assert_eq!(session.len(), 2);
        assert_eq!(session.history()[0].role, Role::User);
        assert_eq!(session.history()[1].content, "반가워요!");
        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts[0], ("안녕".to_string(), None));
    }

    #[tokio::test]
    async fn test_failed_chat_does_not_append_reply() {
        let client = ScriptedClient::replying(vec![Err(ServiceError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        })]);
        let assistant = Assistant::with_client(client);
        let mut session = SessionState::new();

        let err = assistant.send_chat(&mut session, "안녕").await.unwrap_err();

        assert!(matches!(err, AppError::Service(ServiceError::Api { status: 429, .. })));
        assert_eq!(session.len(), 1);
        assert_eq!(session.history()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_tone_analysis_uses_structured_params() {
        let raw = "```json\n{\"emotional_tone\":{\"rating\":\"차가움\",\"reason\":\"추궁하는 말투\"},\"empathy_possibility\":{\"rating\":\"낮음\",\"reason\":\"비난으로 들림\"},\"tone\":{\"rating\":\"직설적\",\"reason\":\"짧은 질문\"},\"summary\":\"상대가 방어적으로 느낄 수 있음\"}\n```";
        let client = ScriptedClient::replying(vec![Ok(raw.to_string())]);
        let assistant = Assistant::with_client(client.clone());

        let result = assistant.run_tone_analysis("너 왜 그랬어?").await.unwrap();

        assert_eq!(result.tone.rating, "직설적");
        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].0.contains("\"너 왜 그랬어?\""));
        assert_eq!(prompts[0].1, Some(GenerationParams::STRUCTURED));
    }

    #[tokio::test]
    async fn test_praise_generation_extraction_failure() {
        let client = ScriptedClient::replying(vec![Ok("Sure! {\"praise\": \"good\"}".to_string())]);
        let assistant = Assistant::with_client(client);

        let err = assistant
            .run_praise_generation("오늘 발표 준비하느라 밤을 새웠어요.")
            .await
            .unwrap_err();

        assert_eq!(err.working_text(), Some("Sure! {\"praise\": \"good\"}"));
    }

    #[tokio::test]
    async fn test_missing_credential_blocks_every_flow() {
        let client = ScriptedClient::default();
        let settings = Settings::from_lookup(|_| None).unwrap();
        let assistant = Assistant::from_settings(&settings, |_| Ok(client.clone())).unwrap();
        let mut session = SessionState::new();

        assert!(!assistant.is_configured());
        assert!(matches!(
            assistant.send_chat(&mut session, "안녕").await,
            Err(AppError::Configuration(ConfigError::MissingCredential))
        ));
        assert!(matches!(
            assistant.run_tone_analysis("안녕").await,
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            assistant.run_praise_generation("안녕").await,
            Err(AppError::Configuration(_))
        ));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_calling() {
        let client = ScriptedClient::default();
        let assistant = Assistant::from_settings(&configured(), |_| Ok(client.clone())).unwrap();
        let mut session = SessionState::new();

        assert!(matches!(
            assistant.send_chat(&mut session, "  \n").await,
            Err(AppError::EmptyInput)
        ));
        assert!(matches!(
            assistant.run_tone_analysis("").await,
            Err(AppError::EmptyInput)
        ));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(session.is_empty());
    }
}
