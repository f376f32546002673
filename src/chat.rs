// Interactive terminal chat.
// Plain lines are chat turns; slash commands reach the other two flows.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use crate::assistant::Assistant;
use crate::client::CompletionClient;
use crate::render;
use crate::session::{Role, SessionState};

const HELP: &str = "\
명령어:
  /tone <문장>    보내려는 메시지의 어투·톤 분석
  /praise <문장>  받은 메시지에 어울리는 칭찬/공감 문장 생성
  /history        지금까지의 대화 기록 보기
  /help           도움말
  /quit           종료";

enum Command<'a> {
    Chat(&'a str),
    Tone(&'a str),
    Praise(&'a str),
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Chat(line);
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name {
        "tone" => Command::Tone(arg),
        "praise" => Command::Praise(arg),
        "history" => Command::History,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(name),
    }
}

/// Runs the chat loop until `/quit` or end of input. Request failures are
/// reported inline and never end the session.
pub async fn run_chat_session<C, R, W>(
    assistant: &Assistant<C>,
    session: &mut SessionState,
    input: R,
    mut out: W,
) -> Result<()>
where
    C: CompletionClient,
    R: BufRead,
    W: Write,
{
    info!("Starting interactive chat session...");
    writeln!(out, "💬 자유롭게 대화를 시작해보세요. (/help 로 명령어 보기)")?;
    if !assistant.is_configured() {
        writeln!(out, "{}", crate::config::SETUP_INSTRUCTIONS)?;
    }

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let rendered = match parse_command(line) {
            Command::Quit => break,
            Command::Help => HELP.to_string(),
            Command::History => history_text(session),
            Command::Unknown(name) => format!("알 수 없는 명령어입니다: /{name}\n{HELP}"),
            Command::Chat(text) => match assistant.send_chat(session, text).await {
                Ok(reply) => format!("🤖 {reply}"),
                Err(e) => render::inline_error_message(&e),
            },
            Command::Tone(text) => match assistant.run_tone_analysis(text).await {
                Ok(result) => render::tone_report(&result),
                Err(e) => render::inline_error_message(&e),
            },
            Command::Praise(text) => match assistant.run_praise_generation(text).await {
                Ok(result) => render::praise_report(&result),
                Err(e) => render::inline_error_message(&e),
            },
        };
        writeln!(out, "{rendered}")?;
        out.flush()?;
    }

    info!(turns = session.len(), "Chat session finished.");
    Ok(())
}

fn history_text(session: &SessionState) -> String {
    if session.is_empty() {
        return "(아직 대화 기록이 없습니다)".to_string();
    }
    session
        .history()
        .iter()
        .map(|turn| match turn.role {
            Role::User => format!("🙂 {}", turn.content),
            Role::Assistant => format!("🤖 {}", turn.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
