use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use feelbot::{
    chat, constants, render, web_server, Assistant, GeminiClient, SessionState, Settings,
};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Read settings from this dotenv file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Chat with the model interactively.
    Chat,
    /// Analyse the tone of a message you are about to send.
    Tone {
        #[arg(help = "Message to analyse (defaults to a built-in example).")]
        text: Option<String>,
    },
    /// Suggest a praise line and an empathy line for a message you received.
    Praise {
        #[arg(help = "Message you received (defaults to a built-in example).")]
        text: Option<String>,
    },
    /// Serve the web UI.
    Serve {
        #[arg(long, default_value_t = constants::DEFAULT_PORT, help = "Port for the web server.")]
        port: u16,
    },
}

impl Commands {
    // Message text stays out of the logs.
    fn name(&self) -> &'static str {
        match self {
            Commands::Chat => "chat",
            Commands::Tone { .. } => "tone",
            Commands::Praise { .. } => "praise",
            Commands::Serve { .. } => "serve",
        }
    }
}

fn load_settings(env_file: Option<&PathBuf>) -> Result<Settings> {
    let settings = match env_file {
        Some(path) => Settings::from_env_file(path),
        None => {
            // Load .env file if present (for environment variables like API keys)
            dotenvy::dotenv().ok();
            Settings::from_env()
        }
    };
    settings.context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never mix with rendered results.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(constants::LOG_FILTER.as_str()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(command = cli.command.name(), "feelbot starting");

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(cli.env_file.as_ref())?;
    let assistant = Assistant::from_settings(&settings, GeminiClient::new)
        .context("Failed to initialize the Gemini client")?;

    match cli.command {
        Commands::Chat => {
            let mut session = SessionState::new();
            let stdin = std::io::stdin();
            chat::run_chat_session(&assistant, &mut session, stdin.lock(), std::io::stdout())
                .await
                .context("Chat session failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tone { text } => {
            let text = text.unwrap_or_else(|| constants::TONE_EXAMPLE.to_string());
            Ok(report(assistant.run_tone_analysis(&text).await.map(|r| render::tone_report(&r))))
        }
        Commands::Praise { text } => {
            let text = text.unwrap_or_else(|| constants::PRAISE_EXAMPLE.to_string());
            Ok(report(
                assistant
                    .run_praise_generation(&text)
                    .await
                    .map(|r| render::praise_report(&r)),
            ))
        }
        Commands::Serve { port } => {
            info!("Starting web UI on port {}...", port);
            web_server::start_web_server(port, assistant).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(result: Result<String, feelbot::AppError>) -> ExitCode {
    match result {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", render::error_message(&e));
            ExitCode::from(2)
        }
    }
}
