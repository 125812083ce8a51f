use std::io::IsTerminal;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use chatbot_client::client::terminal::EditorLines;
use chatbot_client::client::{self, ApiClient, ChatSession, TerminalView, view::BOT_NAME};
use chatbot_client::config::{ChatArgs, ClientConfig, Cli, Command, ServeArgs, ServerConfig};
use chatbot_client::routes;
use chatbot_client::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Chat(args) => chat(&args).await,
        Command::Serve(args) => serve(&args).await,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn chat(args: &ChatArgs) -> anyhow::Result<()> {
    // stdout carries the conversation
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::try_from(args)?;
    let api = ApiClient::new(&config)?;
    tracing::info!(api_url = %config.api_url, "starting chat");

    let interactive = std::io::stdin().is_terminal();
    let view = TerminalView::new(std::io::stdout()).echo_user(!interactive);
    let mut session = ChatSession::new(api, view);
    let finished = if interactive {
        let editor = EditorLines::spawn().context("line editor unavailable")?;
        client::terminal::run(&mut session, editor).await
    } else {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        client::terminal::run(&mut session, stdin).await
    };
    finished.context("reading input failed")
}

async fn serve(args: &ServeArgs) -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let config = ServerConfig::from(args);
    let state = AppState::shared(BOT_NAME);
    if config.preload {
        state.assistant.load().await;
    }

    let app = routes::app(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(addr = %config.bind, "chat server listening");
    axum::serve(listener, app).await.context("server failed")
}
