//! Command line and environment configuration.
//!
//! Every flag has an environment fallback; `main` loads `.env` first so the
//! same names work from a dotenv file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

#[derive(Parser, Debug)]
#[command(name = "chatbot-client", about = "Terminal chat client and companion chat server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with a server from the terminal.
    Chat(ChatArgs),
    /// Run the chat server.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Base URL of the chat API; `/status` and `/chat` are appended to it.
    #[arg(long, env = "CHAT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Give up on a request after this many seconds. No limit when unset.
    #[arg(long, env = "CHAT_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "CHAT_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Directory served for any path that is not an API route.
    #[arg(long, env = "CHAT_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Load the reply model at startup instead of on the first chat request.
    #[arg(long, env = "CHAT_PRELOAD", value_parser = clap::builder::BoolishValueParser::new())]
    pub preload: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                url: api_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            request_timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl TryFrom<&ChatArgs> for ClientConfig {
    type Error = ConfigError;

    fn try_from(args: &ChatArgs) -> Result<Self, Self::Error> {
        let config = ClientConfig::new(&args.api_url)?;
        match args.request_timeout_secs {
            None => Ok(config),
            Some(0) => Err(ConfigError::ZeroTimeout),
            Some(secs) => Ok(config.with_timeout(Duration::from_secs(secs))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub static_dir: Option<PathBuf>,
    pub preload: bool,
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        Self {
            bind: args.bind,
            static_dir: args.static_dir.clone(),
            preload: args.preload,
        }
    }
}
