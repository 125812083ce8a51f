// src/services/assistant.rs
use tokio::sync::OnceCell;

use super::chatbot::generate_reply;

/// Characters of each reply written to the log.
const LOG_PREVIEW_CHARS: usize = 100;

/// The loaded reply model. Loading is what `model_loaded` on the status
/// endpoint reports.
#[derive(Debug)]
pub struct ReplyModel {
    persona: String,
}

impl ReplyModel {
    fn load(persona: &str) -> Self {
        Self { persona: persona.to_string() }
    }

    pub fn reply(&self, message: &str) -> String {
        generate_reply(&self.persona, message)
    }
}

/// Named assistant whose model is loaded on first use.
#[derive(Debug)]
pub struct Assistant {
    name: String,
    model: OnceCell<ReplyModel>,
}

impl Assistant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), model: OnceCell::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_loaded(&self) -> bool {
        self.model.initialized()
    }

    /// Load the model if it is not loaded yet; concurrent callers share one load.
    pub async fn load(&self) -> &ReplyModel {
        self.model
            .get_or_init(|| async {
                tracing::info!(assistant = %self.name, "loading reply model");
                let model = ReplyModel::load(&self.name);
                tracing::info!(assistant = %self.name, "reply model loaded");
                model
            })
            .await
    }

    pub async fn reply(&self, message: &str) -> String {
        tracing::info!(message = %message, "received message");
        let reply = self.load().await.reply(message);
        tracing::info!(preview = %preview(&reply), "reply generated");
        reply
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() { format!("{head}...") } else { head }
}
