//! The chat session controller.
//!
//! A session owns the message log and drives a [`ChatView`]. Each send goes
//! idle -> pending -> idle; `send_message` borrows the session mutably for
//! the whole round trip, so a second send cannot start while one is pending.

use super::api::ChatApi;
use super::view::{ChatView, ConnectionStatus, Message};

/// Bot message shown for every failed chat call, whatever the cause.
pub const FALLBACK_REPLY: &str = "⚠️ Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was blank; nothing was appended or sent.
    Skipped,
    Replied,
    /// The fallback reply was appended.
    Failed,
}

pub struct ChatSession<A, V> {
    api: A,
    view: V,
    messages: Vec<Message>,
    pending: bool,
    status: Option<ConnectionStatus>,
}

impl<A: ChatApi, V: ChatView> ChatSession<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            messages: Vec::new(),
            pending: false,
            status: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Last status shown, `None` before the first check.
    pub fn status(&self) -> Option<ConnectionStatus> {
        self.status
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Ask the backend whether it is ready. Failures only change the
    /// indicator to offline; nothing is retried.
    pub async fn check_status(&mut self) -> ConnectionStatus {
        let status = match self.api.status().await {
            Ok(body) => ConnectionStatus::from_model_loaded(body.model_loaded),
            Err(e) => {
                tracing::error!(error = %e, "status check failed");
                ConnectionStatus::Offline
            }
        };
        self.status = Some(status);
        self.view.set_status(status);
        status
    }

    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Skipped;
        }

        self.append(Message::user(message));
        self.view.clear_input();
        self.set_pending(true);

        let outcome = match self.api.chat(message).await {
            Ok(reply) => {
                self.append(Message::bot(reply));
                SendOutcome::Replied
            }
            Err(e) => {
                if e.is_transport() {
                    tracing::error!(error = %e, "chat request failed");
                } else {
                    tracing::warn!(error = %e, "chat request rejected");
                }
                self.append(Message::bot(FALLBACK_REPLY));
                SendOutcome::Failed
            }
        };

        self.set_pending(false);
        outcome
    }

    fn append(&mut self, message: Message) {
        self.view.append_message(&message);
        self.messages.push(message);
        self.view.scroll_to_latest();
    }

    fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
        self.view.set_pending(pending);
        self.view.scroll_to_latest();
    }
}
