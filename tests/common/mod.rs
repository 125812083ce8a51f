#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chatbot_client::client::{ChatApi, ChatView, ConnectionStatus, Message, Sender};
use chatbot_client::error::ClientError;
use chatbot_client::message::StatusResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Appended(Sender, String),
    Status(ConnectionStatus),
    Pending(bool),
    ClearInput,
    Scroll,
    StatusRequest,
    ChatRequest(String),
}

pub type Journal = Arc<Mutex<Vec<Event>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(journal: &Journal) -> Vec<Event> {
    journal.lock().unwrap().clone()
}

/// Events without the scroll markers, for order assertions.
pub fn significant(journal: &Journal) -> Vec<Event> {
    events(journal).into_iter().filter(|e| *e != Event::Scroll).collect()
}

pub struct RecordingView {
    journal: Journal,
}

impl RecordingView {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }

    fn push(&self, event: Event) {
        self.journal.lock().unwrap().push(event);
    }
}

impl ChatView for RecordingView {
    fn append_message(&mut self, message: &Message) {
        self.push(Event::Appended(message.sender(), message.text().to_string()));
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.push(Event::Status(status));
    }

    fn set_pending(&mut self, pending: bool) {
        self.push(Event::Pending(pending));
    }

    fn clear_input(&mut self) {
        self.push(Event::ClearInput);
    }

    fn scroll_to_latest(&mut self) {
        self.push(Event::Scroll);
    }
}

/// Backend that answers from a script and writes every call to the journal.
pub struct ScriptedApi {
    journal: Journal,
    statuses: Mutex<VecDeque<Result<StatusResponse, ClientError>>>,
    replies: Mutex<VecDeque<Result<String, ClientError>>>,
}

impl ScriptedApi {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            statuses: Mutex::new(VecDeque::new()),
            replies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_status(self, status: Result<StatusResponse, ClientError>) -> Self {
        self.statuses.lock().unwrap().push_back(status);
        self
    }

    pub fn with_reply(self, reply: Result<String, ClientError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn chat_requests(&self) -> Vec<String> {
        self.journal
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::ChatRequest(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ChatApi for ScriptedApi {
    async fn status(&self) -> Result<StatusResponse, ClientError> {
        self.journal.lock().unwrap().push(Event::StatusRequest);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Request("no scripted status".into())))
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        self.journal.lock().unwrap().push(Event::ChatRequest(message.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Request("no scripted reply".into())))
    }
}

/// Backend whose chat call never completes.
pub struct HangingApi;

impl ChatApi for HangingApi {
    async fn status(&self) -> Result<StatusResponse, ClientError> {
        std::future::pending().await
    }

    async fn chat(&self, _message: &str) -> Result<String, ClientError> {
        std::future::pending().await
    }
}

/// Backend that reports ready but never answers a chat call.
pub struct StalledChatApi;

impl ChatApi for StalledChatApi {
    async fn status(&self) -> Result<StatusResponse, ClientError> {
        Ok(status(true))
    }

    async fn chat(&self, _message: &str) -> Result<String, ClientError> {
        std::future::pending().await
    }
}

pub fn status(model_loaded: bool) -> StatusResponse {
    StatusResponse {
        status: Some("online".into()),
        model_loaded,
        name: Some("DeepHelper".into()),
    }
}

pub fn rejected(error: &str) -> ClientError {
    ClientError::Rejected {
        status: Some("error".into()),
        error: Some(error.into()),
    }
}
