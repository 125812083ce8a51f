// src/client/mod.rs
pub mod api;
pub mod session;
pub mod terminal;
pub mod view;

pub use api::{ApiClient, ChatApi};
pub use session::{ChatSession, FALLBACK_REPLY, SendOutcome};
pub use terminal::TerminalView;
pub use view::{ChatView, ConnectionStatus, HtmlView, Message, Sender};
