//! Messages and the views that display them.

use std::fmt;

pub const BOT_NAME: &str = "DeepHelper";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => BOT_NAME,
        }
    }

    pub fn avatar(self) -> &'static str {
        match self {
            Sender::User => "👤",
            Sender::Bot => "🤖",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// One entry of the chat log. Fields are private so an appended message
/// cannot be edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Online,
    Loading,
    Offline,
}

impl ConnectionStatus {
    pub fn from_model_loaded(model_loaded: bool) -> Self {
        if model_loaded { ConnectionStatus::Online } else { ConnectionStatus::Loading }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Online => "🟢 Online",
            ConnectionStatus::Loading => "🟡 Loading model...",
            ConnectionStatus::Offline => "🔴 Offline",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display surface driven by [`ChatSession`](super::session::ChatSession).
///
/// All methods are infallible: a view that can fail (a closed terminal, say)
/// logs the failure and carries on, the same way a DOM update cannot fail.
pub trait ChatView {
    /// Render `message` at the end of the log. Text must be displayed
    /// literally, never interpreted as markup or control sequences.
    fn append_message(&mut self, message: &Message);

    fn set_status(&mut self, status: ConnectionStatus);

    /// Toggle the disabled send control and the typing indicator.
    fn set_pending(&mut self, pending: bool);

    fn clear_input(&mut self);

    fn scroll_to_latest(&mut self);
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop control characters except newline and tab, so text cannot emit
/// escape sequences, carriage returns or bells to the terminal.
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// DOM-equivalent view: keeps the rendered HTML fragments in order along
/// with the state of the status line, typing indicator and input box.
#[derive(Debug, Default)]
pub struct HtmlView {
    entries: Vec<String>,
    status: Option<String>,
    typing_visible: bool,
    send_disabled: bool,
    input: String,
    scroll_top: usize,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_message(message: &Message) -> String {
        let sender = message.sender();
        format!(
            "<div class=\"message {class}-message\"><div class=\"avatar\">{avatar}</div>\
             <div class=\"content\"><strong>{label}:</strong> {text}</div></div>",
            class = sender.css_class(),
            avatar = sender.avatar(),
            label = sender.label(),
            text = escape_html(message.text()),
        )
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn typing_visible(&self) -> bool {
        self.typing_visible
    }

    pub fn send_disabled(&self) -> bool {
        self.send_disabled
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn type_input(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Index of the entry the log is scrolled to; equals the entry count
    /// when pinned to the newest message.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// The whole log as one `#messages` container.
    pub fn to_html(&self) -> String {
        format!("<div id=\"messages\">{}</div>", self.entries.concat())
    }
}

impl ChatView for HtmlView {
    fn append_message(&mut self, message: &Message) {
        self.entries.push(Self::render_message(message));
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.status = Some(status.label().to_string());
    }

    fn set_pending(&mut self, pending: bool) {
        self.send_disabled = pending;
        self.typing_visible = pending;
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_top = self.entries.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_markup() {
        assert_eq!(
            escape_html("<script>alert('x') && \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp;&amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn rendered_message_keeps_script_tag_literal() {
        let html = HtmlView::render_message(&Message::user("<script>boom()</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;boom()&lt;/script&gt;"));
        assert!(html.starts_with("<div class=\"message user-message\">"));
        assert!(html.contains("<strong>You:</strong>"));
    }

    #[test]
    fn bot_messages_carry_bot_label() {
        let html = HtmlView::render_message(&Message::bot("hi"));
        assert!(html.contains("bot-message"));
        assert!(html.contains(&format!("<strong>{BOT_NAME}:</strong> hi")));
    }

    #[test]
    fn terminal_sanitizer_strips_escape_sequences() {
        assert_eq!(sanitize_terminal("\u{1b}[2Jcleared\r\u{7}"), "[2Jcleared");
        assert_eq!(sanitize_terminal("line one\n\tline two"), "line one\n\tline two");
    }

    #[test]
    fn status_follows_model_loaded() {
        assert_eq!(ConnectionStatus::from_model_loaded(true), ConnectionStatus::Online);
        assert_eq!(ConnectionStatus::from_model_loaded(false), ConnectionStatus::Loading);
        assert_eq!(ConnectionStatus::Offline.to_string(), "🔴 Offline");
    }
}
