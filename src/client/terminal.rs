//! Terminal front end: a line-oriented view and the read loop driving it.

use std::future::Future;
use std::io::{self, Write};
use std::pin::pin;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;

use super::api::ChatApi;
use super::session::ChatSession;
use super::view::{BOT_NAME, ChatView, ConnectionStatus, Message, Sender, sanitize_terminal};

const PROMPT: &str = "You: ";
const CLEAR_LINE: &str = "\r\u{1b}[2K";

/// Writes the conversation as plain lines. The prompt echo already shows
/// what the user typed, so only bot messages are printed by default.
pub struct TerminalView<W> {
    out: W,
    echo_user: bool,
    typing_shown: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, echo_user: false, typing_shown: false }
    }

    /// Also print user messages, for output that is not an interactive tty.
    pub fn echo_user(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }

    pub fn prompt(&mut self) {
        self.write(PROMPT);
    }

    pub fn line(&mut self, text: &str) {
        self.write(&format!("{}\n", sanitize_terminal(text)));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // The typing indicator has no trailing newline; it must be cleared
    // before anything is written over it.
    fn clear_typing(&mut self) {
        if self.typing_shown {
            self.write(CLEAR_LINE);
            self.typing_shown = false;
        }
    }

    fn write(&mut self, text: &str) {
        let result = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append_message(&mut self, message: &Message) {
        if message.sender() == Sender::User && !self.echo_user {
            return;
        }
        self.clear_typing();
        let text = format!("{}: {}\n", message.sender().label(), sanitize_terminal(message.text()));
        self.write(&text);
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.write(&format!("[{status}]\n"));
    }

    fn set_pending(&mut self, pending: bool) {
        if pending {
            self.write(&format!("{BOT_NAME} is typing..."));
            self.typing_shown = true;
        } else {
            self.clear_typing();
        }
    }

    fn clear_input(&mut self) {}

    fn scroll_to_latest(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "terminal flush failed");
        }
    }
}

/// Where the read loop gets its input from.
pub trait LineSource {
    /// Next line without its terminator, `None` at end of input.
    fn next_line(&mut self) -> impl Future<Output = io::Result<Option<String>>>;

    /// Whether the source draws its own prompt.
    fn shows_prompt(&self) -> bool {
        false
    }
}

impl<R: AsyncBufRead + Unpin> LineSource for Lines<R> {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

/// Interactive input with line editing and history. The editor blocks, so
/// it lives on its own thread and reads one line per request; it never
/// prompts while a reply is outstanding.
pub struct EditorLines {
    requests: std::sync::mpsc::Sender<()>,
    lines: mpsc::Receiver<io::Result<Option<String>>>,
}

impl EditorLines {
    pub fn spawn() -> Result<Self, ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        let (requests, pending) = std::sync::mpsc::channel::<()>();
        let (tx, lines) = mpsc::channel(1);

        std::thread::spawn(move || {
            while pending.recv().is_ok() {
                let result = match editor.readline(PROMPT) {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            let _ = editor.add_history_entry(line.as_str());
                        }
                        Ok(Some(line))
                    }
                    Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
                    Err(ReadlineError::Io(e)) => Err(e),
                    Err(e) => Err(io::Error::other(e)),
                };
                let last = !matches!(result, Ok(Some(_)));
                if tx.blocking_send(result).is_err() || last {
                    break;
                }
            }
        });

        Ok(Self { requests, lines })
    }
}

impl LineSource for EditorLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.requests.send(()).is_err() {
            return Ok(None);
        }
        Ok(self.lines.recv().await.transpose()?.flatten())
    }

    fn shows_prompt(&self) -> bool {
        true
    }
}

/// Read lines from `input` and send each one until end of input, `/quit`,
/// `/exit` or Ctrl-C. The backend status is checked once before the first
/// prompt.
pub async fn run<A, W, L>(session: &mut ChatSession<A, TerminalView<W>>, input: L) -> io::Result<()>
where
    A: ChatApi,
    W: Write,
    L: LineSource,
{
    run_until(session, input, tokio::signal::ctrl_c()).await
}

/// [`run`] with an explicit interrupt. The interrupt is watched while
/// waiting for the status, for input and for a reply; an exchange cut
/// short by it is abandoned and the session stays pending.
pub async fn run_until<A, W, L, F>(
    session: &mut ChatSession<A, TerminalView<W>>,
    mut input: L,
    interrupt: F,
) -> io::Result<()>
where
    A: ChatApi,
    W: Write,
    L: LineSource,
    F: Future,
{
    let mut interrupt = pin!(interrupt);

    let status_checked = tokio::select! {
        _ = session.check_status() => true,
        _ = &mut interrupt => false,
    };
    if status_checked {
        session.view_mut().line("Type a message and press Enter. /quit exits.");
        loop {
            if !input.shows_prompt() {
                session.view_mut().prompt();
            }
            let line = tokio::select! {
                line = input.next_line() => line?,
                _ = &mut interrupt => None,
            };
            let Some(line) = line else {
                break;
            };
            if matches!(line.trim(), "/quit" | "/exit") {
                break;
            }
            let replied = tokio::select! {
                _ = session.send_message(&line) => true,
                _ = &mut interrupt => false,
            };
            if !replied {
                break;
            }
        }
    }

    session.view_mut().line("");
    tracing::debug!(
        messages = session.messages().len(),
        pending = session.is_pending(),
        "chat loop finished"
    );
    Ok(())
}
