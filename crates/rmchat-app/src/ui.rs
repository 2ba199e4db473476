//! Terminal adapter over `ConversationSession`.
//!
//! Reads lines, invokes session operations, and prints whatever the session
//! state says changed. No request logic lives here.

use std::io::Write;

use rmchat_session::{ChatError, ChatMessage, ConversationSession, Screen};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// One line of chat-screen input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Message(String),
    Reset,
    ChangeIdentity,
    Quit,
}

pub fn parse_input(line: &str) -> Input {
    match line.trim() {
        "/reset" => Input::Reset,
        "/change" => Input::ChangeIdentity,
        "/quit" | "/exit" => Input::Quit,
        _ => Input::Message(line.to_string()),
    }
}

pub fn render_message(message: &ChatMessage) -> String {
    format!(
        "[{}] {}: {}",
        message.display_time(),
        message.role.label(),
        message.content
    )
}

pub struct ChatUi<W: Write> {
    session: ConversationSession,
    out: W,
    /// Transcript entries already printed.
    rendered: usize,
    /// Transcript generation those entries belong to.
    generation: u64,
    last_meta: String,
}

impl<W: Write> ChatUi<W> {
    pub fn new(session: ConversationSession, out: W) -> Self {
        Self {
            session,
            out,
            rendered: 0,
            generation: 0,
            last_meta: String::new(),
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Drive the UI until input ends or the user quits.
    pub async fn run<R>(&mut self, input: R, email: Option<String>) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        if let Some(email) = email {
            self.start(&email).await?;
        }

        loop {
            match self.session.screen() {
                Screen::Identity => {
                    let saved = self.session.saved_identity();
                    match saved {
                        Some(ref s) => write!(self.out, "Email [{s}]: ")?,
                        None => write!(self.out, "Email: ")?,
                    }
                    self.out.flush()?;

                    let Some(line) = lines.next_line().await? else {
                        break;
                    };
                    if parse_input(&line) == Input::Quit {
                        break;
                    }
                    let email = match (line.trim(), saved) {
                        ("", Some(saved)) => saved,
                        (typed, _) => typed.to_string(),
                    };
                    self.start(&email).await?;
                }
                Screen::Chat => {
                    write!(self.out, "> ")?;
                    self.out.flush()?;

                    let Some(line) = lines.next_line().await? else {
                        break;
                    };
                    match parse_input(&line) {
                        Input::Quit => break,
                        Input::ChangeIdentity => {
                            self.session.change_identity();
                        }
                        Input::Reset => {
                            self.typing()?;
                            let result = self.session.reset_conversation().await.map(|_| ());
                            self.refresh(result)?;
                        }
                        Input::Message(text) => {
                            if text.trim().is_empty() {
                                continue;
                            }
                            self.typing()?;
                            let result = self.session.send_message(&text).await.map(|_| ());
                            self.refresh(result)?;
                        }
                    }
                }
            }
        }

        debug!("input closed, leaving chat");
        Ok(())
    }

    async fn start(&mut self, email: &str) -> std::io::Result<()> {
        if !rmchat_session::is_valid_email(email) {
            return self.show_error(&ChatError::validation());
        }
        self.typing()?;
        let result = self.session.start_chat(email).await.map(|_| ());
        self.refresh(result)
    }

    fn typing(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "Agent is typing...")
    }

    /// Print transcript changes, the meta line if it changed, then any error.
    fn refresh(&mut self, result: Result<(), ChatError>) -> std::io::Result<()> {
        self.render_new()?;

        let meta = self.session.meta().to_string();
        if self.session.screen() == Screen::Chat && meta != self.last_meta {
            writeln!(self.out, "-- {meta}")?;
            self.last_meta = meta;
        }

        match result {
            Ok(()) => Ok(()),
            Err(e) => self.show_error(&e),
        }
    }

    fn render_new(&mut self) -> std::io::Result<()> {
        if self.session.generation() != self.generation {
            if self.rendered > 0 {
                writeln!(self.out, "--- new conversation ---")?;
            }
            self.generation = self.session.generation();
            self.rendered = 0;
        }
        let transcript = self.session.transcript();
        for message in &transcript[self.rendered..] {
            writeln!(self.out, "{}", render_message(message))?;
        }
        self.rendered = transcript.len();
        Ok(())
    }

    fn show_error(&mut self, error: &ChatError) -> std::io::Result<()> {
        writeln!(self.out, "! {}", error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmchat_session::storage::keys;
    use rmchat_session::{ClientConfig, MemoryStore, RequestManagerClient, Role};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input("/reset"), Input::Reset);
        assert_eq!(parse_input("  /change "), Input::ChangeIdentity);
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("/exit"), Input::Quit);
        assert_eq!(
            parse_input("reset please"),
            Input::Message("reset please".into())
        );
    }

    #[test]
    fn renders_role_and_time() {
        let msg = ChatMessage::new(Role::Agent, "hi there");
        let line = render_message(&msg);
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Agent: hi there"));
    }

    async fn mock_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(
                serde_json::json!({"content": "Tell me how you can help"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": {"content": "Welcome!"},
                "session_id": "s1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"content": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": {"content": "hi"},
                "session_id": "s1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"content": "explode"})))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "boom"})),
            )
            .mount(&server)
            .await;
        server
    }

    fn ui_for(server: &MockServer, store: MemoryStore) -> ChatUi<Vec<u8>> {
        let client = RequestManagerClient::new(ClientConfig::new(server.uri())).unwrap();
        let session = ConversationSession::new(Box::new(store), Box::new(client));
        ChatUi::new(session, Vec::new())
    }

    fn output(ui: ChatUi<Vec<u8>>) -> String {
        String::from_utf8(ui.into_output()).unwrap()
    }

    #[tokio::test]
    async fn full_conversation() {
        let server = mock_server().await;
        let mut ui = ui_for(&server, MemoryStore::new());

        let input: &[u8] = b"not-an-email\nann@example.com\nhello\n\nexplode\n/quit\n";
        ui.run(input, None).await.unwrap();

        let session = ui.session();
        let roles: Vec<_> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Agent, Role::User, Role::Agent, Role::User]);

        let out = output(ui);
        assert!(out.contains("! Please enter a valid email address."));
        assert!(out.contains("Agent: Welcome!"));
        assert!(out.contains("You: hello"));
        assert!(out.contains("Agent: hi"));
        assert!(out.contains("-- Email: ann@example.com · Session: s1"));
        assert!(out.contains("! Request failed (500): boom"));
        assert!(!out.contains("Tell me how you can help"));
    }

    #[tokio::test]
    async fn saved_identity_is_offered_and_accepted() {
        let server = mock_server().await;
        let store = MemoryStore::new().with(keys::EMAIL, "ann@example.com");
        let mut ui = ui_for(&server, store);

        let input: &[u8] = b"\n/quit\n";
        ui.run(input, None).await.unwrap();

        assert_eq!(ui.session().screen(), Screen::Chat);
        let out = output(ui);
        assert!(out.starts_with("Email [ann@example.com]: "));
        assert!(out.contains("Agent: Welcome!"));
    }

    #[tokio::test]
    async fn email_flag_skips_prompt() {
        let server = mock_server().await;
        let mut ui = ui_for(&server, MemoryStore::new());

        let input: &[u8] = b"/change\n";
        ui.run(input, Some("ann@example.com".into())).await.unwrap();

        assert_eq!(ui.session().screen(), Screen::Identity);
        let out = output(ui);
        assert!(out.contains("Agent: Welcome!"));
        assert!(out.contains("Email [ann@example.com]: "));
    }

    #[tokio::test]
    async fn quit_on_identity_screen_exits_without_sending() {
        let server = mock_server().await;
        let mut ui = ui_for(&server, MemoryStore::new());

        let input: &[u8] = b"/quit\nann@example.com\n";
        ui.run(input, None).await.unwrap();

        assert_eq!(ui.session().screen(), Screen::Identity);
        assert_eq!(ui.session().saved_identity(), None);
        assert!(server.received_requests().await.unwrap().is_empty());
        let out = output(ui);
        assert!(!out.contains("! Please enter a valid email address."));
    }

    #[tokio::test]
    async fn reset_prints_separator() {
        let server = mock_server().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"content": "reset"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": "Starting over."
            })))
            .mount(&server)
            .await;
        let store = MemoryStore::new().with(keys::EMAIL, "ann@example.com");
        let mut ui = ui_for(&server, store);

        let input: &[u8] = b"\nhello\n/reset\n";
        ui.run(input, None).await.unwrap();

        let out = output(ui);
        assert!(out.contains("--- new conversation ---"));
        assert!(out.contains("You: reset"));
        assert!(out.contains("Agent: Starting over."));
    }
}
