use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::groq::{self, GroqClient};
use crate::history::{ChatEntry, ConversationHistory, Sender};
use crate::logging::{log_api_call, ApiCallLog};

/// How long a transient notice stays visible, in 300ms ticks.
const NOTICE_TICKS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Conversation state
    pub history: ConversationHistory,
    pub chat_state: ListState,

    // Input state
    pub input: String,
    pub input_cursor: usize, // cursor position in chars

    // Transient notice (blank-input warning, save confirmations)
    pub notice: Option<String>,
    notice_ticks: u8,

    // Appearance
    pub dark_mode: bool,

    // Model picker state
    pub selected_model: String,
    pub show_model_picker: bool,
    pub model_picker_state: ListState,

    pub temperature: f32,
    client: GroqClient,
}

impl App {
    pub fn new(client: GroqClient, config: Config, selected_model: String) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            history: ConversationHistory::new(),
            chat_state: ListState::default(),
            input: String::new(),
            input_cursor: 0,
            notice: None,
            notice_ticks: 0,
            dark_mode: config.dark_mode,
            selected_model,
            show_model_picker: false,
            model_picker_state: ListState::default(),
            temperature: config.temperature,
            client,
        }
    }

    /// Submits the current input buffer. Blocks the event loop until the
    /// Groq call returns; there is no in-flight state to render.
    ///
    /// Blank input mutates nothing and only raises a notice. On success the
    /// user turn and the reply land as one batch, newest first. On failure
    /// a single Error entry lands and the user text is dropped.
    pub async fn submit(&mut self) {
        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() {
            self.set_notice("Please enter a question.");
            return;
        }

        let started = Instant::now();
        match self
            .client
            .chat(&self.selected_model, &trimmed, self.temperature)
            .await
        {
            Ok(reply) => {
                let _ = log_api_call(&ApiCallLog {
                    model: &self.selected_model,
                    outcome: "ok",
                    elapsed: started.elapsed(),
                });
                self.history.prepend(vec![
                    ChatEntry::new(Sender::User, trimmed),
                    ChatEntry::new(Sender::Assistant, reply),
                ]);
            }
            Err(err) => {
                let _ = log_api_call(&ApiCallLog {
                    model: &self.selected_model,
                    outcome: "error",
                    elapsed: started.elapsed(),
                });
                self.history
                    .prepend(vec![ChatEntry::new(Sender::Error, err.to_string())]);
            }
        }

        self.input.clear();
        self.input_cursor = 0;
        self.chat_state.select(Some(0));
    }

    pub fn delete_entry(&mut self, index: usize) {
        self.history.remove_at(index);

        // Keep the selection inside the shrunk list
        if self.history.is_empty() {
            self.chat_state.select(None);
        } else if let Some(selected) = self.chat_state.selected() {
            self.chat_state
                .select(Some(selected.min(self.history.len() - 1)));
        }
    }

    pub fn clear_all(&mut self) {
        self.history.clear();
        self.chat_state.select(None);
    }

    pub fn selected_entry(&self) -> Option<(usize, &ChatEntry)> {
        let index = self.chat_state.selected()?;
        self.history.snapshot().get(index).map(|e| (index, e))
    }

    pub fn select_next(&mut self) {
        let len = self.history.len();
        if len == 0 {
            return;
        }
        let i = self.chat_state.selected().unwrap_or(0);
        self.chat_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn select_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = self.chat_state.selected().unwrap_or(0);
        self.chat_state.select(Some(i.saturating_sub(1)));
    }

    /// Saves the entry at `index` to `groq_response_{index+1}.txt` in the
    /// working directory (1-based ordinal over display order).
    pub fn export_entry(&mut self, index: usize) {
        match self.write_export(index, Path::new(".")) {
            Ok(Some(filename)) => self.set_notice(&format!("Saved {filename}")),
            Ok(None) => {}
            Err(err) => self.set_notice(&format!("Save failed: {err}")),
        }
    }

    fn write_export(&self, index: usize, dir: &Path) -> Result<Option<String>> {
        let Some(entry) = self.history.snapshot().get(index) else {
            return Ok(None);
        };
        let filename = format!("groq_response_{}.txt", index + 1);
        fs::write(dir.join(&filename), &entry.text)?;
        Ok(Some(filename))
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        let _ = Config::save_dark_mode(self.dark_mode);
    }

    // Model picker

    pub fn open_model_picker(&mut self) {
        let current = groq::MODELS
            .iter()
            .position(|m| *m == self.selected_model)
            .unwrap_or(0);
        self.model_picker_state.select(Some(current));
        self.show_model_picker = true;
    }

    pub fn model_picker_nav_down(&mut self) {
        let i = self.model_picker_state.selected().unwrap_or(0);
        self.model_picker_state
            .select(Some((i + 1).min(groq::MODELS.len() - 1)));
    }

    pub fn model_picker_nav_up(&mut self) {
        let i = self.model_picker_state.selected().unwrap_or(0);
        self.model_picker_state.select(Some(i.saturating_sub(1)));
    }

    /// Applies the picked model. Existing history is untouched; only later
    /// submissions use the new model.
    pub fn confirm_model(&mut self) {
        if let Some(i) = self.model_picker_state.selected() {
            if let Some(model) = groq::MODELS.get(i) {
                self.selected_model = model.to_string();
                let _ = Config::save_default_model(model);
            }
        }
        self.show_model_picker = false;
    }

    // Transient notices

    pub fn set_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
        self.notice_ticks = NOTICE_TICKS;
    }

    pub fn tick(&mut self) {
        if self.notice.is_some() {
            self.notice_ticks = self.notice_ticks.saturating_sub(1);
            if self.notice_ticks == 0 {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(server: &MockServer) -> App {
        let client = GroqClient::with_base_url("test-key", &server.uri());
        App::new(client, Config::new(), "llama3-8b-8192".to_string())
    }

    async fn mount_reply(server: &MockServer, prompt: &str, reply: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{"role": "user", "content": prompt}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": reply}}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn submit_prepends_user_and_reply_as_pair() {
        let server = MockServer::start().await;
        mount_reply(&server, "what is rust", "a systems language").await;

        let mut app = test_app(&server);
        app.input = "  what is rust  ".to_string();
        app.submit().await;

        let snapshot = app.history.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].sender, Sender::Assistant);
        assert_eq!(snapshot[0].text, "a systems language");
        assert_eq!(snapshot[1].sender, Sender::User);
        assert_eq!(snapshot[1].text, "what is rust");
        assert!(app.input.is_empty());
        assert_eq!(app.input_cursor, 0);
    }

    #[tokio::test]
    async fn blank_input_raises_notice_without_mutating_history() {
        let server = MockServer::start().await;

        let mut app = test_app(&server);
        app.input = "   \t ".to_string();
        app.submit().await;

        assert!(app.history.is_empty());
        assert_eq!(app.notice.as_deref(), Some("Please enter a question."));
        // The buffer is only reset after a real submission
        assert_eq!(app.input, "   \t ");
    }

    #[tokio::test]
    async fn failed_call_records_single_error_entry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model melted"))
            .mount(&server)
            .await;

        let mut app = test_app(&server);
        app.input = "hello".to_string();
        app.submit().await;

        let snapshot = app.history.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].sender, Sender::Error);
        assert!(snapshot[0].text.contains("model melted"));
        // The failed question is not kept anywhere in history
        assert!(snapshot.iter().all(|e| e.sender != Sender::User));
        assert!(app.input.is_empty());
    }

    #[tokio::test]
    async fn sequence_of_submissions_stays_newest_first() {
        let server = MockServer::start().await;
        mount_reply(&server, "a", "A").await;
        mount_reply(&server, "b", "B").await;
        mount_reply(&server, "c", "C").await;

        let mut app = test_app(&server);
        for prompt in ["a", "b", "c"] {
            app.input = prompt.to_string();
            app.submit().await;
        }

        let texts: Vec<&str> = app
            .history
            .snapshot()
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["c", "C", "b", "B", "a", "A"]);
        assert_eq!(app.history.snapshot()[0].sender, Sender::Assistant);
        assert_eq!(app.history.snapshot()[1].sender, Sender::User);
    }

    #[tokio::test]
    async fn clear_all_empties_history() {
        let server = MockServer::start().await;
        mount_reply(&server, "a", "A").await;

        let mut app = test_app(&server);
        app.input = "a".to_string();
        app.submit().await;
        assert_eq!(app.history.len(), 2);

        app.clear_all();
        assert_eq!(app.history.len(), 0);
        assert!(app.chat_state.selected().is_none());
    }

    #[tokio::test]
    async fn delete_entry_clamps_selection() {
        let server = MockServer::start().await;
        mount_reply(&server, "a", "A").await;

        let mut app = test_app(&server);
        app.input = "a".to_string();
        app.submit().await;

        app.chat_state.select(Some(1));
        app.delete_entry(1);

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.chat_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn export_uses_one_based_display_ordinal() {
        let server = MockServer::start().await;
        mount_reply(&server, "a", "the answer").await;

        let mut app = test_app(&server);
        app.input = "a".to_string();
        app.submit().await;

        let dir = tempfile::tempdir().unwrap();
        let filename = app.write_export(0, dir.path()).unwrap().unwrap();
        assert_eq!(filename, "groq_response_1.txt");

        let saved = fs::read_to_string(dir.path().join(filename)).unwrap();
        assert_eq!(saved, "the answer");
    }

    #[tokio::test]
    async fn export_out_of_bounds_writes_nothing() {
        let server = MockServer::start().await;
        let app = test_app(&server);

        let dir = tempfile::tempdir().unwrap();
        assert!(app.write_export(3, dir.path()).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn notice_expires_after_ticks() {
        let server_uri = "http://127.0.0.1:0";
        let client = GroqClient::with_base_url("test-key", server_uri);
        let mut app = App::new(client, Config::new(), "llama3-8b-8192".to_string());

        app.set_notice("Please enter a question.");
        for _ in 0..NOTICE_TICKS {
            app.tick();
        }
        assert!(app.notice.is_none());
    }
}
