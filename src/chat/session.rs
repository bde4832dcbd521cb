//! Conversation session management.
//!
//! A [`ChatSession`] owns the committed history and drives one streamed turn
//! at a time: it appends the user message, streams the assistant response
//! while re-segmenting the accumulated text after every delta, and commits
//! the final segmentation as an assistant message when the stream completes.

use futures::{Stream, StreamExt};

use crate::chat::config::ChatConfig;
use crate::client::SambaNova;
use crate::error::Result;
use crate::observability::{SESSION_TURN_FAILURES, SESSION_TURN_INTERRUPTS, SESSION_TURNS};
use crate::render::Renderer;
use crate::segment::segment;
use crate::types::{CompletionChunk, CompletionCreateParams, Message, MessageParam, Role};

/// System prompt used when the user does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// How a streamed turn ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The stream completed and this assistant message was committed.
    Completed(Message),

    /// The user interrupted the stream; nothing was committed.
    Interrupted,
}

/// Counts over the committed history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// All committed messages, the system message included.
    pub total_messages: usize,

    /// Committed user messages.
    pub user_messages: usize,

    /// Committed assistant messages.
    pub assistant_messages: usize,

    /// Assistant messages that carried a reasoning segment.
    pub reasoning_messages: usize,
}

/// A single-user conversation over a streaming completion endpoint.
pub struct ChatSession {
    client: SambaNova,
    config: ChatConfig,
    messages: Vec<Message>,
    started: bool,
}

impl ChatSession {
    /// Creates a session in the unstarted state.
    pub fn new(client: SambaNova, config: ChatConfig) -> Self {
        Self {
            client,
            config,
            messages: Vec::new(),
            started: false,
        }
    }

    /// Starts (or restarts) the session with the given system prompt.
    ///
    /// Any existing history is discarded; the new history holds exactly one
    /// system message.
    pub fn start(&mut self, system_prompt: &str) {
        self.messages.clear();
        self.messages.push(Message::system(system_prompt));
        self.started = true;
    }

    /// Clears all history and returns the session to the unstarted state.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.started = false;
    }

    /// Returns true once [`start`](Self::start) has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The committed history, system message first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The committed history without the system message.
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|message| message.role != Role::System)
    }

    /// The system prompt the session was started with, if started.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role == Role::System)
            .map(|message| message.content.as_str())
    }

    /// The session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Mutable access to the configuration; changes apply to the next turn.
    pub fn config_mut(&mut self) -> &mut ChatConfig {
        &mut self.config
    }

    /// Counts over the committed history.
    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats {
            total_messages: self.messages.len(),
            ..SessionStats::default()
        };
        for message in &self.messages {
            match message.role {
                Role::System => {}
                Role::User => stats.user_messages += 1,
                Role::Assistant => {
                    stats.assistant_messages += 1;
                    if message.reasoning.is_some() {
                        stats.reasoning_messages += 1;
                    }
                }
            }
        }
        stats
    }

    /// Builds request parameters from the full committed history.
    fn build_params(&self) -> CompletionCreateParams {
        let messages: Vec<MessageParam> = self.messages.iter().map(MessageParam::from).collect();
        let mut params = CompletionCreateParams::new(self.config.model.clone(), messages)
            .with_temperature(self.config.temperature)
            .with_top_p(self.config.top_p);
        if let Some(max_tokens) = self.config.max_tokens {
            params = params.with_max_tokens(max_tokens);
        }
        params
    }

    /// Sends one user turn and streams the assistant response.
    ///
    /// The user message is committed before the request is made and stays in
    /// history even when the turn fails, so a retry resends it. The assistant
    /// message is committed only when the stream completes; a failed or
    /// interrupted stream commits nothing.
    pub async fn send_streaming(
        &mut self,
        user_input: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<TurnOutcome> {
        if !self.started {
            let prompt = self
                .config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
            self.start(&prompt);
        }

        SESSION_TURNS.click();
        self.messages.push(Message::user(user_input));

        let params = self.build_params();
        let stream = match self.client.stream(params).await {
            Ok(stream) => stream,
            Err(err) => {
                SESSION_TURN_FAILURES.click();
                return Err(err);
            }
        };
        self.finish_turn(stream, renderer).await
    }

    /// Drains the chunk stream, rendering each new segmentation, and commits
    /// the assistant message on completion.
    async fn finish_turn<S>(&mut self, stream: S, renderer: &mut dyn Renderer) -> Result<TurnOutcome>
    where
        S: Stream<Item = Result<CompletionChunk>>,
    {
        let mut stream = Box::pin(stream);
        let mut accumulated = String::new();

        while let Some(item) = stream.next().await {
            if renderer.should_interrupt() {
                SESSION_TURN_INTERRUPTS.click();
                renderer.print_interrupted();
                return Ok(TurnOutcome::Interrupted);
            }
            match item {
                Ok(chunk) => {
                    let Some(content) = chunk.first_content() else {
                        continue;
                    };
                    accumulated.push_str(content);
                    renderer.render_segments(&segment(&accumulated));
                }
                // Malformed records are per-chunk no-ops; the turn goes on.
                Err(err) if err.is_serialization() => continue,
                Err(err) => {
                    SESSION_TURN_FAILURES.click();
                    return Err(err);
                }
            }
        }

        renderer.finish_response();

        let segments = segment(&accumulated);
        let reasoning = segments.has_reasoning().then(|| segments.reasoning.clone());
        let message = Message::assistant_with_reasoning(segments.answer, reasoning);
        self.messages.push(message.clone());
        Ok(TurnOutcome::Completed(message))
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::error::Error;
    use crate::segment::Segments;
    use crate::types::{ChunkChoice, ChunkDelta};

    #[derive(Default)]
    struct RecordingRenderer {
        snapshots: Vec<Segments>,
        finished: bool,
        interrupted: bool,
        interrupt: bool,
    }

    impl Renderer for RecordingRenderer {
        fn render_segments(&mut self, segments: &Segments) {
            self.snapshots.push(segments.clone());
        }

        fn finish_response(&mut self) {
            self.finished = true;
        }

        fn print_error(&mut self, _error: &str) {}

        fn print_info(&mut self, _info: &str) {}

        fn print_interrupted(&mut self) {
            self.interrupted = true;
        }

        fn should_interrupt(&self) -> bool {
            self.interrupt
        }
    }

    fn session() -> ChatSession {
        let client = SambaNova::new(Some("test-key".to_string())).unwrap();
        ChatSession::new(client, ChatConfig::new())
    }

    fn content_chunk(text: &str) -> Result<CompletionChunk> {
        Ok(CompletionChunk {
            id: "cmpl-1".to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkDelta {
                    role: None,
                    content: Some(text.to_string()),
                },
                finish_reason: None,
            }],
            usage: None,
        })
    }

    fn role_only_chunk() -> Result<CompletionChunk> {
        Ok(CompletionChunk {
            id: "cmpl-1".to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkDelta {
                    role: Some(Role::Assistant),
                    content: None,
                },
                finish_reason: None,
            }],
            usage: None,
        })
    }

    #[test]
    fn start_resets_history_to_one_system_message() {
        let mut session = session();
        assert!(!session.is_started());

        session.start("You are a helpful assistant");
        assert!(session.is_started());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(
            session.system_prompt(),
            Some("You are a helpful assistant")
        );

        session.messages.push(Message::user("hi"));
        session.messages.push(Message::assistant("hello"));
        session.start("You are a pirate");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.system_prompt(), Some("You are a pirate"));
    }

    #[test]
    fn clear_returns_to_unstarted() {
        let mut session = session();
        session.start("prompt");
        session.messages.push(Message::user("hi"));

        session.clear();
        assert!(!session.is_started());
        assert!(session.messages().is_empty());
        assert_eq!(session.system_prompt(), None);
    }

    #[test]
    fn params_cover_full_history_with_sampling() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));
        session
            .messages
            .push(Message::assistant_with_reasoning("hello", Some("hmm".to_string())));

        let params = session.build_params();
        assert_eq!(params.messages.len(), 3);
        assert_eq!(params.messages[0].role, Role::System);
        assert_eq!(params.messages[2].content, "hello");
        assert_eq!(params.temperature, Some(0.1));
        assert_eq!(params.top_p, Some(0.1));
        assert!(params.max_tokens.is_none());
    }

    #[test]
    fn visible_messages_skip_system() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let visible: Vec<&Message> = session.visible_messages().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].role, Role::User);
    }

    #[tokio::test]
    async fn completed_turn_commits_segmented_message() {
        let mut session = session();
        session.start("You are a helpful assistant");
        session.messages.push(Message::user("Say hello"));

        let chunks = stream::iter(vec![
            content_chunk("<think>step"),
            content_chunk(" one</think>"),
            content_chunk("Hello!"),
        ]);
        let mut renderer = RecordingRenderer::default();
        let outcome = session.finish_turn(chunks, &mut renderer).await.unwrap();

        let expected =
            Message::assistant_with_reasoning("Hello!", Some("step one".to_string()));
        assert_eq!(outcome, TurnOutcome::Completed(expected.clone()));
        assert_eq!(session.messages().last(), Some(&expected));
        assert_eq!(session.messages().len(), 3);

        assert!(renderer.finished);
        assert_eq!(renderer.snapshots.len(), 3);
        assert_eq!(renderer.snapshots[2].reasoning, "step one");
        assert_eq!(renderer.snapshots[2].answer, "Hello!");
    }

    #[tokio::test]
    async fn turn_without_tags_commits_plain_answer() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let chunks = stream::iter(vec![content_chunk("Hel"), content_chunk("lo!")]);
        let mut renderer = RecordingRenderer::default();
        let outcome = session.finish_turn(chunks, &mut renderer).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Completed(Message::assistant("Hello!")));
        let stats = session.stats();
        assert_eq!(stats.assistant_messages, 1);
        assert_eq!(stats.reasoning_messages, 0);
    }

    #[tokio::test]
    async fn transport_error_keeps_user_message_and_commits_nothing() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let chunks = stream::iter(vec![
            content_chunk("He"),
            content_chunk("llo"),
            Err(Error::streaming("connection reset", None)),
        ]);
        let mut renderer = RecordingRenderer::default();
        let err = session.finish_turn(chunks, &mut renderer).await.unwrap_err();
        assert!(matches!(err, Error::Streaming { .. }));

        // The user message survives for a retry; no partial assistant text
        // is committed.
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages().last(), Some(&Message::user("hi")));
        assert!(!renderer.finished);
    }

    #[tokio::test]
    async fn malformed_chunks_are_skipped() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let chunks = stream::iter(vec![
            content_chunk("Hi"),
            Err(Error::serialization("bad json", None)),
            content_chunk("!"),
        ]);
        let mut renderer = RecordingRenderer::default();
        let outcome = session.finish_turn(chunks, &mut renderer).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Completed(Message::assistant("Hi!")));
    }

    #[tokio::test]
    async fn contentless_chunks_are_skipped() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let chunks = stream::iter(vec![role_only_chunk(), content_chunk("Hi!")]);
        let mut renderer = RecordingRenderer::default();
        let outcome = session.finish_turn(chunks, &mut renderer).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Completed(Message::assistant("Hi!")));
        assert_eq!(renderer.snapshots.len(), 1);
    }

    #[tokio::test]
    async fn interrupt_discards_the_turn() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let chunks = stream::iter(vec![content_chunk("Hel"), content_chunk("lo")]);
        let mut renderer = RecordingRenderer {
            interrupt: true,
            ..RecordingRenderer::default()
        };
        let outcome = session.finish_turn(chunks, &mut renderer).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Interrupted);
        assert!(renderer.interrupted);
        assert!(renderer.snapshots.is_empty());
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn empty_stream_commits_empty_answer() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("hi"));

        let chunks = stream::iter(Vec::<Result<CompletionChunk>>::new());
        let mut renderer = RecordingRenderer::default();
        let outcome = session.finish_turn(chunks, &mut renderer).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Completed(Message::assistant("")));
        assert!(renderer.finished);
    }

    #[test]
    fn stats_count_roles_and_reasoning() {
        let mut session = session();
        session.start("sys");
        session.messages.push(Message::user("one"));
        session
            .messages
            .push(Message::assistant_with_reasoning("a", Some("r".to_string())));
        session.messages.push(Message::user("two"));
        session.messages.push(Message::assistant("b"));

        let stats = session.stats();
        assert_eq!(stats.total_messages, 5);
        assert_eq!(stats.user_messages, 2);
        assert_eq!(stats.assistant_messages, 2);
        assert_eq!(stats.reasoning_messages, 1);
    }
}
