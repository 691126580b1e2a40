//! Chat session state and the per-turn pipeline.

use std::sync::Arc;

use pintar_core::config::{KnowledgeSettings, Settings};
use pintar_core::{ChatMessage, Style};
use pintar_knowledge::corpus::normalize_domain;
use pintar_knowledge::{Embedder, KnowledgeBase};
use tracing::{debug, warn};

use crate::errors::ChatResult;
use crate::postprocess::postprocess_reply;
use crate::prompt::compose_prompt;
use crate::providers::TextGenerator;
use crate::suggest::suggest_next_actions;

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct TurnOutput {
    pub reply: String,
    pub suggestions: Vec<String>,
}

/// One conversation against one generation backend.
///
/// The session owns the history, the active domain and style, and the
/// knowledge base for the current domain. The knowledge base is built
/// lazily and rebuilt only when the domain changes.
pub struct ChatSession {
    generator: Box<dyn TextGenerator>,
    embedder: Arc<dyn Embedder>,
    knowledge_settings: KnowledgeSettings,
    temperature: f32,
    max_output_tokens: u32,
    history_window: usize,
    style: Style,
    domain: String,
    history: Vec<ChatMessage>,
    knowledge: Option<KnowledgeBase>,
}

impl ChatSession {
    /// Create a session from resolved settings.
    ///
    /// The domain starts empty, which reads the default corpus and
    /// keeps the persona general.
    pub fn new(
        generator: Box<dyn TextGenerator>,
        embedder: Arc<dyn Embedder>,
        settings: &Settings,
    ) -> Self {
        Self {
            generator,
            embedder,
            knowledge_settings: KnowledgeSettings::from(&settings.knowledge),
            temperature: settings.generation.temperature,
            max_output_tokens: settings.generation.max_output_tokens,
            history_window: settings.chat.history_window,
            style: settings.chat.style,
            domain: String::new(),
            history: Vec::new(),
            knowledge: None,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Switch the active domain, rebuilding the knowledge base if it
    /// actually changed. History is kept across domain switches.
    pub async fn set_domain(&mut self, domain: &str) -> ChatResult<()> {
        self.domain = normalize_domain(domain);
        self.ensure_knowledge().await
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Drop the conversation history, starting a fresh chat.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Run one turn: retrieve context, compose the prompt, generate,
    /// and post-process.
    ///
    /// History is committed only after generation succeeds, so a
    /// failed turn can simply be retried.
    pub async fn turn(&mut self, user_input: &str) -> ChatResult<TurnOutput> {
        self.ensure_knowledge().await?;

        let snippets = match &self.knowledge {
            Some(kb) => match kb.search(user_input, self.knowledge_settings.top_k).await {
                Ok(snippets) => snippets,
                Err(err) => {
                    warn!(error = %err, "retrieval failed, continuing without context");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let pending = ChatMessage::user(user_input);
        let mut rendered = self.history.clone();
        rendered.push(pending.clone());

        let prompt = compose_prompt(
            &rendered,
            &self.domain,
            self.style,
            &snippets,
            self.history_window,
        );

        debug!(
            provider = self.generator.name(),
            model = self.generator.model(),
            snippets = snippets.len(),
            "requesting completion"
        );

        let raw = self
            .generator
            .generate(&prompt, self.temperature, self.max_output_tokens)
            .await?;
        let reply = postprocess_reply(&raw, self.style);

        self.history.push(pending);
        self.history.push(ChatMessage::assistant(reply.clone()));

        let suggestions = suggest_next_actions(user_input, &self.domain);

        Ok(TurnOutput { reply, suggestions })
    }

    /// Build the knowledge base when missing or built for another domain.
    async fn ensure_knowledge(&mut self) -> ChatResult<()> {
        let rebuild = match &self.knowledge {
            Some(kb) => !kb.matches_domain(&self.domain),
            None => true,
        };

        if rebuild {
            debug!(domain = %self.domain, "building knowledge base");
            let kb = KnowledgeBase::build(
                &self.domain,
                &self.knowledge_settings,
                self.embedder.clone(),
            )
            .await?;
            self.knowledge = Some(kb);
        }

        Ok(())
    }
}
