//! Per-session conversation driver.
//!
//! Wires classifier, context and response generator together for one
//! visitor. The generator is immutable and shared; everything mutable lives
//! in the session, so sessions never contend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::config::ChatConfig;
use folio_core::{Category, Message};
use tracing::{debug, info};
use uuid::Uuid;

use crate::classifier::TopicClassifier;
use crate::context::ConversationContext;
use crate::error::ChatError;
use crate::response::ResponseGenerator;

/// Bot line shown when returning to the category menu.
pub const CATEGORY_PROMPT: &str = "Please select a category to learn more:";

/// One visitor's conversation.
pub struct ChatSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    generator: Arc<ResponseGenerator>,
    context: ConversationContext,
    follow_ups: bool,
    selected: Option<String>,
}

impl ChatSession {
    /// Start a session with default limits and OS-seeded follow-up choice.
    pub fn new(generator: Arc<ResponseGenerator>) -> Self {
        Self::with_context(generator, ConversationContext::new(), true)
    }

    /// Start a session whose follow-up choices are reproducible.
    pub fn seeded(generator: Arc<ResponseGenerator>, seed: u64) -> Self {
        Self::with_context(generator, ConversationContext::seeded(seed), true)
    }

    /// Start a session using the window, limit, seed and follow-up switch
    /// from `config`.
    pub fn with_config(generator: Arc<ResponseGenerator>, config: &ChatConfig) -> Self {
        let context = match config.seed {
            Some(seed) => ConversationContext::seeded(seed),
            None => ConversationContext::new(),
        }
        .with_limits(config.memory_window, config.relevant_context_limit);
        Self::with_context(generator, context, config.follow_ups)
    }

    fn with_context(
        generator: Arc<ResponseGenerator>,
        context: ConversationContext,
        follow_ups: bool,
    ) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            generator,
            context,
            follow_ups,
            selected: None,
        };
        info!(session = %session.id, "Chat session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    /// Category id chosen from the menu, if any.
    pub fn selected_category(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn welcome(&self) -> &str {
        self.generator.knowledge().welcome()
    }

    /// Answer `query` without recording anything.
    ///
    /// Farewells short-circuit to the closing text. Otherwise the first topic
    /// of the query may earn a one-time follow-up question, appended after a
    /// blank line.
    pub fn respond(&mut self, query: &str) -> String {
        if TopicClassifier::is_farewell(query) {
            info!(session = %self.id, "Farewell received");
            return self.generator.knowledge().farewell().to_string();
        }

        let mut response = self.generator.generate_response(query);
        if !self.follow_ups {
            return response;
        }

        let topics = TopicClassifier::identify_topics(query);
        if let Some(follow_up) = topics
            .first()
            .and_then(|topic| self.context.generate_follow_up(*topic))
        {
            response.push_str("\n\n");
            response.push_str(&follow_up);
        }
        response
    }

    /// Handle typed input: record it, answer it, record the answer.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Some(self.exchange(input.to_string()))
    }

    /// Open a category from the menu.
    pub fn select_category(&mut self, id: &str) -> Result<&Category, ChatError> {
        let category = self
            .generator
            .knowledge()
            .category(id)
            .ok_or_else(|| ChatError::UnknownCategory(id.to_string()))?;

        self.context
            .add_message(Message::user(format!("Tell me about {}", category.name)));
        self.context.add_message(Message::bot(format!(
            "Here are specific questions about {}:",
            category.name
        )));
        self.selected = Some(category.id.clone());
        debug!(session = %self.id, category = %category.id, "Category selected");
        Ok(category)
    }

    /// Ask preset question `index` of a category as if it had been typed.
    pub fn ask_preset(&mut self, category_id: &str, index: usize) -> Result<String, ChatError> {
        let text = self
            .generator
            .knowledge()
            .question(category_id, index)?
            .text
            .clone();
        Ok(self.exchange(text))
    }

    /// Leave the current category and show the menu prompt.
    pub fn back_to_categories(&mut self) -> &'static str {
        self.selected = None;
        self.context.add_message(Message::bot(CATEGORY_PROMPT));
        CATEGORY_PROMPT
    }

    fn exchange(&mut self, input: String) -> String {
        self.context.add_message(Message::user(input.clone()));
        let response = self.respond(&input);
        self.context.add_message(Message::bot(response.clone()));
        response
    }
}

// =============================================================================
// Tests
// =============================================================================
