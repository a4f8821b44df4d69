//! Assistant widget state: transcript, language and voice toggles.
//!
//! DESIGN
//! ======
//! The transcript is append-only. Every accepted user message is answered by
//! exactly one bot message, so replies are never dropped as stale; a failed
//! or empty reply is replaced by the localized fallback.

#[cfg(test)]
#[path = "assistant_test.rs"]
mod assistant_test;

use wire::{ChatReply, Language};

use crate::util::speech::clean_for_speech;

pub const GREETING: &str = "Hi — I am Agri Assistant 🌾. Ask me anything about farming.";

/// Localized strings for the assistant widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssistantText {
    pub speak_toggle: &'static str,
    pub placeholder: &'static str,
    pub note: &'static str,
    pub fallback: &'static str,
    pub speech_unsupported: &'static str,
}

const EN_TEXT: AssistantText = AssistantText {
    speak_toggle: "Speak answers",
    placeholder: "Ask your question...",
    note: "Tip: Answers from Gemini AI",
    fallback: "AI couldn’t answer. Please try again.",
    speech_unsupported: "Speech not supported",
};

const KN_TEXT: AssistantText = AssistantText {
    speak_toggle: "ಉತ್ತರವನ್ನು ಓದಿ",
    placeholder: "ನಿಮ್ಮ ಪ್ರಶ್ನೆ...",
    note: "ಸೂಚನೆ: ಉತ್ತರಗಳು Gemini AI ಬಳಸಿ ಬರುತ್ತವೆ",
    fallback: "AI ಉತ್ತರ ಸಿಗಲಿಲ್ಲ. ದಯವಿಟ್ಟು ಮತ್ತೆ ಪ್ರಯತ್ನಿಸಿ.",
    speech_unsupported: "ಧ್ವನಿ ಬೆಂಬಲ ಲಭ್ಯವಿಲ್ಲ",
};

#[must_use]
pub fn text_for(language: Language) -> &'static AssistantText {
    match language {
        Language::En => &EN_TEXT,
        Language::Kn => &KN_TEXT,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

/// Ordered, append-only list of chat messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A transcript opened by the bot greeting.
    #[must_use]
    pub fn with_greeting(timestamp: String) -> Self {
        let mut t = Self::default();
        t.push(Sender::Bot, GREETING.to_owned(), timestamp);
        t
    }

    fn push(&mut self, sender: Sender, text: String, timestamp: String) {
        self.messages.push(ChatMessage { sender, text, timestamp });
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The reply to show and speak: the backend text, or the fallback when the
/// call failed or nothing speakable came back.
#[must_use]
pub fn resolve_reply(result: Result<ChatReply, String>, language: Language) -> String {
    match result {
        Ok(reply) if !clean_for_speech(&reply.reply).is_empty() => reply.reply.trim().to_owned(),
        Ok(_) => text_for(language).fallback.to_owned(),
        Err(e) => {
            leptos::logging::warn!("assistant request failed: {e}");
            text_for(language).fallback.to_owned()
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait AssistantSource {
    async fn chat(&self, message: &str, language: Language) -> Result<ChatReply, String>;
}

/// [`AssistantSource`] backed by `POST /assistant/chat`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAssistant;

impl AssistantSource for HttpAssistant {
    async fn chat(&self, message: &str, language: Language) -> Result<ChatReply, String> {
        crate::net::api::send_chat(message, language).await
    }
}

/// Ask and resolve in one step.
pub async fn ask<S: AssistantSource>(source: &S, message: &str, language: Language) -> String {
    resolve_reply(source.chat(message, language).await, language)
}

// =============================================================================
// STATE
// =============================================================================

/// Assistant widget state.
#[derive(Clone, Debug)]
pub struct AssistantState {
    pub language: Language,
    pub input: String,
    pub transcript: Transcript,
    pub speak_replies: bool,
    pub listening: bool,
    /// Replies still outstanding.
    pub pending: usize,
}

impl Default for AssistantState {
    fn default() -> Self {
        Self::new(Language::En, String::new())
    }
}

impl AssistantState {
    #[must_use]
    pub fn new(language: Language, greeting_time: String) -> Self {
        Self {
            language,
            input: String::new(),
            transcript: Transcript::with_greeting(greeting_time),
            speak_replies: true,
            listening: false,
            pending: 0,
        }
    }

    #[must_use]
    pub fn text(&self) -> &'static AssistantText {
        text_for(self.language)
    }

    /// Accept a message (the override, e.g. a voice transcript, or the input
    /// box). Blank messages are ignored. On success the input is cleared, the
    /// user message is appended and the text to send is returned.
    pub fn begin_send(&mut self, override_text: Option<&str>, timestamp: String) -> Option<String> {
        let text = override_text.unwrap_or(&self.input).trim().to_owned();
        if text.is_empty() {
            return None;
        }
        self.input.clear();
        self.transcript.push(Sender::User, text.clone(), timestamp);
        self.pending += 1;
        Some(text)
    }

    /// Append the bot reply for one earlier [`Self::begin_send`].
    pub fn finish_send(&mut self, reply: String, timestamp: String) {
        self.pending = self.pending.saturating_sub(1);
        self.transcript.push(Sender::Bot, reply, timestamp);
    }
}
