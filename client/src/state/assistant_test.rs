use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

struct FakeAssistant {
    reply: Result<String, String>,
    seen: RefCell<Vec<(String, Language)>>,
}

impl FakeAssistant {
    fn replying(text: &str) -> Self {
        Self { reply: Ok(text.to_owned()), seen: RefCell::default() }
    }

    fn failing() -> Self {
        Self { reply: Err("request failed: 500".to_owned()), seen: RefCell::default() }
    }
}

impl AssistantSource for FakeAssistant {
    async fn chat(&self, message: &str, language: Language) -> Result<ChatReply, String> {
        self.seen.borrow_mut().push((message.to_owned(), language));
        self.reply.clone().map(|reply| ChatReply { reply })
    }
}

// =============================================================
// Transcript
// =============================================================

#[test]
fn transcript_opens_with_greeting() {
    let state = AssistantState::new(Language::En, "9:00 AM".into());
    let first = &state.transcript.messages()[0];
    assert_eq!(state.transcript.len(), 1);
    assert_eq!(first.sender, Sender::Bot);
    assert_eq!(first.text, GREETING);
    assert_eq!(first.timestamp, "9:00 AM");
}

#[test]
fn blank_input_is_ignored() {
    let mut state = AssistantState { input: "   ".into(), ..AssistantState::default() };
    assert_eq!(state.begin_send(None, "t".into()), None);
    assert_eq!(state.transcript.len(), 1);
    assert_eq!(state.pending, 0);
}

#[test]
fn send_appends_user_then_bot() {
    let mut state = AssistantState { input: " When to sow ragi? ".into(), ..AssistantState::default() };
    let text = state.begin_send(None, "t1".into()).unwrap();
    assert_eq!(text, "When to sow ragi?");
    assert!(state.input.is_empty());
    assert_eq!(state.pending, 1);

    state.finish_send("June to July.".into(), "t2".into());
    let senders: Vec<_> = state.transcript.messages().iter().map(|m| m.sender).collect();
    assert_eq!(senders, [Sender::Bot, Sender::User, Sender::Bot]);
    assert_eq!(state.pending, 0);
}

#[test]
fn override_text_wins_over_input() {
    let mut state = AssistantState { input: "typed".into(), ..AssistantState::default() };
    assert_eq!(state.begin_send(Some(" spoken "), "t".into()).as_deref(), Some("spoken"));
}

#[test]
fn overlapping_sends_each_get_a_reply() {
    let mut state = AssistantState::default();
    state.begin_send(Some("one"), "t".into());
    state.begin_send(Some("two"), "t".into());
    state.finish_send("a".into(), "t".into());
    state.finish_send("b".into(), "t".into());
    assert_eq!(state.transcript.len(), 5);
    assert_eq!(state.pending, 0);
}

// =============================================================
// Replies
// =============================================================

#[test]
fn ask_sends_message_and_language() {
    let source = FakeAssistant::replying("Use drip irrigation.");
    let reply = block_on(ask(&source, "water?", Language::Kn));
    assert_eq!(reply, "Use drip irrigation.");
    assert_eq!(*source.seen.borrow(), [("water?".to_owned(), Language::Kn)]);
}

#[test]
fn failed_reply_uses_localized_fallback() {
    let source = FakeAssistant::failing();
    assert_eq!(block_on(ask(&source, "q", Language::En)), "AI couldn’t answer. Please try again.");
    assert_eq!(block_on(ask(&source, "q", Language::Kn)), text_for(Language::Kn).fallback);
}

#[test]
fn empty_or_markup_only_reply_uses_fallback() {
    assert_eq!(block_on(ask(&FakeAssistant::replying("  "), "q", Language::En)), EN_TEXT.fallback);
    assert_eq!(block_on(ask(&FakeAssistant::replying("***\n##"), "q", Language::En)), EN_TEXT.fallback);
}

#[test]
fn localized_text_switches_with_language() {
    let mut state = AssistantState::default();
    assert_eq!(state.text().placeholder, "Ask your question...");
    state.language = Language::Kn;
    assert_eq!(state.text().placeholder, "ನಿಮ್ಮ ಪ್ರಶ್ನೆ...");
    assert!(state.speak_replies);
}
