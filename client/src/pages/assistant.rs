//! Assistant page: chat transcript with voice input and spoken replies.

use leptos::prelude::*;
use wire::Language;

use crate::state::assistant::{AssistantState, ChatMessage, Sender};
use crate::util::datetime::chat_timestamp;
use crate::util::speech::{cancel_speech, format_for_display, recognition_supported};

/// Delay between a voice transcript landing and it being sent.
#[cfg(feature = "hydrate")]
const AUTO_SEND_DELAY_MS: u32 = 600;

#[component]
pub fn AssistantPage() -> impl IntoView {
    let assistant = RwSignal::new(AssistantState::new(Language::En, chat_timestamp()));
    let mic_supported = RwSignal::new(false);

    Effect::new(move || {
        mic_supported.set(recognition_supported());
        let language = crate::util::storage::load_language();
        assistant.update(|a| a.language = language);
    });
    on_cleanup(cancel_speech);

    let send = move |override_text: Option<String>| {
        let timestamp = chat_timestamp();
        let Some(text) = assistant.try_update(|a| a.begin_send(override_text.as_deref(), timestamp)).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::state::assistant::{HttpAssistant, ask};
            let language = assistant.get_untracked().language;
            let reply = ask(&HttpAssistant, &text, language).await;
            if assistant.get_untracked().speak_replies {
                crate::util::speech::speak(&reply, language);
            }
            assistant.update(|a| a.finish_send(reply, chat_timestamp()));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = text;
    };

    #[cfg(feature = "hydrate")]
    let recognizer = StoredValue::new_local(None::<crate::util::speech::Recognizer>);

    let on_mic = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if assistant.get_untracked().listening {
                recognizer.with_value(|r| {
                    if let Some(r) = r {
                        r.stop();
                    }
                });
                return;
            }
            if recognizer.with_value(Option::is_none) {
                let built = crate::util::speech::Recognizer::new(
                    move |text: String| {
                        assistant.update(|a| a.input.clone_from(&text));
                        leptos::task::spawn_local(async move {
                            gloo_timers::future::TimeoutFuture::new(AUTO_SEND_DELAY_MS).await;
                            send(Some(text));
                        });
                    },
                    move || assistant.update(|a| a.listening = false),
                );
                recognizer.set_value(built);
            }
            cancel_speech();
            let language = assistant.get_untracked().language;
            let started = recognizer.with_value(|r| r.as_ref().map(|r| r.start(language)).is_some());
            assistant.update(|a| a.listening = started);
        }
    };

    let set_language = move |language: Language| {
        cancel_speech();
        crate::util::storage::save_language(language);
        assistant.update(|a| a.language = language);
    };

    let text = move || assistant.get().text();

    view! {
        <div class="assistant-page">
            <header class="assistant-header">
                <h1>"Agri Assistant 🌾"</h1>
                <label class="assistant-speak">
                    <input
                        type="checkbox"
                        prop:checked=move || assistant.get().speak_replies
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            if !on {
                                cancel_speech();
                            }
                            assistant.update(|a| a.speak_replies = on);
                        }
                    />
                    {move || text().speak_toggle}
                </label>
                <div class="assistant-lang">
                    <button
                        class="btn"
                        class:btn--active=move || assistant.get().language == Language::En
                        on:click=move |_| set_language(Language::En)
                    >
                        "EN"
                    </button>
                    <button
                        class="btn"
                        class:btn--active=move || assistant.get().language == Language::Kn
                        on:click=move |_| set_language(Language::Kn)
                    >
                        "KN"
                    </button>
                </div>
            </header>

            <div class="assistant-transcript">
                {move || {
                    assistant
                        .get()
                        .transcript
                        .messages()
                        .iter()
                        .cloned()
                        .map(|message| view! { <ChatBubble message/> })
                        .collect_view()
                }}
                <Show when=move || { assistant.get().pending > 0 }>
                    <p class="chat-bubble chat-bubble--bot chat-bubble--typing">"..."</p>
                </Show>
            </div>

            <form
                class="assistant-input"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    send(None);
                }
            >
                <input
                    class="assistant-input__text"
                    type="text"
                    placeholder=move || text().placeholder
                    prop:value=move || assistant.get().input
                    on:input=move |ev| assistant.update(|a| a.input = event_target_value(&ev))
                />
                <button
                    class="btn assistant-input__mic"
                    class:assistant-input__mic--listening=move || assistant.get().listening
                    type="button"
                    disabled=move || !mic_supported.get()
                    title=move || if mic_supported.get() { "" } else { text().speech_unsupported }
                    on:click=on_mic
                >
                    "🎤"
                </button>
                <button class="btn btn--primary assistant-input__send" type="submit">
                    "➤"
                </button>
            </form>
            <p class="assistant-note">{move || text().note}</p>
        </div>
    }
}

#[component]
fn ChatBubble(message: ChatMessage) -> impl IntoView {
    let class = match message.sender {
        Sender::User => "chat-bubble chat-bubble--user",
        Sender::Bot => "chat-bubble chat-bubble--bot",
    };
    let lines = format_for_display(&message.text);

    view! {
        <div class=class>
            {lines.into_iter().map(|line| view! { <p class="chat-bubble__line">{line}</p> }).collect_view()}
            <span class="chat-bubble__time">{message.timestamp}</span>
        </div>
    }
}
