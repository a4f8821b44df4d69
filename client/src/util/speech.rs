//! Text cleanup and browser speech synthesis/recognition.
//!
//! The text helpers are pure and run anywhere. Everything touching
//! `speechSynthesis` or `SpeechRecognition` is hydrate-only and degrades to a
//! no-op when the browser lacks the API. Recognition is not covered by
//! stable `web-sys` bindings, so it is driven through `js_sys::Reflect`.

#[cfg(test)]
#[path = "speech_test.rs"]
mod speech_test;

use wire::Language;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

/// Characters never read aloud.
const UNSPOKEN: &[char] = &['*', '#', '•', '–', '-', '—', '▶', '►', '➤'];

fn strip_heading_marker(line: &str) -> &str {
    match line.strip_prefix('#') {
        Some(_) => line.trim_start_matches('#').trim_start(),
        None => line,
    }
}

/// The line without a leading `-`, `*` or `•` list marker (which must be
/// followed by whitespace), or `None` if it has none.
fn strip_list_marker(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let mut chars = rest.chars();
    let marker = chars.next()?;
    if !matches!(marker, '-' | '*' | '•') {
        return None;
    }
    let after = chars.as_str();
    after.starts_with(char::is_whitespace).then(|| after.trim_start())
}

/// Make assistant text suitable for text-to-speech: drop heading and list
/// markers, remove decorative punctuation, and join lines with `. `.
#[must_use]
pub fn clean_for_speech(text: &str) -> String {
    let mut body = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            body.push('\n');
        }
        let line = strip_heading_marker(line);
        body.push_str(strip_list_marker(line).unwrap_or(line));
    }

    let body: String = body.replace("▶\u{fe0f}", "").chars().filter(|c| !UNSPOKEN.contains(c)).collect();

    let mut out = String::with_capacity(body.len());
    let mut newlines = 0usize;
    for c in body.chars() {
        if c == '\n' {
            newlines += 1;
            continue;
        }
        if newlines > 0 && !out.trim().is_empty() {
            out.push_str(". ");
        }
        newlines = 0;
        out.push(c);
    }
    if newlines > 0 && !out.trim().is_empty() {
        out.push_str(". ");
    }
    out.trim().to_owned()
}

/// Display lines for a chat bubble: carriage returns dropped, heading
/// markers removed, list markers normalised to `• `.
#[must_use]
pub fn format_for_display(text: &str) -> Vec<String> {
    text.replace('\r', "")
        .split('\n')
        .map(|line| {
            let line = strip_heading_marker(line);
            match strip_list_marker(line) {
                Some(item) => format!("• {item}"),
                None => line.to_owned(),
            }
        })
        .collect()
}

/// Index of the voice to use for `language`, given each voice's `lang` tag.
/// Kannada prefers a `kn` voice; everything falls back to `en-IN`, then any
/// English voice.
#[must_use]
pub fn pick_voice(voice_langs: &[String], language: Language) -> Option<usize> {
    let find = |needle: &str| {
        voice_langs
            .iter()
            .position(|lang| lang.to_ascii_lowercase().contains(needle))
    };
    let native = match language {
        Language::Kn => find("kn"),
        Language::En => None,
    };
    native.or_else(|| find("en-in")).or_else(|| find("en"))
}

// =============================================================================
// SYNTHESIS
// =============================================================================

/// Speak `text` in `language`, cancelling anything already being spoken.
/// Does nothing when the cleaned text is empty or synthesis is unavailable.
pub fn speak(text: &str, language: Language) {
    let clean = clean_for_speech(text);
    if clean.is_empty() {
        return;
    }
    #[cfg(feature = "hydrate")]
    {
        let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) else {
            return;
        };
        let Ok(utter) = web_sys::SpeechSynthesisUtterance::new_with_text(&clean) else {
            return;
        };
        utter.set_lang(language.speech_tag());

        let voices: Vec<web_sys::SpeechSynthesisVoice> = synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<web_sys::SpeechSynthesisVoice>().ok())
            .collect();
        let langs: Vec<String> = voices.iter().map(web_sys::SpeechSynthesisVoice::lang).collect();
        if let Some(idx) = pick_voice(&langs, language) {
            utter.set_voice(Some(&voices[idx]));
        }

        synth.cancel();
        synth.speak(&utter);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = language;
    }
}

/// Stop any in-progress speech.
pub fn cancel_speech() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) {
            synth.cancel();
        }
    }
}

// =============================================================================
// RECOGNITION
// =============================================================================

/// Whether the browser exposes a speech recognition constructor.
pub fn recognition_supported() -> bool {
    #[cfg(feature = "hydrate")]
    {
        recognition_constructor().is_some()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

#[cfg(feature = "hydrate")]
fn recognition_constructor() -> Option<js_sys::Function> {
    let window: JsValue = web_sys::window()?.into();
    ["SpeechRecognition", "webkitSpeechRecognition"]
        .into_iter()
        .filter_map(|name| js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok())
        .find(|ctor| ctor.is_function())
        .and_then(|ctor| ctor.dyn_into::<js_sys::Function>().ok())
}

/// A single-utterance speech recogniser.
///
/// Holds the JS callbacks so they live as long as the recogniser.
#[cfg(feature = "hydrate")]
pub struct Recognizer {
    inner: JsValue,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
}

#[cfg(feature = "hydrate")]
impl Recognizer {
    /// Build a recogniser delivering one final transcript per utterance.
    /// Returns `None` when recognition is unsupported.
    pub fn new(on_transcript: impl Fn(String) + 'static, on_stopped: impl Fn() + 'static) -> Option<Self> {
        let ctor = recognition_constructor()?;
        let inner = js_sys::Reflect::construct(&ctor, &js_sys::Array::new()).ok()?;

        let set = |key: &str, value: &JsValue| {
            let _ = js_sys::Reflect::set(&inner, &JsValue::from_str(key), value);
        };
        set("maxAlternatives", &JsValue::from_f64(1.0));
        set("continuous", &JsValue::FALSE);
        set("interimResults", &JsValue::FALSE);

        let on_result = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            if let Some(text) = first_transcript(&event) {
                on_transcript(text);
            }
        });
        let on_end = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| on_stopped());
        set("onresult", on_result.as_ref());
        set("onend", on_end.as_ref());

        Some(Self { inner, _on_result: on_result, _on_end: on_end })
    }

    fn call(&self, method: &str) {
        if let Ok(f) = js_sys::Reflect::get(&self.inner, &JsValue::from_str(method))
            && let Ok(f) = f.dyn_into::<js_sys::Function>()
        {
            let _ = f.call0(&self.inner);
        }
    }

    /// Start listening in `language`.
    pub fn start(&self, language: Language) {
        let _ = js_sys::Reflect::set(
            &self.inner,
            &JsValue::from_str("lang"),
            &JsValue::from_str(language.speech_tag()),
        );
        self.call("start");
    }

    pub fn stop(&self) {
        self.call("stop");
    }
}

#[cfg(feature = "hydrate")]
impl Drop for Recognizer {
    fn drop(&mut self) {
        self.call("abort");
    }
}

/// `event.results[0][0].transcript`
#[cfg(feature = "hydrate")]
fn first_transcript(event: &JsValue) -> Option<String> {
    let results = js_sys::Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let first = js_sys::Reflect::get_u32(&results, 0).ok()?;
    let alt = js_sys::Reflect::get_u32(&first, 0).ok()?;
    js_sys::Reflect::get(&alt, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
