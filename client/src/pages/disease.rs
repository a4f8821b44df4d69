//! Disease page: pick or drop a leaf photo, upload it and show the
//! diagnosis with advice.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chosen `web_sys::File` is browser-only and not `Send`, so it lives in
//! a local stored value next to the page rather than in [`DiseaseState`].
//! Preview object URLs are revoked when replaced and when the page unmounts.

use leptos::prelude::*;

use crate::state::disease::{DetailLine, DetectionResult, DiseaseState, confidence_label};

#[cfg(feature = "hydrate")]
type ChosenFile = StoredValue<Option<web_sys::File>, leptos::reactive::owner::LocalStorage>;

/// Validate a chosen file, swap in its preview and remember it for upload.
#[cfg(feature = "hydrate")]
fn choose_file(disease: RwSignal<DiseaseState>, chosen: ChosenFile, file: web_sys::File) {
    let accepted = disease.try_update(|d| d.accept_file(&file.name(), &file.type_()));
    if !matches!(accepted, Some(Ok(()))) {
        return;
    }
    match web_sys::Url::create_object_url_with_blob(&file) {
        Ok(url) => {
            if let Some(old) = disease.try_update(|d| d.replace_preview(url)).flatten() {
                let _ = web_sys::Url::revoke_object_url(&old);
            }
        }
        Err(_) => leptos::logging::warn!("could not create preview for {}", file.name()),
    }
    chosen.set_value(Some(file));
}

#[component]
pub fn DiseasePage() -> impl IntoView {
    let disease = RwSignal::new(DiseaseState::default());
    let dragging = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let chosen: ChosenFile = StoredValue::new_local(None);

    #[cfg(feature = "hydrate")]
    on_cleanup(move || {
        if let Some(url) = disease.get_untracked().preview_url {
            let _ = web_sys::Url::revoke_object_url(&url);
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let file = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                choose_file(disease, chosen, file);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        #[cfg(feature = "hydrate")]
        {
            let file = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0));
            if let Some(file) = file {
                choose_file(disease, chosen, file);
            }
        }
    };

    let on_detect = move |_| {
        let ticket = match disease.try_update(DiseaseState::begin_detect) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                disease.update(|d| d.error = Some(e.to_string()));
                return;
            }
            None => return,
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match chosen.get_value() {
                Some(file) => crate::net::api::predict_disease(&file).await,
                None => Err("no file chosen".to_owned()),
            };
            let timestamp = crate::util::datetime::chat_timestamp();
            disease.update(|d| {
                d.finish_detect(ticket, result, timestamp);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = ticket;
    };

    view! {
        <div class="disease-page">
            <h1>"🌿 Plant Disease Detection"</h1>

            <label
                class="disease-drop"
                class:disease-drop--active=move || dragging.get()
                on:dragover=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    dragging.set(true);
                }
                on:dragleave=move |_| dragging.set(false)
                on:drop=on_drop
            >
                <input class="disease-drop__input" type="file" accept="image/*" on:change=on_file_change/>
                {move || match disease.get().preview_url {
                    Some(src) => view! { <img class="disease-drop__preview" src=src alt="Leaf preview"/> }.into_any(),
                    None => view! { <p>"Drag & drop a leaf photo here, or click to choose"</p> }.into_any(),
                }}
            </label>
            <Show when=move || disease.get().file_name.is_some()>
                <p class="disease-file">{move || disease.get().file_name.unwrap_or_default()}</p>
            </Show>

            <Show when=move || disease.get().error.is_some()>
                <p class="disease-error">{move || disease.get().error.unwrap_or_default()}</p>
            </Show>

            <button class="btn btn--primary" on:click=on_detect disabled=move || !disease.get().can_detect()>
                {move || if disease.get().loading { "Analyzing..." } else { "Detect Disease" }}
            </button>

            {move || disease.get().result.map(|result| view! { <DetectionReport result/> })}
        </div>
    }
}

#[component]
fn DetectionReport(result: DetectionResult) -> impl IntoView {
    let error = result.is_error();
    let confidence = result.confidence.map(confidence_label);
    let advice = result.advice;

    view! {
        <section class="disease-result" class:disease-result--error=error>
            <h2>{result.title}</h2>
            {confidence.map(|c| view! { <p class="disease-result__confidence">"Confidence: " {c}</p> })}
            {advice.map(|a| {
                view! {
                    <div class="disease-advice">
                        <h4>"Symptoms"</h4>
                        <p>{a.symptoms}</p>
                        <h4>"Treatment"</h4>
                        <p>{a.treatment}</p>
                        <h4>"Prevention"</h4>
                        <p>{a.prevention}</p>
                    </div>
                }
            })}
            <div class="disease-details">
                {result
                    .details
                    .into_iter()
                    .map(|line| match line {
                        DetailLine::Heading(section) => view! { <h4>{section.heading()}</h4> }.into_any(),
                        DetailLine::Item(text) => view! { <p class="disease-details__item">"• " {text}</p> }.into_any(),
                    })
                    .collect_view()}
            </div>
            <p class="disease-result__time">"⏱ " {result.timestamp}</p>
        </section>
    }
}
