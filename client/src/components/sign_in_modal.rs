//! Sign-in / registration modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! A successful login stores the bearer token and signs the session in with
//! the email as the display name. Registration creates the account and then
//! signs in the same way; it receives no token.

use leptos::prelude::*;

use crate::state::session::{Credentials, SessionState, SignInMode};
use crate::state::ui::UiState;

#[component]
pub fn SignInModal(on_close: Callback<()>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let mode = RwSignal::new(SignInMode::SignIn);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let creds = match Credentials::from_form(mode.get(), &name.get(), &email.get(), &password.get()) {
            Ok(creds) => creds,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let outcome = match &creds {
                Credentials::Login { email, password } => crate::net::api::login(email, password)
                    .await
                    .map(|token| crate::util::storage::save_token(&token.access_token)),
                Credentials::Register { name, email, password } => {
                    crate::net::api::signup(name, email, password).await.map(|_| ())
                }
            };
            busy.set(false);
            match outcome {
                Ok(()) => {
                    session.update(|s| s.sign_in(creds.identifier()));
                    ui.update(|u| u.sign_in_open = false);
                }
                Err(msg) => error.set(Some(msg)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (creds, session, ui);
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--sign-in"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev| on_keydown.run(ev)
                tabindex="0"
            >
                <h2>{move || mode.get().title()}</h2>
                <form class="sign-in-form" on:submit=on_submit>
                    <Show when=move || mode.get() == SignInMode::Register>
                        <input
                            class="sign-in-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="sign-in-input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="sign-in-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="sign-in-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || mode.get().submit_label(busy.get())}
                        </button>
                    </div>
                </form>
                <p class="sign-in-switch">
                    {move || mode.get().switch_prompt().0}
                    " "
                    <button
                        class="sign-in-switch__link"
                        type="button"
                        on:click=move |_| {
                            mode.update(|m| *m = m.toggled());
                            error.set(None);
                        }
                    >
                        {move || mode.get().switch_prompt().1}
                    </button>
                </p>
            </div>
        </div>
    }
}
