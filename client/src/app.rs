//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{navbar::Navbar, sign_in_modal::SignInModal};
use crate::pages::{
    assistant::AssistantPage, disease::DiseasePage, home::HomePage, market::MarketPage, weather::WeatherPage,
};
use crate::state::{session::SessionState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and UI chrome contexts. A stored token is checked
/// against `/auth/me` on load so a returning farmer stays signed in.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let ui = RwSignal::new(UiState::default());
    provide_context(session);
    provide_context(ui);

    #[cfg(feature = "hydrate")]
    if let Some(token) = crate::util::storage::load_token() {
        leptos::task::spawn_local(async move {
            use crate::net::api::TokenCheck;
            match crate::net::api::fetch_me(&token).await {
                TokenCheck::Valid(user) => session.update(|s| s.restore(&user)),
                TokenCheck::Rejected => crate::util::storage::clear_token(),
                TokenCheck::Unavailable => leptos::logging::warn!("session check unavailable, keeping token"),
            }
        });
    }

    let close_sign_in = Callback::new(move |()| ui.update(|u| u.sign_in_open = false));

    view! {
        <Stylesheet id="leptos" href="/pkg/agrimithra.css"/>
        <Title text="AgriMithra"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("assistant") view=AssistantPage/>
                    <Route path=StaticSegment("weather") view=WeatherPage/>
                    <Route path=StaticSegment("market") view=MarketPage/>
                    <Route path=StaticSegment("disease") view=DiseasePage/>
                </Routes>
            </main>
            <Show when=move || ui.get().sign_in_open>
                <SignInModal on_close=close_sign_in/>
            </Show>
        </Router>
    }
}
