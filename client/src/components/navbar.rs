//! Top navigation bar: links, sign-in button and the farmer profile menu.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::state::session::SessionState;
use crate::state::ui::{NAV_ITEMS, UiState, is_active};

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let pathname = use_location().pathname;

    let on_logout = move |_| {
        let token = crate::util::storage::load_token();
        crate::util::storage::clear_token();
        session.update(SessionState::sign_out);
        ui.update(UiState::close_menus);

        #[cfg(feature = "hydrate")]
        if let Some(token) = token {
            leptos::task::spawn_local(async move {
                crate::net::api::logout(&token).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    };

    let display_name = move || session.get().display_name.unwrap_or_default();

    view! {
        <nav class="navbar">
            <A href="/" attr:class="navbar__brand" on:click=move |_| ui.update(UiState::close_menus)>
                <span class="navbar__logo">"AM"</span>
                <span class="navbar__title">"AgriMithra"</span>
            </A>

            <button
                class="navbar__hamburger"
                aria-label="Menu"
                on:click=move |_| ui.update(|u| u.mobile_menu_open = !u.mobile_menu_open)
            >
                "☰"
            </button>

            <ul class="navbar__links" class:navbar__links--open=move || ui.get().mobile_menu_open>
                {NAV_ITEMS
                    .iter()
                    .map(|item| {
                        let item = *item;
                        view! {
                            <li>
                                <A
                                    href=item.path
                                    attr:class=move || {
                                        if is_active(&item, &pathname.get()) {
                                            "navbar__link navbar__link--active"
                                        } else {
                                            "navbar__link"
                                        }
                                    }
                                    on:click=move |_| ui.update(UiState::close_menus)
                                >
                                    {item.label}
                                </A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="navbar__session">
                <Show
                    when=move || session.get().logged_in()
                    fallback=move || {
                        view! {
                            <button class="btn navbar__login" on:click=move |_| ui.update(UiState::open_sign_in)>
                                "Login"
                            </button>
                        }
                    }
                >
                    <button
                        class="navbar__avatar"
                        title=display_name
                        on:click=move |_| ui.update(|u| u.profile_menu_open = !u.profile_menu_open)
                    >
                        "👨‍🌾"
                    </button>
                    <Show when=move || ui.get().profile_menu_open>
                        <div class="navbar__profile-menu">
                            <p class="navbar__profile-name">"👨‍🌾 Farmer " {display_name}</p>
                            <button class="navbar__profile-item" on:click=move |_| ui.update(UiState::close_menus)>
                                "My Profile"
                            </button>
                            <button class="navbar__profile-item navbar__logout" on:click=on_logout>
                                "Logout"
                            </button>
                        </div>
                    </Show>
                </Show>
            </div>
        </nav>
    }
}
