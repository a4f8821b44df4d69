//! # client
//!
//! Leptos front end for AgriMithra: home feeds, weather, market prices,
//! leaf disease detection and the voice-enabled farming assistant.
//!
//! The same crate is compiled twice. With `ssr` the server renders the
//! [`app::App`] shell; with `hydrate` it is built to WASM and [`hydrate`]
//! attaches to the server-rendered markup.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
