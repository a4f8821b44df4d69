//! Market page: the latest mandi prices plus an exact crop and state search.

use leptos::prelude::*;

use crate::components::market_card::MarketCard;
use crate::net::types::MarketRecord;
use crate::state::market::MarketState;

#[component]
pub fn MarketPage() -> impl IntoView {
    let market = RwSignal::new(MarketState::default());

    if let Some(ticket) = market.try_update(MarketState::begin_latest) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::market::load_latest(&crate::state::market::HttpMarket).await;
            market.update(|m| {
                m.finish_latest(ticket, result);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = ticket;
    }

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if market.get_untracked().loading {
            return;
        }
        let Some((ticket, query)) = market.try_update(MarketState::begin_search).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::market::search(&crate::state::market::HttpMarket, &query).await;
            market.update(|m| {
                m.finish_search(ticket, result);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (ticket, query);
    };

    view! {
        <div class="market-page">
            <section class="market-section">
                <h2>"📅 Today Updated Market Prices"</h2>
                <RecordGrid records=Signal::derive(move || market.get().latest)/>
            </section>

            <section class="market-section">
                <h2>"🔍 Search Crop & State"</h2>
                <form class="market-search" on:submit=on_search>
                    <input
                        class="market-search__input"
                        type="text"
                        placeholder="Crop (ex: RICE)"
                        prop:value=move || market.get().crop
                        on:input=move |ev| market.update(|m| m.crop = event_target_value(&ev))
                    />
                    <input
                        class="market-search__input"
                        type="text"
                        placeholder="State (ex: KARNATAKA)"
                        prop:value=move || market.get().state_name
                        on:input=move |ev| market.update(|m| m.state_name = event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || market.get().loading>
                        {move || if market.get().loading { "Searching..." } else { "Search" }}
                    </button>
                </form>
                <Show when=move || market.get().error.is_some()>
                    <p class="market-error">"❌ " {move || market.get().error.unwrap_or_default()}</p>
                </Show>
                <RecordGrid records=Signal::derive(move || market.get().results)/>
            </section>
        </div>
    }
}

#[component]
fn RecordGrid(records: Signal<Vec<MarketRecord>>) -> impl IntoView {
    view! {
        <div class="market-grid">
            {move || records.get().into_iter().map(|record| view! { <MarketCard record/> }).collect_view()}
        </div>
    }
}
