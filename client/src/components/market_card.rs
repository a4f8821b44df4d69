//! Card for one market price record.

use leptos::prelude::*;

use crate::net::types::MarketRecord;
use crate::state::market::{crop_icon_url, price_label};

#[component]
pub fn MarketCard(record: MarketRecord) -> impl IntoView {
    let icon = crop_icon_url(&record.commodity);
    let price = price_label(&record);
    let place = match record.district.as_deref().filter(|d| !d.is_empty()) {
        Some(district) => format!("{}, {district}, {}", record.market, record.state),
        None => format!("{}, {}", record.market, record.state),
    };
    let range = match (record.min_price.as_deref(), record.max_price.as_deref()) {
        (Some(min), Some(max)) => Some(format!("₹{min} - ₹{max}")),
        _ => None,
    };
    let MarketRecord { commodity, variety, arrival_date, .. } = record;
    let variety = variety.filter(|v| !v.is_empty());

    view! {
        <div class="market-card">
            <img class="market-card__icon" src=icon alt=commodity.clone()/>
            <div class="market-card__body">
                <h3 class="market-card__crop">
                    {commodity}
                    {variety.map(|v| view! { <small>" (" {v} ")"</small> })}
                </h3>
                <p class="market-card__place">"📍 " {place}</p>
                <p class="market-card__price">"💰 " {price}</p>
                {range.map(|r| view! { <p class="market-card__range">{r}</p> })}
                <p class="market-card__date">"📅 " {arrival_date}</p>
            </div>
        </div>
    }
}
