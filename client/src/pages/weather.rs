//! Weather page: city search or device location, then current conditions,
//! the five-day outlook, today's highlights and the hourly strip.

use leptos::prelude::*;

use crate::net::types::{Condition, ForecastSample};
use crate::state::weather::{WeatherSnapshot, WeatherState, aqi_label, celsius, icon_url, pollutant, visibility_km};
use crate::util::datetime::{clock, day_label};

#[component]
pub fn WeatherPage() -> impl IntoView {
    let weather = RwSignal::new(WeatherState::default());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if weather.get_untracked().loading {
            return;
        }
        let Some((ticket, city)) = weather.try_update(WeatherState::begin_search).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::state::weather::{HttpWeather, load_city};
            let result = load_city(&HttpWeather, &city, crate::util::datetime::now_unix()).await;
            weather.update(|w| {
                w.finish(ticket, result);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (ticket, city);
    };

    let on_locate = move |_| {
        if weather.get_untracked().loading {
            return;
        }
        let Some(ticket) = weather.try_update(WeatherState::begin_locate) else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::state::weather::{HttpWeather, load_coords};
            let result = match crate::util::geo::current_position().await {
                Ok(coords) => load_coords(&HttpWeather, coords, crate::util::datetime::now_unix()).await,
                Err(e) => Err(e),
            };
            weather.update(|w| {
                w.finish(ticket, result);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = ticket;
    };

    view! {
        <div class="weather-page">
            <form class="weather-search" on:submit=on_search>
                <input
                    class="weather-search__input"
                    type="text"
                    placeholder="Enter city name"
                    prop:value=move || weather.get().city
                    on:input=move |ev| weather.update(|w| w.city = event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || weather.get().loading>
                    {move || if weather.get().loading { "Searching..." } else { "Search" }}
                </button>
                <button class="btn" type="button" on:click=on_locate disabled=move || weather.get().loading>
                    "Current location"
                </button>
            </form>

            <Show when=move || weather.get().error.is_some()>
                <p class="weather-error">{move || weather.get().error.unwrap_or_default()}</p>
            </Show>

            {move || weather.get().snapshot.map(|snapshot| view! { <WeatherReport snapshot/> })}
        </div>
    }
}

fn condition_icon(condition: Option<&Condition>) -> impl IntoView + use<> {
    condition.map(|c| {
        let src = icon_url(&c.icon);
        let alt = c.description.clone();
        view! { <img class="weather-icon" src=src alt=alt/> }
    })
}

#[component]
fn WeatherReport(snapshot: WeatherSnapshot) -> impl IntoView {
    let offset = snapshot.offset_secs();
    let current = snapshot.current;
    let air = snapshot.air_quality.current().cloned();
    let description = current.condition().map(|c| c.description.clone()).unwrap_or_default();
    let place = match current.sys.country.as_deref() {
        Some(country) => format!("{}, {country}", current.name),
        None => current.name.clone(),
    };

    view! {
        <div class="weather-report">
            <section class="weather-card weather-current">
                <h2>"Now"</h2>
                <div class="weather-current__temp">
                    <span>{celsius(current.main.temp)}</span>
                    {condition_icon(current.condition())}
                </div>
                <p class="weather-current__desc">{description}</p>
                <hr/>
                <p>"📅 " {day_label(current.dt, offset)}</p>
                <p>"📍 " {place}</p>
            </section>

            <section class="weather-card weather-daily">
                <h2>"5 days forecast"</h2>
                {snapshot
                    .daily
                    .into_iter()
                    .map(|sample| {
                        view! {
                            <div class="weather-daily__row">
                                {condition_icon(sample.condition())}
                                <span>{celsius(sample.main.temp)}</span>
                                <span>{day_label(sample.dt, offset)}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="weather-card weather-highlights">
                <h2>"Today's Highlights"</h2>
                <div class="weather-highlights__grid">
                    <div class="highlight highlight--air">
                        <h3>"Air Quality Index"</h3>
                        {air.map(|sample| {
                            let c = sample.components;
                            view! {
                                <span class="highlight__badge">{aqi_label(sample.main.aqi)}</span>
                                <dl class="highlight__pollutants">
                                    <dt>"PM2.5"</dt><dd>{pollutant(c.pm2_5)}</dd>
                                    <dt>"PM10"</dt><dd>{pollutant(c.pm10)}</dd>
                                    <dt>"NO2"</dt><dd>{pollutant(c.no2)}</dd>
                                    <dt>"O3"</dt><dd>{pollutant(c.o3)}</dd>
                                </dl>
                            }
                        })}
                    </div>
                    <div class="highlight highlight--sun">
                        <h3>"Sunrise & Sunset"</h3>
                        <p>"🌅 " {clock(current.sys.sunrise, offset)}</p>
                        <p>"🌇 " {clock(current.sys.sunset, offset)}</p>
                    </div>
                    <Highlight title="Humidity" value=format!("{:.0}%", current.main.humidity)/>
                    <Highlight title="Pressure" value=format!("{:.0}hPa", current.main.pressure)/>
                    <Highlight title="Visibility" value=current.visibility.map(visibility_km).unwrap_or_else(|| "-".to_owned())/>
                    <Highlight title="Wind Speed" value=format!("{:.1}m/s", current.wind.speed)/>
                    <Highlight title="Feels Like" value=celsius(current.main.feels_like)/>
                </div>
            </section>

            <section class="weather-card weather-hourly">
                <h2>"Today's Hourly Forecast"</h2>
                <div class="weather-hourly__strip">
                    {snapshot.hourly.into_iter().map(|sample| view! { <HourlyCell sample offset/> }).collect_view()}
                </div>
            </section>
        </div>
    }
}

#[component]
fn Highlight(title: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="highlight">
            <h3>{title}</h3>
            <p class="highlight__value">{value}</p>
        </div>
    }
}

#[component]
fn HourlyCell(sample: ForecastSample, offset: i64) -> impl IntoView {
    view! {
        <div class="weather-hourly__cell">
            <p>{clock(sample.dt, offset)}</p>
            {condition_icon(sample.condition())}
            <p>{celsius(sample.main.temp)}</p>
        </div>
    }
}
