//! Landing page: welcome banner plus the news and schemes feeds.

use leptos::prelude::*;

use crate::net::types::Article;
use crate::state::home::{HomeState, truncate_description};

#[component]
pub fn HomePage() -> impl IntoView {
    let home = RwSignal::new(HomeState { loading: true, ..HomeState::default() });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let loaded = HomeState::load(&crate::state::home::HttpFeeds).await;
        home.set(loaded);
    });

    view! {
        <div class="home-page">
            <section class="home-hero">
                <h1>"AgriMithra"</h1>
                <h2>"Welcome Farmers"</h2>
                <p>"Find weather, market prices, disease detection and an assistant below."</p>
            </section>

            <Show when=move || home.get().error.is_some()>
                <p class="home-error">{move || home.get().error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || home.get().loading>
                <p class="home-loading">"Loading..."</p>
            </Show>

            <FeedSection title="Latest Agriculture News" articles=Signal::derive(move || home.get().news)/>
            <FeedSection title="Government Schemes" articles=Signal::derive(move || home.get().schemes)/>
        </div>
    }
}

#[component]
fn FeedSection(title: &'static str, articles: Signal<Vec<Article>>) -> impl IntoView {
    view! {
        <section class="feed">
            <h2 class="feed__title">{title}</h2>
            <div class="feed__grid">
                {move || articles.get().into_iter().map(|article| view! { <ArticleCard article/> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ArticleCard(article: Article) -> impl IntoView {
    let Article { title, description, url, image_url } = article;
    let description = description.as_deref().map(truncate_description).unwrap_or_default();

    view! {
        <article class="feed-card">
            {image_url.map(|src| view! { <img class="feed-card__image" src=src alt=""/> })}
            <h3 class="feed-card__title">{title.unwrap_or_default()}</h3>
            <p class="feed-card__description">{description}</p>
            {url.map(|href| view! {
                <a class="feed-card__link" href=href target="_blank" rel="noopener noreferrer">
                    "Read More →"
                </a>
            })}
        </article>
    }
}
