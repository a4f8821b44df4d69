//! Home feed state: agriculture news and government schemes.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use crate::net::types::{Article, Feed};

/// Articles shown per feed.
pub const FEED_LIMIT: usize = 15;
/// Description characters shown before truncating.
pub const DESCRIPTION_LIMIT: usize = 90;
pub const FEED_ERROR: &str = "Unable to load content";

/// Shorten a description to [`DESCRIPTION_LIMIT`] characters plus `...`.
#[must_use]
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn news(&self) -> Result<Feed, String>;
    async fn schemes(&self) -> Result<Feed, String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFeeds;

impl FeedSource for HttpFeeds {
    async fn news(&self) -> Result<Feed, String> {
        crate::net::api::fetch_news().await
    }

    async fn schemes(&self) -> Result<Feed, String> {
        crate::net::api::fetch_schemes().await
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeState {
    pub news: Vec<Article>,
    pub schemes: Vec<Article>,
    pub loading: bool,
    pub error: Option<String>,
}

impl HomeState {
    /// Load news then schemes, each capped at [`FEED_LIMIT`]. The first
    /// failure stops the load and sets [`FEED_ERROR`].
    pub async fn load<S: FeedSource>(source: &S) -> Self {
        let mut state = Self::default();
        let result = async {
            state.news = cap(source.news().await?);
            state.schemes = cap(source.schemes().await?);
            Ok::<(), String>(())
        }
        .await;
        if let Err(e) = result {
            leptos::logging::warn!("home feed failed: {e}");
            state.error = Some(FEED_ERROR.to_owned());
        }
        state
    }
}

fn cap(feed: Feed) -> Vec<Article> {
    feed.articles.into_iter().take(FEED_LIMIT).collect()
}
