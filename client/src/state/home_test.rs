use futures::executor::block_on;

use super::*;

struct FakeFeeds {
    news: Result<usize, String>,
    schemes: Result<usize, String>,
}

fn feed(n: usize) -> Feed {
    Feed {
        articles: (0..n)
            .map(|i| Article { title: Some(format!("item {i}")), ..Article::default() })
            .collect(),
    }
}

impl FeedSource for FakeFeeds {
    async fn news(&self) -> Result<Feed, String> {
        self.news.clone().map(feed)
    }

    async fn schemes(&self) -> Result<Feed, String> {
        self.schemes.clone().map(feed)
    }
}

#[test]
fn short_description_unchanged() {
    assert_eq!(truncate_description("Rain expected"), "Rain expected");
}

#[test]
fn long_description_truncated_on_char_boundary() {
    let text = "ಮ".repeat(100);
    let short = truncate_description(&text);
    assert_eq!(short.chars().count(), DESCRIPTION_LIMIT + 3);
    assert!(short.ends_with("..."));
}

#[test]
fn exactly_limit_is_not_truncated() {
    let text = "a".repeat(DESCRIPTION_LIMIT);
    assert_eq!(truncate_description(&text), text);
}

#[test]
fn load_caps_each_feed() {
    let state = block_on(HomeState::load(&FakeFeeds { news: Ok(20), schemes: Ok(3) }));
    assert_eq!(state.news.len(), FEED_LIMIT);
    assert_eq!(state.schemes.len(), 3);
    assert_eq!(state.error, None);
}

#[test]
fn news_failure_stops_load() {
    let state = block_on(HomeState::load(&FakeFeeds { news: Err("502".into()), schemes: Ok(3) }));
    assert!(state.schemes.is_empty());
    assert_eq!(state.error.as_deref(), Some(FEED_ERROR));
}

#[test]
fn schemes_failure_keeps_news() {
    let state = block_on(HomeState::load(&FakeFeeds { news: Ok(2), schemes: Err("503".into()) }));
    assert_eq!(state.news.len(), 2);
    assert_eq!(state.error.as_deref(), Some(FEED_ERROR));
}
