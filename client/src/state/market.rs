//! Market-price widget state, sorting and exact-match search.
//!
//! The "today" panel loads up to 500 recent rows once and never errors
//! visibly. Search asks the server to filter by uppercased crop and state,
//! then re-filters locally because the provider's filter is a loose match.

#[cfg(test)]
#[path = "market_test.rs"]
mod market_test;

use std::cmp::Reverse;

use time::Date;
use time::macros::format_description;

use super::request::{RequestSeq, Ticket};
use crate::net::types::{MarketFeed, MarketRecord};

/// Farmer-facing market failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    #[error("Enter both Crop & State!")]
    MissingQuery,
    #[error("No data found for this crop in this state!")]
    NoData,
    #[error("No exact match found!")]
    NoExactMatch,
    #[error("{0}")]
    Fetch(String),
}

/// A validated search, both fields trimmed and uppercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketQuery {
    pub commodity: String,
    pub state: String,
}

/// # Errors
///
/// [`MarketError::MissingQuery`] if either field is blank.
pub fn validate_query(crop: &str, state: &str) -> Result<MarketQuery, MarketError> {
    let (crop, state) = (crop.trim(), state.trim());
    if crop.is_empty() || state.is_empty() {
        return Err(MarketError::MissingQuery);
    }
    Ok(MarketQuery { commodity: crop.to_uppercase(), state: state.to_uppercase() })
}

/// Parse a provider arrival date (`DD/MM/YYYY` or `YYYY-MM-DD`).
#[must_use]
pub fn arrival_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let dmy = format_description!("[day]/[month]/[year]");
    let iso = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &dmy)
        .or_else(|_| Date::parse(raw, &iso))
        .ok()
        .or_else(|| raw.get(..10).and_then(|head| Date::parse(head, &iso).ok()))
}

/// Newest arrival first. Stable; unparseable dates go last.
pub fn sort_by_arrival_desc(records: &mut [MarketRecord]) {
    records.sort_by_cached_key(|r| {
        let date = arrival_date(&r.arrival_date);
        (date.is_none(), Reverse(date))
    });
}

/// Rows whose commodity and state equal the query, ignoring case. Record
/// fields are compared as sent; only the query is trimmed.
#[must_use]
pub fn exact_match(records: &[MarketRecord], query: &MarketQuery) -> Vec<MarketRecord> {
    records
        .iter()
        .filter(|r| r.commodity.to_uppercase() == query.commodity && r.state.to_uppercase() == query.state)
        .cloned()
        .collect()
}

// =============================================================================
// SOURCE
// =============================================================================

#[allow(async_fn_in_trait)]
pub trait MarketSource {
    async fn fetch(&self, commodity: Option<&str>, state: Option<&str>) -> Result<MarketFeed, String>;
}

/// [`MarketSource`] backed by the server proxy.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpMarket;

impl MarketSource for HttpMarket {
    async fn fetch(&self, commodity: Option<&str>, state: Option<&str>) -> Result<MarketFeed, String> {
        crate::net::api::fetch_market(commodity, state).await
    }
}

/// Unfiltered recent rows, newest first.
///
/// # Errors
///
/// The transport message when the fetch fails.
pub async fn load_latest<S: MarketSource>(source: &S) -> Result<Vec<MarketRecord>, String> {
    let mut records = source.fetch(None, None).await?.records;
    sort_by_arrival_desc(&mut records);
    Ok(records)
}

/// Server-filtered, locally exact-matched rows, newest first.
///
/// # Errors
///
/// [`MarketError::NoData`] when the server returns nothing,
/// [`MarketError::NoExactMatch`] when the local filter removes everything.
pub async fn search<S: MarketSource>(source: &S, query: &MarketQuery) -> Result<Vec<MarketRecord>, MarketError> {
    let mut records = source
        .fetch(Some(&query.commodity), Some(&query.state))
        .await
        .map_err(MarketError::Fetch)?
        .records;
    if records.is_empty() {
        return Err(MarketError::NoData);
    }
    sort_by_arrival_desc(&mut records);
    let matched = exact_match(&records, query);
    if matched.is_empty() {
        return Err(MarketError::NoExactMatch);
    }
    Ok(matched)
}

// =============================================================================
// STATE
// =============================================================================

/// Market widget state.
#[derive(Clone, Debug, Default)]
pub struct MarketState {
    pub crop: String,
    pub state_name: String,
    /// The "today" panel.
    pub latest: Vec<MarketRecord>,
    pub results: Vec<MarketRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub latest_seq: RequestSeq,
    pub search_seq: RequestSeq,
}

impl MarketState {
    pub fn begin_latest(&mut self) -> Ticket {
        self.latest_seq.issue()
    }

    /// Apply the "today" load. Failures are logged and leave the panel empty.
    pub fn finish_latest(&mut self, ticket: Ticket, result: Result<Vec<MarketRecord>, String>) -> bool {
        if !self.latest_seq.is_current(ticket) {
            return false;
        }
        match result {
            Ok(records) => self.latest = records,
            Err(e) => {
                leptos::logging::warn!("Error loading today prices: {e}");
                self.latest.clear();
            }
        }
        true
    }

    /// Validate the form and start a search. On a validation failure the
    /// error is set and no ticket is issued.
    pub fn begin_search(&mut self) -> Option<(Ticket, MarketQuery)> {
        match validate_query(&self.crop, &self.state_name) {
            Ok(query) => {
                self.loading = true;
                self.results.clear();
                self.error = None;
                Some((self.search_seq.issue(), query))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn finish_search(&mut self, ticket: Ticket, result: Result<Vec<MarketRecord>, MarketError>) -> bool {
        if !self.search_seq.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => self.results = records,
            Err(e) => self.error = Some(e.to_string()),
        }
        true
    }
}

// =============================================================================
// DISPLAY
// =============================================================================

#[must_use]
pub fn crop_icon_url(commodity: &str) -> String {
    let slug: String = commodity.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
    format!("https://img.icons8.com/color/96/{slug}.png")
}

/// `₹2400/quintal`
#[must_use]
pub fn price_label(record: &MarketRecord) -> String {
    format!("₹{}/quintal", record.modal_price.as_deref().unwrap_or("-"))
}
