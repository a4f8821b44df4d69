use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn record(commodity: &str, state: &str, date: &str) -> MarketRecord {
    MarketRecord {
        commodity: commodity.into(),
        state: state.into(),
        market: "Mandya".into(),
        arrival_date: date.into(),
        modal_price: Some("2400".into()),
        ..MarketRecord::default()
    }
}

fn dates(records: &[MarketRecord]) -> Vec<&str> {
    records.iter().map(|r| r.arrival_date.as_str()).collect()
}

#[derive(Default)]
struct FakeMarket {
    records: Vec<MarketRecord>,
    fail: bool,
    calls: RefCell<Vec<(Option<String>, Option<String>)>>,
}

impl MarketSource for FakeMarket {
    async fn fetch(&self, commodity: Option<&str>, state: Option<&str>) -> Result<MarketFeed, String> {
        self.calls.borrow_mut().push((commodity.map(str::to_owned), state.map(str::to_owned)));
        if self.fail {
            return Err("network down".into());
        }
        Ok(MarketFeed { records: self.records.clone() })
    }
}

// =============================================================
// validate_query
// =============================================================

#[test]
fn query_requires_both_fields() {
    assert_eq!(validate_query("", "Karnataka"), Err(MarketError::MissingQuery));
    assert_eq!(validate_query("rice", "  "), Err(MarketError::MissingQuery));
    assert_eq!(MarketError::MissingQuery.to_string(), "Enter both Crop & State!");
}

#[test]
fn query_is_trimmed_and_uppercased() {
    let q = validate_query(" rice ", "karnataka").unwrap();
    assert_eq!(q, MarketQuery { commodity: "RICE".into(), state: "KARNATAKA".into() });
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn arrival_date_accepts_both_formats() {
    assert_eq!(arrival_date("05/01/2024"), arrival_date("2024-01-05"));
    assert!(arrival_date("2024-01-05T00:00:00").is_some());
    assert!(arrival_date("yesterday").is_none());
}

#[test]
fn sort_is_newest_first_with_bad_dates_last() {
    let mut records = vec![
        record("RICE", "KARNATAKA", "n/a"),
        record("RICE", "KARNATAKA", "02/01/2024"),
        record("RICE", "KARNATAKA", "2024-01-05"),
        record("RICE", "KARNATAKA", ""),
    ];
    sort_by_arrival_desc(&mut records);
    assert_eq!(dates(&records), ["2024-01-05", "02/01/2024", "n/a", ""]);
}

#[test]
fn sort_is_stable_for_equal_dates() {
    let mut records = vec![record("RICE", "A", "05/01/2024"), record("WHEAT", "B", "2024-01-05")];
    sort_by_arrival_desc(&mut records);
    assert_eq!(records[0].commodity, "RICE");
    assert_eq!(records[1].commodity, "WHEAT");
}

// =============================================================
// search
// =============================================================

#[test]
fn search_returns_exact_matches_newest_first() {
    let source = FakeMarket {
        records: vec![record("RICE", "KARNATAKA", "2024-01-02"), record("RICE", "KARNATAKA", "2024-01-05")],
        ..FakeMarket::default()
    };
    let query = validate_query("rice", "karnataka").unwrap();
    let found = block_on(search(&source, &query)).unwrap();
    assert_eq!(dates(&found), ["2024-01-05", "2024-01-02"]);
    assert_eq!(*source.calls.borrow(), [(Some("RICE".into()), Some("KARNATAKA".into()))]);
}

#[test]
fn search_filters_loose_server_matches() {
    let source = FakeMarket {
        records: vec![
            record("Rice", "Karnataka", "2024-01-02"),
            record("RICE BRAN", "KARNATAKA", "2024-01-05"),
            record("RICE", "KERALA", "2024-01-04"),
        ],
        ..FakeMarket::default()
    };
    let query = validate_query("RICE", "KARNATAKA").unwrap();
    let found = block_on(search(&source, &query)).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|r| r.commodity.to_uppercase() == "RICE" && r.state.to_uppercase() == "KARNATAKA"));
}

#[test]
fn exact_match_does_not_trim_record_fields() {
    let records = vec![
        record("RICE ", "KARNATAKA", "2024-01-01"),
        record("RICE", " KARNATAKA", "2024-01-02"),
        record("rice", "Karnataka", "2024-01-03"),
    ];
    let query = validate_query("  rice ", "karnataka").unwrap();
    assert_eq!(dates(&exact_match(&records, &query)), ["2024-01-03"]);
}

#[test]
fn search_distinguishes_no_data_from_no_match() {
    let query = validate_query("RICE", "KARNATAKA").unwrap();
    let empty = FakeMarket::default();
    assert_eq!(block_on(search(&empty, &query)), Err(MarketError::NoData));

    let other = FakeMarket { records: vec![record("WHEAT", "PUNJAB", "2024-01-01")], ..FakeMarket::default() };
    let err = block_on(search(&other, &query)).unwrap_err();
    assert_eq!(err.to_string(), "No exact match found!");
}

#[test]
fn search_transport_error_passes_through() {
    let query = validate_query("RICE", "KARNATAKA").unwrap();
    let source = FakeMarket { fail: true, ..FakeMarket::default() };
    assert_eq!(block_on(search(&source, &query)), Err(MarketError::Fetch("network down".into())));
}

#[test]
fn load_latest_is_unfiltered_and_sorted() {
    let source = FakeMarket {
        records: vec![record("ONION", "MAHARASHTRA", "01/01/2024"), record("RICE", "KARNATAKA", "03/01/2024")],
        ..FakeMarket::default()
    };
    let latest = block_on(load_latest(&source)).unwrap();
    assert_eq!(dates(&latest), ["03/01/2024", "01/01/2024"]);
    assert_eq!(*source.calls.borrow(), [(None, None)]);
}

// =============================================================
// MarketState
// =============================================================

#[test]
fn invalid_search_sets_error_without_ticket() {
    let mut state = MarketState { crop: "rice".into(), ..MarketState::default() };
    assert!(state.begin_search().is_none());
    assert_eq!(state.error.as_deref(), Some("Enter both Crop & State!"));
    assert!(!state.loading);
}

#[test]
fn search_lifecycle_clears_then_fills_results() {
    let mut state = MarketState {
        crop: "rice".into(),
        state_name: "karnataka".into(),
        results: vec![record("OLD", "X", "")],
        ..MarketState::default()
    };
    let (ticket, query) = state.begin_search().unwrap();
    assert!(state.loading);
    assert!(state.results.is_empty());
    assert_eq!(query.commodity, "RICE");

    assert!(state.finish_search(ticket, Ok(vec![record("RICE", "KARNATAKA", "2024-01-05")])));
    assert!(!state.loading);
    assert_eq!(state.results.len(), 1);
}

#[test]
fn stale_search_is_dropped() {
    let mut state = MarketState { crop: "rice".into(), state_name: "karnataka".into(), ..MarketState::default() };
    let (first, _) = state.begin_search().unwrap();
    let (second, _) = state.begin_search().unwrap();
    assert!(!state.finish_search(first, Err(MarketError::NoData)));
    assert_eq!(state.error, None);
    assert!(state.finish_search(second, Ok(vec![])));
}

#[test]
fn latest_failure_leaves_panel_empty() {
    let mut state = MarketState { latest: vec![record("RICE", "KARNATAKA", "")], ..MarketState::default() };
    let ticket = state.begin_latest();
    assert!(state.finish_latest(ticket, Err("down".into())));
    assert!(state.latest.is_empty());
    assert_eq!(state.error, None);
}

// =============================================================
// Display
// =============================================================

#[test]
fn crop_icon_url_strips_whitespace() {
    assert_eq!(crop_icon_url("Green Chilli"), "https://img.icons8.com/color/96/greenchilli.png");
}

#[test]
fn price_label_formats_rupees() {
    assert_eq!(price_label(&record("RICE", "K", "")), "₹2400/quintal");
    assert_eq!(price_label(&MarketRecord::default()), "₹-/quintal");
}
