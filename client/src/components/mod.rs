pub mod market_card;
pub mod navbar;
pub mod sign_in_modal;
