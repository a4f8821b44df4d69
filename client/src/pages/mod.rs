pub mod assistant;
pub mod disease;
pub mod home;
pub mod market;
pub mod weather;
