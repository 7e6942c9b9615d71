pub mod config;
pub mod listings;
