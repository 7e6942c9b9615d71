pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod listings;
pub mod services;
pub mod track;
