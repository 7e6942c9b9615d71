// handlers/mod.rs - HTTP handlers
//
// Public (no credentials) → liveness endpoints
// Track (credentials in the request body) → PMS proxy endpoints

pub mod public;
pub mod track;
