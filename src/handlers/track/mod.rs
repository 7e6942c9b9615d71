// handlers/track/mod.rs - Track PMS proxy endpoints (credentials in the body)

pub mod listings;

pub use listings::listings_post;
