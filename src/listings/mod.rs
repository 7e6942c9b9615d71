//! Listing pipeline stages: active filter, cover image resolution and the
//! unit -> listing field mapping.

pub mod filter;
pub mod images;
pub mod transform;

pub use transform::{to_listing, Listing};
