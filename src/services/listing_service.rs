use serde::{Deserialize, Serialize};

use crate::config::UpstreamConfig;
use crate::listings::{filter, images, to_listing, Listing};
use crate::track::paginator::fetch_all_units;
use crate::track::{Credentials, TrackClient, TrackError, UnitSource};

/// Response body of `POST /track/listings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub count: usize,
    pub listings: Vec<Listing>,
}

impl ListingsResponse {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            count: listings.len(),
            listings,
        }
    }
}

/// Paginate, filter, resolve images and transform, in that order
pub struct ListingService<S> {
    source: S,
    page_size: u32,
    max_pages: u32,
    image_concurrency: usize,
}

impl ListingService<TrackClient> {
    /// Service talking to the live PMS for one tenant
    pub fn for_tenant(
        http: reqwest::Client,
        config: &UpstreamConfig,
        credentials: &Credentials,
    ) -> Result<Self, TrackError> {
        let client = TrackClient::new(http, config, credentials)?;
        Ok(Self::new(client, config))
    }
}

impl<S: UnitSource> ListingService<S> {
    pub fn new(source: S, config: &UpstreamConfig) -> Self {
        Self {
            source,
            page_size: config.page_size,
            max_pages: config.max_pages,
            image_concurrency: config.image_concurrency,
        }
    }

    pub async fn aggregate(&self) -> Result<ListingsResponse, TrackError> {
        let units = fetch_all_units(&self.source, self.page_size, self.max_pages).await?;
        let total = units.len();

        let active = filter::active_units(units);
        tracing::info!(total, active = active.len(), "Fetched units");

        let resolved = images::resolve_pictures(&self.source, active, self.image_concurrency).await;
        let listings: Vec<Listing> = resolved
            .into_iter()
            .map(|(unit, picture)| to_listing(&unit, picture))
            .collect();

        let with_picture = listings.iter().filter(|l| l.picture.is_some()).count();
        tracing::info!(count = listings.len(), with_picture, "Built listings");

        Ok(ListingsResponse::new(listings))
    }
}
