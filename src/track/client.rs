use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use url::Url;

use super::auth::Credentials;
use super::error::TrackError;
use super::models::{primary_image_url, Asset, Collection, Image, Unit};
use crate::config::{ImageSource, UpstreamConfig};

/// The two upstream reads the listings pipeline needs
#[async_trait]
pub trait UnitSource: Send + Sync {
    /// One page of units. `Ok(None)` means the PMS reported the page as out
    /// of range, which callers treat as end of data.
    async fn fetch_units_page(&self, page: u32, size: u32) -> Result<Option<Vec<Unit>>, TrackError>;

    /// Cover image URL for a unit, if it has one
    async fn fetch_cover_image(&self, unit_id: &str) -> Result<Option<String>, TrackError>;
}

/// Build the shared HTTP client used for every upstream call
pub fn http_client(config: &UpstreamConfig) -> Result<reqwest::Client, TrackError> {
    let client = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .user_agent(concat!("track-listings/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Track PMS client bound to one tenant's credentials
pub struct TrackClient {
    http: reqwest::Client,
    base: Url,
    authorization: String,
    invalid_page_status: u16,
    image_source: ImageSource,
}

impl TrackClient {
    pub fn new(
        http: reqwest::Client,
        config: &UpstreamConfig,
        credentials: &Credentials,
    ) -> Result<Self, TrackError> {
        let base = Url::parse(&config.base_url.replace("{domain}", credentials.domain()))?;

        Ok(Self {
            http,
            base,
            authorization: credentials.authorization(),
            invalid_page_status: config.invalid_page_status,
            image_source: config.image_source,
        })
    }

    /// `{base}/api/pms/units[/...extra]`
    fn units_url(&self, extra: &[&str]) -> Result<Url, TrackError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["api", "pms", "units"])
            .extend(extra);
        Ok(url)
    }

    async fn get(&self, url: Url, query: &[(&str, u32)]) -> Result<reqwest::Response, TrackError> {
        tracing::debug!(%url, ?query, "GET track");
        let response = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await?;
        Ok(response)
    }

    async fn read_collection(response: reqwest::Response) -> Result<Collection, TrackError> {
        if !response.status().is_success() {
            return Err(TrackError::from_response(response).await);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl UnitSource for TrackClient {
    async fn fetch_units_page(&self, page: u32, size: u32) -> Result<Option<Vec<Unit>>, TrackError> {
        let url = self.units_url(&[])?;
        let response = self.get(url, &[("page", page), ("size", size)]).await?;

        if response.status().as_u16() == self.invalid_page_status {
            tracing::debug!(page, status = self.invalid_page_status, "Track reported invalid page");
            return Ok(None);
        }

        let units = Self::read_collection(response).await?.items("units")?;
        Ok(Some(units))
    }

    async fn fetch_cover_image(&self, unit_id: &str) -> Result<Option<String>, TrackError> {
        match self.image_source {
            ImageSource::Images => {
                let url = self.units_url(&[unit_id, "images"])?;
                let response = self.get(url, &[("page", 1), ("size", 1)]).await?;
                let images: Vec<Image> = Self::read_collection(response).await?.items("images")?;
                Ok(images.into_iter().next().and_then(|image| image.url))
            }
            ImageSource::Assets => {
                let url = self.units_url(&[unit_id, "assets"])?;
                let response = self.get(url, &[]).await?;
                let assets: Vec<Asset> = Self::read_collection(response).await?.items("assets")?;
                Ok(primary_image_url(&assets))
            }
        }
    }
}
