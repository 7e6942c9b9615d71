// handlers/track/listings.rs - POST /track/listings handler

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::Instrument;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::services::{ListingService, ListingsResponse};
use crate::track::Credentials;

/// Request body. Fields are optional here so a missing one becomes a 400
/// with our own envelope rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsRequest {
    pub domain: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl ListingsRequest {
    pub fn into_credentials(self) -> Result<Credentials, ApiError> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        match (present(self.domain), present(self.api_key), present(self.api_secret)) {
            (Some(domain), Some(api_key), Some(api_secret)) => {
                Ok(Credentials::new(domain, api_key, api_secret)?)
            }
            (domain, api_key, api_secret) => {
                let missing: Vec<&str> = [
                    ("domain", domain.is_none()),
                    ("apiKey", api_key.is_none()),
                    ("apiSecret", api_secret.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();

                Err(ApiError::validation_error(
                    "domain, apiKey, apiSecret are required",
                    Some(json!({ "missing": missing })),
                ))
            }
        }
    }
}

/**
 * POST /track/listings - Aggregate every active unit of a Track tenant
 *
 * Input:
 * ```json
 * { "domain": "acme", "apiKey": "...", "apiSecret": "..." }
 * ```
 *
 * Output (200):
 * ```json
 * { "count": 1, "listings": [{ "id": 42, "name": "Beach House", "picture": "https://..." }] }
 * ```
 *
 * 400 when a credential is missing or the body is not JSON, 500 when the
 * Track API fails (upstream status and body under `detail`).
 */
pub async fn listings_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ListingsRequest>, JsonRejection>,
) -> ApiResult<ListingsResponse> {
    let Json(request) = payload?;
    let credentials = request.into_credentials()?;

    tracing::info!(domain = %credentials.domain(), "Aggregating listings");

    let service = ListingService::for_tenant(state.http.clone(), &state.upstream, &credentials)?;
    let response = service
        .aggregate()
        .instrument(tracing::info_span!("track_listings", domain = %credentials.domain()))
        .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(domain: Option<&str>, key: Option<&str>, secret: Option<&str>) -> ListingsRequest {
        ListingsRequest {
            domain: domain.map(String::from),
            api_key: key.map(String::from),
            api_secret: secret.map(String::from),
        }
    }

    #[test]
    fn reports_every_missing_field() {
        let err = request(Some("acme"), None, Some("  ")).into_credentials().unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.detail(), Some(&json!({ "missing": ["apiKey", "apiSecret"] })));
    }

    #[test]
    fn accepts_complete_credentials() {
        let creds = request(Some("acme"), Some("key"), Some("secret"))
            .into_credentials()
            .unwrap();
        assert_eq!(creds.domain(), "acme");
    }

    #[test]
    fn rejects_host_injection_in_domain() {
        let err = request(Some("evil.com/x"), Some("key"), Some("secret"))
            .into_credentials()
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
