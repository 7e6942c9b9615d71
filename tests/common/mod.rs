#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{json, Value};
use track_listings::app::{router, AppState};
use track_listings::config::{AppConfig, UpstreamConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Basic base64("key:secret")`
pub const AUTHORIZATION: &str = "Basic a2V5OnNlY3JldA==";

/// The real router on a free local port, talking to a stub PMS
pub struct TestApp {
    pub base_url: String,
    pub upstream: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_listings(&self, body: Value) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/track/listings"))
            .json(&body)
            .send()
            .await?;
        Ok(res)
    }

    /// Serve `units` as page `page` of the units collection
    pub async fn mount_units_page(&self, page: u32, units: Value) {
        Mock::given(method("GET"))
            .and(path("/api/pms/units"))
            .and(query_param("page", page.to_string()))
            .and(query_param("size", "100"))
            .and(header("authorization", AUTHORIZATION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "units": units },
                "page": page
            })))
            .expect(1)
            .mount(&self.upstream)
            .await;
    }

    pub async fn mount_units_status(&self, page: u32, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/pms/units"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&self.upstream)
            .await;
    }

    pub async fn mount_image(&self, unit_id: u64, url: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/pms/units/{}/images", unit_id)))
            .and(query_param("page", "1"))
            .and(query_param("size", "1"))
            .and(header("authorization", AUTHORIZATION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "images": [{ "id": 1, "url": url }] }
            })))
            .mount(&self.upstream)
            .await;
    }

    pub async fn mount_image_status(&self, unit_id: u64, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/api/pms/units/{}/images", unit_id)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.upstream)
            .await;
    }
}

pub async fn spawn_app() -> Result<TestApp> {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut UpstreamConfig)) -> Result<TestApp> {
    let upstream = MockServer::start().await;

    let mut config = AppConfig::development();
    config.upstream.base_url = upstream.uri();
    configure(&mut config.upstream);

    let state = AppState::from_config(&config)?;
    let app = router(&config, state);

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        upstream,
        client: reqwest::Client::new(),
    })
}

pub fn credentials() -> Value {
    json!({ "domain": "acme", "apiKey": "key", "apiSecret": "secret" })
}

pub fn unit(id: u64, name: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "isActive": active,
        "streetAddress": "1 Elm St",
        "locality": "Austin",
        "region": "TX",
        "postal": "78701",
        "bedrooms": 2
    })
}
