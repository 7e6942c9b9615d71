use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the cover image for a unit comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// `GET /units/{id}/images?page=1&size=1`, first entry wins
    Images,
    /// `GET /units/{id}/assets`, primary image asset wins
    Assets,
}

impl std::str::FromStr for ImageSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "images" | "image" => Ok(ImageSource::Images),
            "assets" | "asset" => Ok(ImageSource::Assets),
            other => Err(format!("unknown image source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL template; `{domain}` is replaced with the caller's subdomain
    pub base_url: String,
    pub page_size: u32,
    /// Safety valve against an upstream that never returns an empty page
    pub max_pages: u32,
    /// Status the PMS answers with once `page` runs past the last page
    pub invalid_page_status: u16,
    pub image_source: ImageSource,
    pub image_concurrency: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://{domain}.trackhs.com".to_string(),
            page_size: 100,
            max_pages: 1000,
            invalid_page_status: 409,
            image_source: ImageSource::Images,
            image_concurrency: 1,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("TRACK_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Upstream overrides
        if let Ok(v) = env::var("TRACK_BASE_URL") {
            self.upstream.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("TRACK_PAGE_SIZE") {
            self.upstream.page_size = v.parse().unwrap_or(self.upstream.page_size);
        }
        if let Ok(v) = env::var("TRACK_MAX_PAGES") {
            self.upstream.max_pages = v.parse().unwrap_or(self.upstream.max_pages);
        }
        if let Ok(v) = env::var("TRACK_INVALID_PAGE_STATUS") {
            self.upstream.invalid_page_status = v.parse().unwrap_or(self.upstream.invalid_page_status);
        }
        if let Ok(v) = env::var("TRACK_IMAGE_SOURCE") {
            match v.parse() {
                Ok(source) => self.upstream.image_source = source,
                Err(e) => tracing::warn!("Ignoring TRACK_IMAGE_SOURCE: {}", e),
            }
        }
        if let Ok(v) = env::var("TRACK_IMAGE_CONCURRENCY") {
            self.upstream.image_concurrency = v.parse().unwrap_or(self.upstream.image_concurrency);
        }
        if let Ok(v) = env::var("TRACK_CONNECT_TIMEOUT_SECS") {
            self.upstream.connect_timeout_secs = v.parse().unwrap_or(self.upstream.connect_timeout_secs);
        }
        if let Ok(v) = env::var("TRACK_REQUEST_TIMEOUT_SECS") {
            self.upstream.request_timeout_secs = v.parse().unwrap_or(self.upstream.request_timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self.upstream.image_concurrency = self.upstream.image_concurrency.max(1);
        self.upstream.page_size = self.upstream.page_size.max(1);
        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            upstream: UpstreamConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            upstream: UpstreamConfig {
                max_pages: 500,
                ..UpstreamConfig::default()
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            upstream: UpstreamConfig {
                max_pages: 500,
                connect_timeout_secs: 5,
                request_timeout_secs: 20,
                ..UpstreamConfig::default()
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
