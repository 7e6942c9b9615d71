use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

use super::error::TrackError;

/// Per-request tenant credentials for the Track PMS API.
///
/// Never persisted; the secret is redacted from `Debug` output so the value
/// can travel through tracing spans safely.
#[derive(Clone)]
pub struct Credentials {
    domain: String,
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(
        domain: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, TrackError> {
        let domain = domain.into().trim().to_ascii_lowercase();
        validate_domain(&domain)?;

        Ok(Self {
            domain,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `Authorization` header value: `Basic base64(key:secret)`
    pub fn authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// The domain is spliced into the upstream host name, so it has to be a
/// single DNS label.
pub fn validate_domain(domain: &str) -> Result<(), TrackError> {
    if domain.is_empty() || domain.len() > 63 {
        return Err(TrackError::InvalidDomain(
            "domain must be between 1 and 63 characters".to_string(),
        ));
    }

    if !domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(TrackError::InvalidDomain(format!(
            "'{}' may only contain letters, numbers and hyphens",
            domain
        )));
    }

    if domain.starts_with('-') || domain.ends_with('-') {
        return Err(TrackError::InvalidDomain(format!(
            "'{}' cannot start or end with a hyphen",
            domain
        )));
    }

    Ok(())
}
