use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::lenient;

/// Decode each array item on its own; items that fail are logged and skipped
fn decode_each<T: DeserializeOwned>(name: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(collection = name, index, error = %e, "Skipping undecodable item");
                None
            }
        })
        .collect()
}

/// HAL-style collection: items live under `_embedded.<name>`
#[derive(Debug, Default, Deserialize)]
pub struct Collection {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Map<String, Value>>,
}

impl Collection {
    /// Take the embedded array called `name`; missing or null is empty.
    /// A single bad item is dropped instead of failing the page.
    pub fn items<T: DeserializeOwned>(self, name: &str) -> Result<Vec<T>, serde_json::Error> {
        match self.embedded.and_then(|mut embedded| embedded.remove(name)) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(decode_each(name, items)),
            Some(other) => serde_json::from_value(other),
        }
    }
}

/// A rentable property record as the PMS returns it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit_code: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub street_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub extended_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub locality: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub full_bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub half_bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub bed_types: Option<Vec<BedType>>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: Option<bool>,

    /// Free-form key/value bag (wifi, housekeeping, ...)
    #[serde(default, deserialize_with = "lenient::object")]
    pub custom_data: Map<String, Value>,
    /// Older tenants send the same bag as `custom`
    #[serde(default, deserialize_with = "lenient::object")]
    pub custom: Map<String, Value>,
}

impl Unit {
    /// Path segment for per-unit sub-resources
    pub fn id_segment(&self) -> Option<String> {
        match &self.id {
            Value::Number(n) => Some(
                n.as_u64()
                    .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < 9.0e15).map(|f| f as u64))
                    .map_or_else(|| n.to_string(), |id| id.to_string()),
            ),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// `custom` and `customData` merged; `customData` wins on shared keys
    pub fn custom_properties(&self) -> Map<String, Value> {
        let mut merged = self.custom.clone();
        merged.extend(self.custom_data.clone());
        merged
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedType {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: Option<u32>,
}

/// Entry of `/units/{id}/images`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
}

/// Entry of `/units/{id}/assets`; only some of these are images
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_primary: Option<bool>,
}

impl Asset {
    pub fn is_image(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("image"))
            || self
                .mime_type
                .as_deref()
                .is_some_and(|mime| mime.to_ascii_lowercase().starts_with("image/"))
    }
}

/// Primary image asset if one is flagged, else the first image asset
pub fn primary_image_url(assets: &[Asset]) -> Option<String> {
    let images: Vec<&Asset> = assets.iter().filter(|asset| asset.is_image()).collect();
    images
        .iter()
        .find(|asset| asset.is_primary == Some(true))
        .or_else(|| images.first())
        .and_then(|asset| asset.url.clone())
}
