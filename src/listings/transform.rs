use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::track::Unit;

/// Simplified listing handed to the app builder. Missing data is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Value,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub unit_code: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal: Option<String>,
    pub address: Option<String>,
    pub bedrooms: Option<u32>,
    pub beds: Option<u32>,
    pub bathrooms: Option<u32>,
    pub half_bathrooms: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub wifi_name: Option<String>,
    pub wifi_password: Option<String>,
    pub clean_status: Option<String>,
    pub picture: Option<String>,
}

/// Custom-property keys probed for each derived field. Matching is
/// case-insensitive and the first key present wins.
pub struct PropertyKeys {
    pub wifi_name: &'static [&'static str],
    pub wifi_password: &'static [&'static str],
    /// Combined `name|password` value
    pub wifi_details: &'static [&'static str],
    pub clean_status: &'static [&'static str],
}

pub const PROPERTY_KEYS: PropertyKeys = PropertyKeys {
    wifi_name: &["wifiName", "wifi_name", "wifiNetwork", "wifiSsid", "ssid", "wifiUsername"],
    wifi_password: &["wifiPassword", "wifi_password", "wifiPass", "wifiKey"],
    wifi_details: &["wifiDetails", "wifi_details", "wifiInfo", "wifi"],
    clean_status: &["cleanStatus", "clean_status", "cleanliness", "cleanlinessStatus", "housekeepingStatus"],
};

pub fn to_listing(unit: &Unit, picture: Option<String>) -> Listing {
    let custom = unit.custom_properties();
    let (wifi_name, wifi_password) = wifi_credentials(&custom);

    Listing {
        id: unit.id.clone(),
        name: unit.name.clone(),
        short_name: unit.short_name.clone(),
        unit_code: unit.unit_code.clone(),
        street_address: unit.street_address.clone(),
        city: unit.locality.clone(),
        region: unit.region.clone(),
        postal: unit.postal.clone(),
        address: compose_address(
            unit.street_address.as_deref(),
            unit.extended_address.as_deref(),
            unit.locality.as_deref(),
            unit.region.as_deref(),
            unit.postal.as_deref(),
        ),
        bedrooms: unit.bedrooms,
        beds: total_beds(unit),
        bathrooms: unit.full_bathrooms,
        half_bathrooms: unit.half_bathrooms,
        latitude: unit.latitude,
        longitude: unit.longitude,
        wifi_name,
        wifi_password,
        clean_status: probe(&custom, PROPERTY_KEYS.clean_status).and_then(display_value),
        picture,
    }
}

/// `street[, extended], city, region postal`, skipping blanks
pub fn compose_address(
    street: Option<&str>,
    extended: Option<&str>,
    city: Option<&str>,
    region: Option<&str>,
    postal: Option<&str>,
) -> Option<String> {
    let tail = join_present(&[region, postal], " ");
    let parts = [street, extended, city, tail.as_deref()];
    join_present(&parts, ", ")
}

fn join_present(parts: &[Option<&str>], separator: &str) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    if present.is_empty() {
        None
    } else {
        Some(present.join(separator))
    }
}

/// Explicit name/password keys win; the combined details value fills gaps
pub fn wifi_credentials(custom: &Map<String, Value>) -> (Option<String>, Option<String>) {
    let name = probe(custom, PROPERTY_KEYS.wifi_name).and_then(display_value);
    let password = probe(custom, PROPERTY_KEYS.wifi_password).and_then(display_value);

    if name.is_some() && password.is_some() {
        return (name, password);
    }

    let (split_name, split_password) = probe(custom, PROPERTY_KEYS.wifi_details)
        .and_then(display_value)
        .map(|details| split_wifi_details(&details))
        .unwrap_or_default();

    (name.or(split_name), password.or(split_password))
}

/// `"guestwifi|pass123"` -> (`guestwifi`, `pass123`); no pipe means name only
pub fn split_wifi_details(details: &str) -> (Option<String>, Option<String>) {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match details.split_once('|') {
        Some((name, password)) => (non_empty(name), non_empty(password)),
        None => (non_empty(details), None),
    }
}

/// Sum of the bed-type counts; saturates rather than wrapping
fn total_beds(unit: &Unit) -> Option<u32> {
    let bed_types = unit.bed_types.as_ref().filter(|types| !types.is_empty())?;
    let counts: Vec<u32> = bed_types.iter().filter_map(|bed| bed.count).collect();
    if counts.is_empty() {
        return None;
    }
    Some(counts.iter().fold(0u32, |total, count| total.saturating_add(*count)))
}

fn probe<'a>(custom: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        custom
            .iter()
            .find(|(name, value)| name.eq_ignore_ascii_case(key) && !value.is_null())
            .map(|(_, value)| value)
    })
}

/// Coerce a custom property to display text
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get("name").and_then(display_value),
        Value::Array(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit(value: Value) -> Unit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn composes_display_address() {
        assert_eq!(
            compose_address(Some("1 Elm St"), None, Some("Austin"), Some("TX"), Some("78701")).as_deref(),
            Some("1 Elm St, Austin, TX 78701")
        );
        assert_eq!(
            compose_address(Some("1 Elm St"), Some("Apt 2"), Some(" "), None, Some("78701")).as_deref(),
            Some("1 Elm St, Apt 2, 78701")
        );
        assert_eq!(compose_address(None, None, Some(""), None, None), None);
    }

    #[test]
    fn splits_combined_wifi_details() {
        assert_eq!(
            split_wifi_details("guestwifi|pass123"),
            (Some("guestwifi".to_string()), Some("pass123".to_string()))
        );
        assert_eq!(
            split_wifi_details(" guestwifi | pa|ss "),
            (Some("guestwifi".to_string()), Some("pa|ss".to_string()))
        );
        assert_eq!(split_wifi_details("opennet"), (Some("opennet".to_string()), None));
        assert_eq!(split_wifi_details("|secret"), (None, Some("secret".to_string())));
    }

    #[test]
    fn explicit_wifi_keys_win_over_combined_value() {
        let custom = json!({
            "WiFiName": "BeachNet",
            "wifiDetails": "guestwifi|pass123"
        });
        let custom = custom.as_object().unwrap();

        assert_eq!(
            wifi_credentials(custom),
            (Some("BeachNet".to_string()), Some("pass123".to_string()))
        );
    }

    #[test]
    fn maps_full_unit() {
        let unit = unit(json!({
            "id": 42,
            "name": "Beach House",
            "shortName": "BH",
            "unitCode": "BH-1",
            "streetAddress": "1 Elm St",
            "locality": "Austin",
            "region": "TX",
            "postal": "78701",
            "bedrooms": 3,
            "fullBathrooms": 2,
            "halfBathrooms": 1,
            "latitude": 30.2672,
            "longitude": -97.7431,
            "isActive": true,
            "bedTypes": [{ "name": "King", "count": 1 }, { "name": "Twin", "count": 2 }],
            "customData": { "wifi": "guestwifi|pass123", "cleanStatus": { "id": 1, "name": "Clean" } }
        }));

        let listing = to_listing(&unit, Some("https://cdn.example.com/42.jpg".to_string()));

        assert_eq!(listing.id, json!(42));
        assert_eq!(listing.city.as_deref(), Some("Austin"));
        assert_eq!(listing.address.as_deref(), Some("1 Elm St, Austin, TX 78701"));
        assert_eq!(listing.bedrooms, Some(3));
        assert_eq!(listing.beds, Some(3));
        assert_eq!(listing.bathrooms, Some(2));
        assert_eq!(listing.half_bathrooms, Some(1));
        assert_eq!(listing.wifi_name.as_deref(), Some("guestwifi"));
        assert_eq!(listing.wifi_password.as_deref(), Some("pass123"));
        assert_eq!(listing.clean_status.as_deref(), Some("Clean"));
        assert_eq!(listing.picture.as_deref(), Some("https://cdn.example.com/42.jpg"));
    }

    #[test]
    fn missing_fields_serialize_as_null() {
        let listing = to_listing(&unit(json!({ "id": 7 })), None);
        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(value["id"], json!(7));
        for key in ["name", "address", "beds", "wifiName", "wifiPassword", "cleanStatus", "picture"] {
            assert_eq!(value[key], Value::Null, "{} should be null", key);
        }
    }

    #[test]
    fn clean_status_is_coerced_to_string() {
        let numeric = unit(json!({ "customData": { "clean_status": 3 } }));
        assert_eq!(to_listing(&numeric, None).clean_status.as_deref(), Some("3"));

        let flag = unit(json!({ "customData": { "cleanliness": true } }));
        assert_eq!(to_listing(&flag, None).clean_status.as_deref(), Some("true"));

        let blank = unit(json!({ "customData": { "cleanStatus": "  " } }));
        assert_eq!(to_listing(&blank, None).clean_status, None);
    }

    #[test]
    fn beds_need_a_breakdown() {
        assert_eq!(to_listing(&unit(json!({ "bedTypes": [] })), None).beds, None);
        assert_eq!(to_listing(&unit(json!({ "bedTypes": [{ "name": "Sofa" }] })), None).beds, None);
    }

    #[test]
    fn huge_bed_counts_saturate() {
        let unit = unit(json!({
            "bedTypes": [{ "name": "King", "count": 4294967295u64 }, { "name": "Twin", "count": 1 }]
        }));
        assert_eq!(to_listing(&unit, None).beds, Some(u32::MAX));
    }

    #[test]
    fn custom_and_custom_data_are_merged() {
        let unit = unit(json!({
            "id": 1,
            "isActive": true,
            "customData": { "wifiName": "BeachNet", "cleanStatus": "Clean" },
            "custom": { "wifiPassword": "sandy", "cleanStatus": "Dirty" }
        }));
        let listing = to_listing(&unit, None);

        assert_eq!(listing.wifi_name.as_deref(), Some("BeachNet"));
        assert_eq!(listing.wifi_password.as_deref(), Some("sandy"));
        assert_eq!(listing.clean_status.as_deref(), Some("Clean"));
    }
}
