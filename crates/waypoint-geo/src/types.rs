use serde::{Deserialize, Serialize};

/// A point on Earth in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single geocoding candidate returned by place search.
///
/// Ephemeral: produced by one search call and discarded when the query
/// changes, a candidate is chosen, or the search panel closes. Never
/// persisted, so it carries no identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl SearchResult {
    /// Key for list rendering: two candidates are the same row when
    /// name and exact coordinates match, regardless of other fields.
    pub fn list_key(&self) -> (&str, u64, u64) {
        (&self.name, self.latitude.to_bits(), self.longitude.to_bits())
    }

    /// Display name used when persisting this candidate,
    /// e.g. "Paris, France". Falls back to the bare name when the
    /// service returned no country.
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// Address components from reverse geocoding a coordinate pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl AddressParts {
    /// Joins the non-empty components with ", " (city, region, country
    /// order). Returns `None` when every component is absent or empty;
    /// callers decide the fallback label.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Geocoding service errors (forward search and reverse lookup).
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Geocoding service returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Device location provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_display_name_with_country() {
        let result = SearchResult {
            name: "Paris".to_string(),
            country: Some("France".to_string()),
            latitude: 48.8566,
            longitude: 2.3522,
        };
        assert_eq!(result.display_name(), "Paris, France");
    }

    #[test]
    fn test_search_result_display_name_without_country() {
        let result = SearchResult {
            name: "Paris".to_string(),
            country: None,
            latitude: 48.8566,
            longitude: 2.3522,
        };
        assert_eq!(result.display_name(), "Paris");
    }

    #[test]
    fn test_search_result_display_name_empty_country() {
        let result = SearchResult {
            name: "Paris".to_string(),
            country: Some(String::new()),
            latitude: 48.8566,
            longitude: 2.3522,
        };
        assert_eq!(result.display_name(), "Paris");
    }

    #[test]
    fn test_list_key_same_for_same_place() {
        let a = SearchResult {
            name: "Springfield".to_string(),
            country: Some("United States".to_string()),
            latitude: 39.7817,
            longitude: -89.6501,
        };
        let b = SearchResult {
            country: None,
            ..a.clone()
        };
        assert_eq!(a.list_key(), b.list_key());
    }

    #[test]
    fn test_list_key_differs_by_coordinates() {
        let a = SearchResult {
            name: "Springfield".to_string(),
            country: None,
            latitude: 39.7817,
            longitude: -89.6501,
        };
        let b = SearchResult {
            latitude: 42.1015,
            longitude: -72.5898,
            ..a.clone()
        };
        assert_ne!(a.list_key(), b.list_key());
    }

    #[test]
    fn test_address_parts_joins_all() {
        let parts = AddressParts {
            city: Some("Seattle".to_string()),
            region: Some("Washington".to_string()),
            country: Some("United States".to_string()),
        };
        assert_eq!(
            parts.display_name().as_deref(),
            Some("Seattle, Washington, United States")
        );
    }

    #[test]
    fn test_address_parts_skips_missing_and_blank() {
        let parts = AddressParts {
            city: None,
            region: Some("  ".to_string()),
            country: Some("Iceland".to_string()),
        };
        assert_eq!(parts.display_name().as_deref(), Some("Iceland"));
    }

    #[test]
    fn test_address_parts_empty_is_none() {
        assert_eq!(AddressParts::default().display_name(), None);
    }
}
