// crates/waypoint-store/src/client.rs

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use url::Url;

use crate::types::{SavedLocation, SavedLocationCreate, StoreError, UserProfile};

/// Client for the remote saved-locations store.
///
/// Every call is scoped to the authenticated identity carried in the
/// bearer token; the API refuses cross-user reads and writes.
#[derive(Debug, Clone)]
pub struct LocationStoreClient {
    base_url: Url,
    client: Arc<Client>,
    token: String,
}

impl LocationStoreClient {
    /// Create a client against the store API.
    ///
    /// # Errors
    /// Returns `StoreError::Url` for an unparseable base URL and
    /// `StoreError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: String) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        // Trailing slash so Url::join keeps any base path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            base_url: Url::parse(&normalized)?,
            client: Arc::new(client),
            token,
        })
    }

    /// Build request with auth headers
    fn build_request(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, "waypoint-app")
    }

    /// Check response status and extract error
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(message));
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch all saved locations belonging to `user_id`, newest first.
    ///
    /// The order is requested from the server and re-asserted locally
    /// so the creation-time-descending contract holds regardless of
    /// what the server does with the hint.
    ///
    /// # Errors
    /// Returns `StoreError` on transport failure or a non-2xx response.
    pub async fn list_locations(&self, user_id: &str) -> Result<Vec<SavedLocation>, StoreError> {
        tracing::debug!("Fetching saved locations for user {}", user_id);

        let url = self.base_url.join(&format!("users/{}/locations", user_id))?;
        let request = self.build_request(
            self.client
                .get(url)
                .query(&[("order", "created_at.desc")]),
        );

        let response = request.send().await?;
        let response = self.check_response(response).await?;
        let mut rows: Vec<SavedLocation> = response.json().await?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        tracing::info!("Fetched {} saved locations", rows.len());
        Ok(rows)
    }

    /// Insert one saved location; the store assigns id and timestamp.
    ///
    /// # Errors
    /// Returns `StoreError` on transport failure or a non-2xx response.
    pub async fn create_location(
        &self,
        req: SavedLocationCreate,
    ) -> Result<SavedLocation, StoreError> {
        tracing::debug!("Saving location {:?} for user {}", req.name, req.user_id);

        let url = self.base_url.join(&format!("users/{}/locations", req.user_id))?;
        let request = self.build_request(self.client.post(url).json(&req));

        let response = request.send().await?;
        let response = self.check_response(response).await?;
        let created: SavedLocation = response.json().await?;

        tracing::info!("Saved location {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Remove one saved location by its store-assigned identifier.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` for an unknown id, otherwise
    /// `StoreError` on transport failure or a non-2xx response.
    pub async fn delete_location(&self, location_id: &str) -> Result<(), StoreError> {
        tracing::debug!("Deleting saved location {}", location_id);

        let url = self.base_url.join(&format!("locations/{}", location_id))?;
        let request = self.build_request(self.client.delete(url));

        let response = request.send().await?;
        self.check_response(response).await?;

        tracing::info!("Deleted saved location {}", location_id);
        Ok(())
    }

    /// Read the `user_details` row for `user_id` (first/last name).
    ///
    /// # Errors
    /// Returns `StoreError` on transport failure or a non-2xx response.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile, StoreError> {
        let url = self.base_url.join(&format!("users/{}/profile", user_id))?;
        let request = self.build_request(self.client.get(url));

        let response = request.send().await?;
        let response = self.check_response(response).await?;
        let profile: UserProfile = response.json().await?;
        Ok(profile)
    }
}
