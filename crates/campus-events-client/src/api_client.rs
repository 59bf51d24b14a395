//! HTTP client for communicating with the campus event API

use crate::error::{ClientError, ClientResult};
use crate::repository::{AdminAuthenticator, EventRepository};
use async_trait::async_trait;
use campus_events_core::config::ApiConfig;
use campus_events_core::{
    AdminIdentity, Event, EventCounts, EventDraft, EventId, LoginRequest, LoginResponse,
    NewEventRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// API client for making HTTP requests to the event service
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with transport defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client around an existing `reqwest` client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config.normalized_base_url()))
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> ClientResult<Response> {
        let response = request.send().await?;

        if !response.status().is_success() {
            warn!("API returned error {} for {}", response.status(), endpoint);
            return Err(ClientError::status(response.status(), endpoint));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        let response = self.execute(self.client.get(self.url(endpoint)), endpoint).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl AdminAuthenticator for ApiClient {
    /// Check administrator credentials
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] when the service answers without
    /// an admin id, and transport or status errors otherwise. The service
    /// answers refused credentials with 401, which surfaces as a status error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> ClientResult<AdminIdentity> {
        let endpoint = "/api/admin/login";
        let response = self
            .execute(self.client.post(self.url(endpoint)).json(request), endpoint)
            .await?;
        let login: LoginResponse = Self::decode(response).await?;

        login.into_identity().map_err(ClientError::authentication)
    }
}

#[async_trait]
impl EventRepository for ApiClient {
    async fn list_all(&self) -> ClientResult<Vec<Event>> {
        self.get_json("/api/events").await
    }

    async fn list_approved(&self) -> ClientResult<Vec<Event>> {
        self.get_json("/api/events/approved").await
    }

    async fn list_recent(&self) -> ClientResult<Vec<Event>> {
        self.get_json("/api/events/recent").await
    }

    #[instrument(skip(self))]
    async fn search(&self, keyword: &str) -> ClientResult<Vec<Event>> {
        let endpoint = format!(
            "/api/events/search?keyword={}",
            urlencoding::encode(keyword)
        );
        let body: serde_json::Value = self.get_json(&endpoint).await?;

        if !body.is_array() {
            debug!("Discarding non-array search response");
            return Ok(Vec::new());
        }

        Ok(serde_json::from_value(body)?)
    }

    async fn counts(&self) -> ClientResult<EventCounts> {
        self.get_json("/api/events/count").await
    }

    async fn get(&self, id: EventId) -> ClientResult<Event> {
        self.get_json(&format!("/api/events/{id}")).await
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: &EventDraft) -> ClientResult<Event> {
        let endpoint = "/api/events";
        let request = self
            .client
            .post(self.url(endpoint))
            .json(&NewEventRequest::pending(draft));

        let response = self.execute(request, endpoint).await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn approve(&self, id: EventId) -> ClientResult<()> {
        let endpoint = format!("/api/events/{id}/approve");
        self.execute(self.client.put(self.url(&endpoint)), &endpoint)
            .await
            .map(drop)
    }

    #[instrument(skip(self))]
    async fn reject(&self, id: EventId) -> ClientResult<()> {
        let endpoint = format!("/api/events/{id}/reject");
        self.execute(self.client.put(self.url(&endpoint)), &endpoint)
            .await
            .map(drop)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EventId) -> ClientResult<()> {
        let endpoint = format!("/api/events/{id}");
        self.execute(self.client.delete(self.url(&endpoint)), &endpoint)
            .await
            .map(drop)
    }
}
