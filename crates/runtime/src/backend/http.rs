//! HTTP backend for a Strapi-style event API.

use super::{ApiError, ApiResult, EventApi};
use crate::types::{AuthResponse, Credentials, Event, EventDraft, EventId, Registration, User};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337/api";

/// Builder for creating an HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackendBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpBackendBuilder {
    /// Create a new builder for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Abort any single request that takes longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the backend.
    pub fn build(self) -> HttpBackend {
        HttpBackend {
            client: reqwest::Client::new(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: self.timeout,
        }
    }
}

/// Event API backend speaking JSON over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpBackend {
    /// Create a builder for the HTTP backend.
    pub fn builder(base_url: impl Into<String>) -> HttpBackendBuilder {
        HttpBackendBuilder::new(base_url)
    }

    /// The base URL every path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, method: &'static str, path: &str, req: RequestBuilder) -> ApiResult<Response> {
        tracing::debug!(method, path, "api request");

        let req = req.header("accept", "application/json");
        let req = match self.timeout {
            Some(timeout) => req.timeout(timeout),
            None => req,
        };

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(method, path, status = status.as_u16(), "api rejected token");
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(method, path, status = status.as_u16(), "api request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

impl std::fmt::Display for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "http({})", self.base_url)
    }
}

impl EventApi for HttpBackend {
    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse> {
        let path = "/auth/local/register";
        let req = self.client.post(self.url(path)).json(registration);
        parse(self.send("POST", path, req).await?).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let path = "/auth/local";
        let req = self.client.post(self.url(path)).json(credentials);
        parse(self.send("POST", path, req).await?).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        let path = "/users/me";
        let req = self
            .client
            .get(self.url(path))
            .header("Authorization", bearer(token));
        parse(self.send("GET", path, req).await?).await
    }

    async fn list_events(&self, token: &str) -> ApiResult<Vec<Event>> {
        let path = "/events";
        let req = self
            .client
            .get(self.url(path))
            .header("Authorization", bearer(token));
        parse(self.send("GET", path, req).await?).await
    }

    async fn create_event(&self, token: &str, draft: &EventDraft) -> ApiResult<Event> {
        let path = "/events";
        let req = self
            .client
            .post(self.url(path))
            .header("Authorization", bearer(token))
            .json(draft);
        parse(self.send("POST", path, req).await?).await
    }

    async fn update_event(&self, token: &str, id: EventId, draft: &EventDraft) -> ApiResult<Event> {
        let path = format!("/events/{id}");
        let req = self
            .client
            .put(self.url(&path))
            .header("Authorization", bearer(token))
            .json(draft);
        parse(self.send("PUT", &path, req).await?).await
    }

    async fn delete_event(&self, token: &str, id: EventId) -> ApiResult<()> {
        let path = format!("/events/{id}");
        let req = self
            .client
            .delete(self.url(&path))
            .header("Authorization", bearer(token));
        self.send("DELETE", &path, req).await?;
        Ok(())
    }
}
