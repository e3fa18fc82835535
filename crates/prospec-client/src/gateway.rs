//! Remote Gateway
//!
//! Issues authenticated requests against the HTTP/JSON API. Every request
//! carries the bearer token from the session; a 401 on a non-auth endpoint
//! triggers exactly one silent token refresh and one retry, after which the
//! failure is surfaced unchanged.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Erreur de connexion au serveur")]
    Network,

    #[error("{0}")]
    Unauthorized(String),

    /// HTTP 409 flagged `DUPLICATE_WARNING`: the caller may confirm and
    /// resend with the force flag.
    #[error("{0}")]
    Duplicate(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Réponse illisible du serveur")]
    Parse(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    token: String,
}

/// Authenticated HTTP gateway shared by all services.
pub struct Gateway {
    base_url: String,
    client: reqwest::Client,
    session: Arc<Session>,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.execute(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, GatewayError> {
        let response = self.execute(Method::POST, path, Some(body)).await?;
        Self::decode(response).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, GatewayError> {
        let response = self.execute(Method::PUT, path, body).await?;
        Self::decode(response).await
    }

    /// Fire-and-forget POST whose outcome the caller ignores (logout).
    pub async fn post_best_effort(&self, path: &str, body: &serde_json::Value) {
        if let Err(e) = self.issue(Method::POST, path, Some(body)).await {
            tracing::debug!(path, error = %e, "best-effort request failed");
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = self.issue(method.clone(), path, body).await?;
        if response.status() == StatusCode::UNAUTHORIZED && !path.starts_with("/auth/") {
            if self.try_refresh().await {
                tracing::debug!(path, "retrying after token refresh");
                return self.issue(method, path, body).await;
            }
        }
        Ok(response)
    }

    async fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "request failed");
            GatewayError::Network
        })
    }

    /// One refresh attempt; returns whether a new access token was stored.
    async fn try_refresh(&self) -> bool {
        let Some(refresh_token) = self.session.refresh_token() else {
            return false;
        };
        let url = format!("{}/auth/refresh", self.base_url);
        let body = serde_json::json!({ "refreshToken": refresh_token });
        let response = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed");
                return false;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "token refresh rejected");
            return false;
        }
        match response.json::<RefreshResponse>().await {
            Ok(refreshed) => {
                self.session.set_access_token(&refreshed.token);
                true
            }
            Err(_) => false,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| GatewayError::Parse(e.to_string()));
        }
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .unwrap_or_else(|| "Une erreur est survenue".to_string());
        match status {
            StatusCode::CONFLICT if body.kind.as_deref() == Some("DUPLICATE_WARNING") => {
                Err(GatewayError::Duplicate(message))
            }
            StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized(message)),
            _ => Err(GatewayError::Server { status: status.as_u16(), message }),
        }
    }
}
