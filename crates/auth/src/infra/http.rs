//! HTTP Resource API Client
//!
//! `reqwest`-backed implementation of the [`ResourceApi`] gateway. Every
//! call carries a fixed timeout; a timed-out or unreachable upstream maps
//! to `GatewayError::Unavailable` so callers can degrade instead of
//! hanging or crashing.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::gateway::{
    CreateUserRequest, CreatedUser, GatewayError, GatewayResult, LoginPayload, ResourceApi,
    SessionCheck,
};

/// Fixed upstream call timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback when a failure body carries no usable `error` field
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Clone)]
pub struct HttpResourceApi {
    client: Client,
    base_url: String,
}

impl HttpResourceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("HTTP client with static configuration");

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(
        response: Response,
        expected: StatusCode,
    ) -> GatewayResult<T> {
        let status = response.status();
        if status != expected {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(response).await,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Unavailable(format!("malformed response body: {e}")))
    }
}

impl ResourceApi for HttpResourceApi {
    async fn login(&self, identifier: &str, password: &str) -> GatewayResult<LoginPayload> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "identifier": identifier, "password": password }))
            .send()
            .await
            .map_err(into_unavailable)?;

        Self::parse(response, StatusCode::OK).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> GatewayResult<CreatedUser> {
        let response = self
            .client
            .post(self.url("/api/users"))
            .json(request)
            .send()
            .await
            .map_err(into_unavailable)?;

        Self::parse(response, StatusCode::CREATED).await
    }

    async fn check_session(&self, token: &str) -> GatewayResult<SessionCheck> {
        let response = self
            .client
            .get(self.url("/api/check-session"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(into_unavailable)?;

        Self::parse(response, StatusCode::OK).await
    }
}

/// Pull the `error` field out of a failure body, falling back to a generic
/// message when the body is unusable.
async fn extract_error_message(response: Response) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        Err(_) => UNKNOWN_ERROR.to_string(),
    }
}

fn into_unavailable(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Unavailable("request timed out".to_string())
    } else {
        GatewayError::Unavailable(err.to_string())
    }
}
