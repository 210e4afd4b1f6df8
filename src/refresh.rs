use reqwest::{Client, StatusCode, header::CONTENT_TYPE, redirect::Policy};
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Body of the refresh endpoint request
#[derive(Serialize, Debug)]
pub struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    pub refresh_token: &'a str,
}

/// Whatever the refresh endpoint answered, not interpreted in any way.
///
/// The body is kept as bytes, whatever charset the server declares.
#[derive(Debug)]
pub struct RefreshResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RefreshResponse {
    /// Body decoded as UTF-8, invalid sequences replaced
    pub fn body_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),
}

/// Creates the HTTP client used for the probe.
///
/// Redirects are not followed, so a redirecting endpoint shows up as is.
pub fn create_http_client() -> Result<Client, RefreshError> {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .map_err(RefreshError::Client)
}

/// Posts the refresh token to the refresh endpoint and returns the raw answer.
///
/// Non-success statuses are not errors: the body is returned for printing all the same.
pub async fn send_refresh(
    http_client: &Client,
    url: &Url,
    refresh_token: &str,
) -> Result<RefreshResponse, RefreshError> {
    info!(%url, "sending refresh request");

    let response = http_client
        .post(url.clone())
        .header(CONTENT_TYPE, "application/json")
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;

    let status = response.status();
    info!(status = status.as_u16(), "refresh endpoint responded");
    if !status.is_success() {
        warn!(status = status.as_u16(), "refresh endpoint returned non-success status");
    }

    let body = response.bytes().await?.to_vec();
    Ok(RefreshResponse { status, body })
}
