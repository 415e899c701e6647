// ABOUTME: Shared HTTP transport for provider integrations
// ABOUTME: Builds the single reqwest client and turns exchanges into RawResponse values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use super::RawResponse;
use crate::config::HttpConfig;
use crate::constants::http::USER_AGENT;
use crate::errors::{network_error, AppError, GenerationError};

/// Build the HTTP client shared by every request of a provider
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, AppError> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")).with_source(e))
}

/// Send a request and capture status, `Retry-After` and body
///
/// Non-2xx statuses are returned as data; only failures to obtain a
/// response are errors.
pub(super) async fn send(
    provider: &str,
    request: RequestBuilder,
) -> Result<RawResponse, GenerationError> {
    let response = request.send().await.map_err(|e| {
        warn!(provider, error = %e, "Provider request failed before a response arrived");
        network_error(&e)
    })?;

    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let body = response.text().await.map_err(|e| {
        warn!(provider, error = %e, "Failed to read provider response body");
        network_error(&e)
    })?;

    debug!(
        provider,
        status = status.as_u16(),
        body_len = body.len(),
        "Received provider response"
    );

    Ok(RawResponse::from_http(
        status.as_u16(),
        retry_after.as_deref(),
        body,
    ))
}
