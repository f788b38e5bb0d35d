//! Google Workspace clients (Gmail, Calendar).
//!
//! Authenticates with a pre-issued OAuth access token; acquiring and refreshing
//! that token happens outside this service.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

pub mod calendar;
pub mod gmail;
pub mod handlers;

const HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error (status {status}): {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },
}

impl From<GoogleError> for AppError {
    fn from(err: GoogleError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleApiError {
    error: GoogleApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleApiErrorBody {
    message: String,
}

/// Shared HTTP client for the Gmail and Calendar REST APIs.
#[derive(Clone)]
pub struct GoogleClient {
    client: Client,
    access_token: String,
    gmail_base: String,
    calendar_base: String,
}

impl GoogleClient {
    pub fn new(
        access_token: impl Into<String>,
        gmail_base: impl Into<String>,
        calendar_base: impl Into<String>,
    ) -> Result<Self, GoogleError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()?,
            access_token: access_token.into(),
            gmail_base: gmail_base.into().trim_end_matches('/').to_string(),
            calendar_base: calendar_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Authenticated GET that decodes a JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, GoogleError> {
        debug!("{service} GET {url}");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GoogleError::Api {
                service,
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
