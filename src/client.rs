// 🌐 API Client - authenticated list fetches against the retrieval service
//
// Thin transport collaborator: one GET per query, `basic {apiKey}`
// credential header, OData list envelope unwrapping. No retries and no
// request timeout: a transport failure is fatal to the run and a hung
// request hangs it.

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::query::ResourceQuery;

/// List responses arrive wrapped in an OData envelope.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub value: Vec<T>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch all records for one query.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &ResourceQuery) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, query.resource());

        let response = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .header(AUTHORIZATION, format!("basic {}", self.api_key))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", query.resource()))?
            .error_for_status()
            .with_context(|| format!("Request to {} was rejected", query.resource()))?;

        let envelope: ListEnvelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", query.resource()))?;

        Ok(envelope.value)
    }
}
