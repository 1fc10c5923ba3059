//! External medicine-code lookup (the collaborator a search fails open on).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::entry::Candidate;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("lookup service returned status {0}")]
    Status(u16),

    #[error("lookup payload is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Term search against an external catalog.
#[async_trait]
pub trait CandidateLookup: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<Candidate>, LookupError>;
}

#[async_trait]
impl<T> CandidateLookup for Arc<T>
where
    T: CandidateLookup + ?Sized,
{
    async fn search(&self, term: &str) -> Result<Vec<Candidate>, LookupError> {
        (**self).search(term).await
    }
}

/// Extract candidates from a lookup payload.
///
/// Anything other than an object whose `sku` field is an array yields no
/// candidates; non-object array elements are skipped.
pub fn candidates_from_payload(payload: Value) -> Vec<Candidate> {
    match payload {
        Value::Object(mut obj) => match obj.remove("sku") {
            Some(Value::Array(items)) => items.into_iter().filter_map(Candidate::from_value).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// HTTP lookup: `GET <endpoint>?q=<term>[&max_results=<n>&filter=]`.
#[derive(Debug, Clone)]
pub struct HttpCandidateLookup {
    client: reqwest::Client,
    endpoint: String,
    max_results: Option<usize>,
}

impl HttpCandidateLookup {
    /// Every request is bounded by `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            max_results: None,
        }
    }

    /// Ask for at most `n` results (also sends an empty `filter`).
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }
}

#[async_trait]
impl CandidateLookup for HttpCandidateLookup {
    async fn search(&self, term: &str) -> Result<Vec<Candidate>, LookupError> {
        let mut query: Vec<(&str, String)> = vec![("q", term.to_string())];
        if let Some(n) = self.max_results {
            query.push(("max_results", n.to_string()));
            query.push(("filter", String::new()));
        }

        let resp = self.client.get(&self.endpoint).query(&query).send().await?;
        if !resp.status().is_success() {
            return Err(LookupError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        Ok(candidates_from_payload(payload))
    }
}
