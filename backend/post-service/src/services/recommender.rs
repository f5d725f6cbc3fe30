/// Tag recommendation client.
///
/// The recommendation service is an opaque text-to-keywords oracle: it takes
/// post contents and returns an ordered list of tag names, possibly empty,
/// with no uniqueness guarantee.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::RecommenderConfig;
use crate::error::{AppError, Result};

#[async_trait]
pub trait TagRecommender: Send + Sync {
    async fn recommend(&self, text: &str) -> Result<Vec<String>>;
}

pub struct HttpTagRecommender {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct RecommendResponse {
    tags: Vec<String>,
}

impl HttpTagRecommender {
    pub fn new(config: &RecommenderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TagRecommender for HttpTagRecommender {
    async fn recommend(&self, text: &str) -> Result<Vec<String>> {
        let url = format!("{}/v1/recommendations", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&RecommendRequest { text })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("tag recommendation request failed: {}", e);
                AppError::RecommendationFailure(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "tag recommendation returned error status");
            return Err(AppError::RecommendationFailure(format!(
                "unexpected status {}",
                status
            )));
        }

        let body: RecommendResponse = response.json().await.map_err(|e| {
            tracing::error!("tag recommendation response malformed: {}", e);
            AppError::RecommendationFailure(e.to_string())
        })?;

        Ok(body.tags)
    }
}
