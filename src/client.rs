//! Client for the upstream task API.

use crate::errors::FetchError;
use crate::models::{DayRecord, HabitDay, HeatmapPayload, ScoreBoard, TaskCountsPayload};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Network {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Daily counts for the heatmap, oldest first.
    pub async fn fetch_heatmap(&self) -> Result<Vec<DayRecord>, FetchError> {
        let payload: HeatmapPayload = self.get_json("/api/heatmap").await?;
        if let Some(error) = payload.error {
            return Err(FetchError::Upstream(error));
        }
        Ok(payload.dates)
    }

    pub async fn fetch_task_counts(&self) -> Result<TaskCountsPayload, FetchError> {
        self.get_json("/api/task_counts").await
    }

    pub async fn fetch_weekly_habits(&self) -> Result<Vec<HabitDay>, FetchError> {
        self.get_json("/api/habits/weekly").await
    }

    pub async fn fetch_scores(&self) -> Result<ScoreBoard, FetchError> {
        self.get_json("/api/winter_break_scores").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }
}
