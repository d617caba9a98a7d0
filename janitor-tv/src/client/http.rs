//! Sonarr v3 HTTP client

use super::models::{Episode, HistoryRecord, QualityProfile, Series};
use super::{SonarrApi, SonarrError};
use janitor_common::config::SonarrConfig;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("janitor-tv/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for one Sonarr instance
pub struct SonarrClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl SonarrClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8989`)
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, SonarrError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| SonarrError::NetworkError(format!("Invalid API key header: {}", e)))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SonarrError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: format!("{}/api/v3", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &SonarrConfig) -> Result<Self, SonarrError> {
        Self::new(
            &config.url,
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Versioned API root, e.g. `http://localhost:8989/api/v3`
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SonarrError> {
        let url = format!("{}/{}", self.api_url, path);
        tracing::debug!(url = %url, "GET Sonarr");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| SonarrError::NetworkError(e.to_string()))?;

        Self::parse_response(response, &url).await
    }

    /// Map non-success statuses to errors, leaving the body unread otherwise
    async fn ensure_success(
        response: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response, SonarrError> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SonarrError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SonarrError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, SonarrError> {
        let response = Self::ensure_success(response, url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SonarrError::ParseError(format!("{}: {}", url, e)))
    }
}

#[async_trait::async_trait]
impl SonarrApi for SonarrClient {
    async fn get_all_series(&self) -> Result<Vec<Series>, SonarrError> {
        self.get_json("series", &[]).await
    }

    async fn get_all_quality_profiles(&self) -> Result<Vec<QualityProfile>, SonarrError> {
        self.get_json("qualityprofile", &[]).await
    }

    async fn get_history(
        &self,
        series_id: i64,
        season_number: i32,
    ) -> Result<Vec<HistoryRecord>, SonarrError> {
        self.get_json(
            "history/series",
            &[
                ("seriesId", series_id.to_string()),
                ("seasonNumber", season_number.to_string()),
            ],
        )
        .await
    }

    async fn get_all_episodes(
        &self,
        series_id: i64,
        season_number: i32,
    ) -> Result<Vec<Episode>, SonarrError> {
        self.get_json(
            "episode",
            &[
                ("seriesId", series_id.to_string()),
                ("seasonNumber", season_number.to_string()),
            ],
        )
        .await
    }

    async fn delete_episode_file(&self, episode_file_id: i64) -> Result<(), SonarrError> {
        let url = format!("{}/episodefile/{}", self.api_url, episode_file_id);
        tracing::debug!(url = %url, "DELETE Sonarr");

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| SonarrError::NetworkError(e.to_string()))?;

        Self::ensure_success(response, &url).await?;
        Ok(())
    }

    async fn get_series(&self, series_id: i64) -> Result<Series, SonarrError> {
        self.get_json(&format!("series/{}", series_id), &[]).await
    }

    async fn update_series(&self, series_id: i64, series: &Series) -> Result<(), SonarrError> {
        let url = format!("{}/series/{}", self.api_url, series_id);
        tracing::debug!(url = %url, "PUT Sonarr");

        let response = self
            .http_client
            .put(&url)
            .json(series)
            .send()
            .await
            .map_err(|e| SonarrError::NetworkError(e.to_string()))?;

        Self::ensure_success(response, &url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SonarrClient::new("http://localhost:8989", "key", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_api_url_strips_trailing_slash() {
        let client =
            SonarrClient::new("http://sonarr:8989/", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(client.api_url(), "http://sonarr:8989/api/v3");
    }

    #[test]
    fn test_rejects_unprintable_api_key() {
        let client = SonarrClient::new("http://sonarr:8989", "bad\nkey", Duration::from_secs(5));
        assert!(matches!(client, Err(SonarrError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client =
            SonarrClient::new("http://127.0.0.1:9", "key", Duration::from_secs(2)).unwrap();
        let result = client.get_all_series().await;
        assert!(matches!(result, Err(SonarrError::NetworkError(_))));
    }
}
