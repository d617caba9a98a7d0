//! Sonarr access layer
//!
//! The engine talks to Sonarr only through [`SonarrApi`]. [`SonarrClient`]
//! is the HTTP implementation; tests substitute an in-memory one.

pub mod http;
pub mod models;

pub use http::SonarrClient;
pub use models::{Episode, HistoryRecord, QualityProfile, Season, Series};

use thiserror::Error;

/// Sonarr client errors
#[derive(Debug, Error)]
pub enum SonarrError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Operations the retention engine needs from Sonarr
#[async_trait::async_trait]
pub trait SonarrApi: Send + Sync {
    /// `GET /series`
    async fn get_all_series(&self) -> Result<Vec<Series>, SonarrError>;

    /// `GET /qualityprofile`
    async fn get_all_quality_profiles(&self) -> Result<Vec<QualityProfile>, SonarrError>;

    /// `GET /history/series` scoped to one season
    async fn get_history(
        &self,
        series_id: i64,
        season_number: i32,
    ) -> Result<Vec<HistoryRecord>, SonarrError>;

    /// `GET /episode` scoped to one season
    async fn get_all_episodes(
        &self,
        series_id: i64,
        season_number: i32,
    ) -> Result<Vec<Episode>, SonarrError>;

    /// `DELETE /episodefile/{id}`
    async fn delete_episode_file(&self, episode_file_id: i64) -> Result<(), SonarrError>;

    /// `GET /series/{id}`
    async fn get_series(&self, series_id: i64) -> Result<Series, SonarrError>;

    /// `PUT /series/{id}`
    async fn update_series(&self, series_id: i64, series: &Series) -> Result<(), SonarrError>;
}
