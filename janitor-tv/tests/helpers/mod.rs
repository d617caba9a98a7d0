//! Test Helper Utilities
//!
//! In-memory Sonarr for exercising the engine without a network.

#![allow(dead_code)]

use janitor_tv::client::models::{HistoryData, DOWNLOAD_FOLDER_IMPORTED};
use janitor_tv::client::{Episode, HistoryRecord, QualityProfile, Season, Series};
use janitor_tv::{SonarrApi, SonarrError};
use serde_json::{json, Map};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A call received by [`FakeSonarr`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAllSeries,
    GetQualityProfiles,
    GetHistory(i64, i32),
    GetEpisodes(i64, i32),
    DeleteEpisodeFile(i64),
    GetSeries(i64),
    UpdateSeries(i64),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::DeleteEpisodeFile(_) | Call::UpdateSeries(_))
    }
}

/// Sonarr stand-in that serves canned data and records every call in order
#[derive(Default)]
pub struct FakeSonarr {
    series: Vec<Series>,
    profiles: Vec<QualityProfile>,
    history: HashMap<(i64, i32), Vec<HistoryRecord>>,
    episodes: HashMap<(i64, i32), Vec<Episode>>,
    failing_history: HashSet<(i64, i32)>,
    failing_episodes: HashSet<(i64, i32)>,
    failing_deletes: HashSet<i64>,
    fail_updates: bool,
    calls: Mutex<Vec<Call>>,
    updates: Mutex<Vec<Series>>,
}

impl FakeSonarr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_profile(mut self, items: usize, upgrade_allowed: bool) -> Self {
        self.profiles.push(QualityProfile {
            id: self.profiles.len() as i64 + 1,
            name: format!("profile-{}", self.profiles.len() + 1),
            items: (0..items).map(|i| json!({ "quality": { "id": i } })).collect(),
            upgrade_allowed,
        });
        self
    }

    pub fn with_history(mut self, series_id: i64, season: i32, records: Vec<HistoryRecord>) -> Self {
        self.history.insert((series_id, season), records);
        self
    }

    pub fn with_episodes(mut self, series_id: i64, season: i32, episodes: Vec<Episode>) -> Self {
        self.episodes.insert((series_id, season), episodes);
        self
    }

    pub fn failing_history_for(mut self, series_id: i64, season: i32) -> Self {
        self.failing_history.insert((series_id, season));
        self
    }

    pub fn failing_episodes_for(mut self, series_id: i64, season: i32) -> Self {
        self.failing_episodes.insert((series_id, season));
        self
    }

    pub fn failing_delete_of(mut self, episode_file_id: i64) -> Self {
        self.failing_deletes.insert(episode_file_id);
        self
    }

    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    /// Series bodies received through `update_series`
    pub fn updates(&self) -> Vec<Series> {
        self.updates.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl SonarrApi for FakeSonarr {
    async fn get_all_series(&self) -> Result<Vec<Series>, SonarrError> {
        self.record(Call::GetAllSeries);
        Ok(self.series.clone())
    }

    async fn get_all_quality_profiles(&self) -> Result<Vec<QualityProfile>, SonarrError> {
        self.record(Call::GetQualityProfiles);
        Ok(self.profiles.clone())
    }

    async fn get_history(
        &self,
        series_id: i64,
        season_number: i32,
    ) -> Result<Vec<HistoryRecord>, SonarrError> {
        self.record(Call::GetHistory(series_id, season_number));
        if self.failing_history.contains(&(series_id, season_number)) {
            return Err(SonarrError::NetworkError("connection reset".to_string()));
        }
        Ok(self
            .history
            .get(&(series_id, season_number))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_all_episodes(
        &self,
        series_id: i64,
        season_number: i32,
    ) -> Result<Vec<Episode>, SonarrError> {
        self.record(Call::GetEpisodes(series_id, season_number));
        if self.failing_episodes.contains(&(series_id, season_number)) {
            return Err(SonarrError::NetworkError("connection reset".to_string()));
        }
        Ok(self
            .episodes
            .get(&(series_id, season_number))
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_episode_file(&self, episode_file_id: i64) -> Result<(), SonarrError> {
        self.record(Call::DeleteEpisodeFile(episode_file_id));
        if self.failing_deletes.contains(&episode_file_id) {
            return Err(SonarrError::ApiError {
                status: 500,
                body: "file locked".to_string(),
            });
        }
        Ok(())
    }

    async fn get_series(&self, series_id: i64) -> Result<Series, SonarrError> {
        self.record(Call::GetSeries(series_id));
        self.series
            .iter()
            .find(|s| s.id == series_id)
            .cloned()
            .ok_or_else(|| SonarrError::NotFound(format!("series/{}", series_id)))
    }

    async fn update_series(&self, series_id: i64, series: &Series) -> Result<(), SonarrError> {
        self.record(Call::UpdateSeries(series_id));
        if self.fail_updates {
            return Err(SonarrError::ApiError {
                status: 400,
                body: "validation failed".to_string(),
            });
        }
        self.updates.lock().unwrap().push(series.clone());
        Ok(())
    }
}

/// Series with monitored seasons `season_numbers`
pub fn series(id: i64, path: &str, season_numbers: &[i32]) -> Series {
    Series {
        id,
        tvdb_id: Some(1000 + id),
        imdb_id: Some(format!("tt{:07}", id)),
        path: path.to_string(),
        seasons: season_numbers
            .iter()
            .map(|n| Season {
                season_number: *n,
                monitored: true,
                extra: Map::new(),
            })
            .collect(),
        extra: Map::new(),
    }
}

pub fn history(event_type: &str, date: &str, dropped: Option<&str>, imported: Option<&str>) -> HistoryRecord {
    HistoryRecord {
        event_type: event_type.to_string(),
        date: date.to_string(),
        data: HistoryData {
            dropped_path: dropped.map(str::to_string),
            imported_path: imported.map(str::to_string),
        },
    }
}

/// Completed download import with both paths set
pub fn import(date: &str, file: &str) -> HistoryRecord {
    history(
        DOWNLOAD_FOLDER_IMPORTED,
        date,
        Some(&format!("/downloads/{}", file)),
        Some(&format!("/library/{}", file)),
    )
}

pub fn episode(season: i32, number: i32, file_id: Option<i64>) -> Episode {
    Episode {
        id: (season * 100 + number) as i64,
        episode_number: number,
        season_number: season,
        episode_file_id: file_id,
    }
}
