//! Sonarr v3 API resources
//!
//! Only the fields the engine reads are typed. [`Series`] and [`Season`]
//! keep every other field in `extra` so a series fetched with
//! `GET /series/{id}` can be sent back with `PUT` without losing data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// History event type emitted when a download is moved into the library
pub const DOWNLOAD_FOLDER_IMPORTED: &str = "downloadFolderImported";

/// Sonarr series resource
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub path: String,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Season entry embedded in a series
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: i32,
    #[serde(default)]
    pub monitored: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Series {
    /// Copy of this series with the given season no longer monitored.
    ///
    /// Returns `None` when the series has no such season.
    pub fn with_season_unmonitored(&self, season_number: i32) -> Option<Series> {
        if !self.seasons.iter().any(|s| s.season_number == season_number) {
            return None;
        }

        let seasons = self
            .seasons
            .iter()
            .map(|season| {
                if season.season_number == season_number {
                    Season {
                        monitored: false,
                        ..season.clone()
                    }
                } else {
                    season.clone()
                }
            })
            .collect();

        Some(Series {
            seasons,
            ..self.clone()
        })
    }
}

/// Quality profile; only its ranked items and upgrade flag matter here
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub upgrade_allowed: bool,
}

/// One entry of `GET /history/series`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub event_type: String,
    pub date: String,
    #[serde(default)]
    pub data: HistoryData,
}

/// Free-form event data; import events carry both paths
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    #[serde(default)]
    pub dropped_path: Option<String>,
    #[serde(default)]
    pub imported_path: Option<String>,
}

/// Episode resource
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(default)]
    pub id: i64,
    pub episode_number: i32,
    #[serde(default)]
    pub season_number: i32,
    /// Sonarr reports `0` for episodes without a file
    #[serde(default, deserialize_with = "file_id_or_none")]
    pub episode_file_id: Option<i64>,
}

fn file_id_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id > 0))
}
