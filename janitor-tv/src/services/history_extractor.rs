//! History extractor
//!
//! Turns Sonarr's import history into at most one [`LibraryItem`] per
//! series season. Seasons are independent units of work and are fetched
//! through a bounded pool; the output keeps series/season enumeration order.

use super::path_resolver::resolve_full_path;
use crate::client::models::DOWNLOAD_FOLDER_IMPORTED;
use crate::client::{HistoryRecord, Season, Series, SonarrApi, SonarrError};
use chrono::NaiveDateTime;
use futures::stream::{self, StreamExt, TryStreamExt};
use janitor_common::time::parse_service_timestamp;
use janitor_common::{LibraryItem, SelectionStrategy};

/// Settings that shape a library pass
#[derive(Debug, Clone, Copy)]
pub struct ExtractorSettings {
    pub filesystem_access: bool,
    pub workers: usize,
    pub selection: SelectionStrategy,
    /// Result of the upgrade policy gate
    pub upgrades_allowed: bool,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            filesystem_access: false,
            workers: 4,
            selection: SelectionStrategy::Oldest,
            upgrades_allowed: false,
        }
    }
}

/// An import event that has everything needed to date a season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEvent {
    pub imported_at: NaiveDateTime,
    pub dropped_path: String,
    pub imported_path: String,
}

impl ImportEvent {
    /// Accepts only completed download imports with both paths and a readable date
    fn from_record(record: HistoryRecord) -> Option<Self> {
        if record.event_type != DOWNLOAD_FOLDER_IMPORTED {
            return None;
        }
        let dropped_path = record.data.dropped_path?;
        let imported_path = record.data.imported_path?;

        match parse_service_timestamp(&record.date) {
            Ok(imported_at) => Some(Self {
                imported_at,
                dropped_path,
                imported_path,
            }),
            Err(e) => {
                tracing::warn!(
                    imported_path = %imported_path,
                    error = %e,
                    "Skipping import event with unreadable date"
                );
                None
            }
        }
    }
}

/// Pick the canonical import event from a season's history
pub fn canonical_event(
    records: Vec<HistoryRecord>,
    selection: SelectionStrategy,
) -> Option<ImportEvent> {
    let mut events: Vec<ImportEvent> = records
        .into_iter()
        .filter_map(ImportEvent::from_record)
        .collect();

    // Stable: equal timestamps keep the order Sonarr returned them in
    events.sort_by_key(|e| e.imported_at);
    selection.pick(events)
}

/// Series identity needed to turn one season into a library item
struct SeasonUnit {
    series_id: i64,
    series_path: String,
    tvdb_id: Option<i64>,
    imdb_id: Option<String>,
    season_number: i32,
}

impl SeasonUnit {
    fn new(series: &Series, season: &Season) -> Self {
        Self {
            series_id: series.id,
            series_path: series.path.clone(),
            tvdb_id: series.tvdb_id,
            imdb_id: series.imdb_id.clone(),
            season_number: season.season_number,
        }
    }
}

/// Builds the library surface from Sonarr history
pub struct HistoryExtractor<'a> {
    api: &'a dyn SonarrApi,
    settings: ExtractorSettings,
}

impl<'a> HistoryExtractor<'a> {
    pub fn new(api: &'a dyn SonarrApi, settings: ExtractorSettings) -> Self {
        Self { api, settings }
    }

    /// One item per series season that has a qualifying import.
    ///
    /// The first history fetch that fails aborts the pass.
    pub async fn get_entries(&self) -> Result<Vec<LibraryItem>, SonarrError> {
        let all_series = self.api.get_all_series().await?;

        let units: Vec<SeasonUnit> = all_series
            .iter()
            .flat_map(|series| {
                series
                    .seasons
                    .iter()
                    .map(move |season| SeasonUnit::new(series, season))
            })
            .collect();

        if self.settings.upgrades_allowed && self.settings.selection == SelectionStrategy::Oldest {
            tracing::info!(
                "Quality upgrades are enabled; seasons are still dated by their oldest import"
            );
        }

        tracing::info!(
            series = all_series.len(),
            seasons = units.len(),
            workers = self.settings.workers,
            "Extracting library entries from Sonarr history"
        );

        // Stops scheduling seasons at the first failed fetch
        let extracted: Vec<Option<LibraryItem>> = stream::iter(units)
            .map(|unit| self.extract_season(unit))
            .buffered(self.settings.workers.max(1))
            .try_collect()
            .await?;

        let items: Vec<LibraryItem> = extracted.into_iter().flatten().collect();

        tracing::info!(entries = items.len(), "Library extraction complete");
        Ok(items)
    }

    async fn extract_season(&self, unit: SeasonUnit) -> Result<Option<LibraryItem>, SonarrError> {
        let history = self
            .api
            .get_history(unit.series_id, unit.season_number)
            .await
            .map_err(|e| {
                tracing::error!(
                    series_id = unit.series_id,
                    season = unit.season_number,
                    error = %e,
                    "Fetching season history failed"
                );
                e
            })?;

        let Some(event) = canonical_event(history, self.settings.selection) else {
            tracing::debug!(
                series_id = unit.series_id,
                season = unit.season_number,
                "No qualifying import for season"
            );
            return Ok(None);
        };

        Ok(Some(LibraryItem {
            id: unit.series_id,
            imported_at: event.imported_at,
            dropped_path: event.dropped_path,
            imported_path: event.imported_path,
            full_path: resolve_full_path(
                &unit.series_path,
                unit.season_number,
                self.settings.filesystem_access,
            ),
            season: Some(unit.season_number),
            tvdb_id: unit.tvdb_id,
            imdb_id: unit.imdb_id,
        }))
    }
}
