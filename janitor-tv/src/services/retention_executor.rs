//! Retention executor
//!
//! Deletes the episode files of whole seasons and then unmonitors each
//! season so Sonarr does not grab it again. Seasons are processed through a
//! bounded pool; inside one season the order is always
//! delete files → unmonitor.
//!
//! Dry run issues no mutating call at all and logs what would happen.
//!
//! A failed file deletion does not stop the remaining episodes, but the
//! season then stays monitored. Failing to list episodes or to unmonitor
//! ends the pass: no further season is started and the error is returned.

use crate::client::{SonarrApi, SonarrError};
use futures::stream::{self, StreamExt};
use janitor_common::LibraryItem;
use serde::Serialize;

/// Settings for a removal pass
#[derive(Debug, Clone, Copy)]
pub struct ExecutorSettings {
    pub dry_run: bool,
    pub workers: usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            dry_run: true,
            workers: 4,
        }
    }
}

/// Outcome of a removal pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalReport {
    pub items_processed: usize,
    /// Items ignored because they carry no season
    pub items_skipped: usize,
    pub files_deleted: usize,
    /// Files a dry run would have deleted
    pub files_planned: usize,
    pub seasons_unmonitored: usize,
    pub failures: Vec<String>,
}

impl RemovalReport {
    fn merge(&mut self, other: RemovalReport) {
        self.items_processed += other.items_processed;
        self.items_skipped += other.items_skipped;
        self.files_deleted += other.files_deleted;
        self.files_planned += other.files_planned;
        self.seasons_unmonitored += other.seasons_unmonitored;
        self.failures.extend(other.failures);
    }
}

/// Removes library items from Sonarr
pub struct RetentionExecutor<'a> {
    api: &'a dyn SonarrApi,
    settings: ExecutorSettings,
}

impl<'a> RetentionExecutor<'a> {
    pub fn new(api: &'a dyn SonarrApi, settings: ExecutorSettings) -> Self {
        Self { api, settings }
    }

    pub async fn remove_entries(&self, items: &[LibraryItem]) -> Result<RemovalReport, SonarrError> {
        tracing::info!(
            items = items.len(),
            dry_run = self.settings.dry_run,
            "Removing library entries"
        );

        let mut outcomes = stream::iter(items.iter().cloned())
            .map(|item| self.remove_item(item))
            .buffered(self.settings.workers.max(1));

        let mut report = RemovalReport::default();
        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Ok(partial) => report.merge(partial),
                Err(e) => {
                    tracing::warn!(
                        processed = report.items_processed,
                        deleted = report.files_deleted,
                        unmonitored = report.seasons_unmonitored,
                        "Removal pass aborted, remaining items left untouched"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            processed = report.items_processed,
            deleted = report.files_deleted,
            planned = report.files_planned,
            unmonitored = report.seasons_unmonitored,
            failures = report.failures.len(),
            "Removal pass complete"
        );
        Ok(report)
    }

    async fn remove_item(&self, item: LibraryItem) -> Result<RemovalReport, SonarrError> {
        let Some(season) = item.season else {
            tracing::warn!(
                series_id = item.id,
                path = %item.full_path,
                "Skipping library item without a season"
            );
            return Ok(RemovalReport {
                items_skipped: 1,
                ..Default::default()
            });
        };

        let episodes = self.api.get_all_episodes(item.id, season).await.map_err(|e| {
            tracing::error!(series_id = item.id, season, error = %e, "Listing episodes failed");
            e
        })?;

        let mut report = RemovalReport {
            items_processed: 1,
            ..Default::default()
        };

        for episode in &episodes {
            let Some(file_id) = episode.episode_file_id else {
                continue;
            };

            if self.settings.dry_run {
                tracing::info!(
                    path = %item.full_path,
                    episode_id = episode.id,
                    episode = episode.episode_number,
                    episode_file_id = file_id,
                    season = episode.season_number,
                    "Dry run: would delete episode file"
                );
                report.files_planned += 1;
                continue;
            }

            match self.api.delete_episode_file(file_id).await {
                Ok(()) => {
                    tracing::info!(
                        path = %item.full_path,
                        episode_id = episode.id,
                        episode = episode.episode_number,
                        episode_file_id = file_id,
                        season,
                        "Deleted episode file"
                    );
                    report.files_deleted += 1;
                }
                Err(e) => {
                    tracing::error!(
                        series_id = item.id,
                        season,
                        episode_id = episode.id,
                        episode_file_id = file_id,
                        error = %e,
                        "Deleting episode file failed"
                    );
                    report.failures.push(format!(
                        "series {} season {} file {}: {}",
                        item.id, season, file_id, e
                    ));
                }
            }
        }

        if self.settings.dry_run {
            tracing::info!(series_id = item.id, season, "Dry run: would unmonitor season");
            return Ok(report);
        }

        if !report.failures.is_empty() {
            tracing::warn!(
                series_id = item.id,
                season,
                "Leaving season monitored, some files could not be deleted"
            );
            return Ok(report);
        }

        if self.unmonitor_season(item.id, season).await? {
            report.seasons_unmonitored += 1;
        }
        Ok(report)
    }

    /// Returns `false` when the series no longer has that season
    async fn unmonitor_season(&self, series_id: i64, season_number: i32) -> Result<bool, SonarrError> {
        let series = self.api.get_series(series_id).await?;

        let Some(updated) = series.with_season_unmonitored(season_number) else {
            tracing::debug!(series_id, season = season_number, "Season not found, nothing to unmonitor");
            return Ok(false);
        };

        self.api.update_series(series_id, &updated).await.map_err(|e| {
            tracing::error!(series_id, season = season_number, error = %e, "Unmonitoring season failed");
            e
        })?;

        tracing::info!(series_id, season = season_number, "Unmonitored season");
        Ok(true)
    }
}
