//! Sonarr-backed library service
//!
//! Wires the engine components to one Sonarr instance. Construction runs the
//! upgrade policy gate, so a service value always carries the answer for the
//! lifetime of the process.

use crate::client::{SonarrApi, SonarrError};
use crate::services::{
    detect_upgrades_allowed, ExecutorSettings, ExtractorSettings, HistoryExtractor, RemovalReport,
    RetentionExecutor,
};
use janitor_common::config::TomlConfig;
use janitor_common::{LibraryItem, LibraryService, SelectionStrategy};
use std::sync::Arc;

/// Settings for [`SonarrService`]
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub filesystem_access: bool,
    pub dry_run: bool,
    pub workers: usize,
    pub selection: SelectionStrategy,
}

impl From<&TomlConfig> for ServiceSettings {
    fn from(config: &TomlConfig) -> Self {
        Self {
            filesystem_access: config.filesystem.access,
            dry_run: config.application.dry_run,
            workers: config.application.workers,
            selection: config.application.history_selection,
        }
    }
}

/// TV library service on top of Sonarr
pub struct SonarrService {
    api: Arc<dyn SonarrApi>,
    settings: ServiceSettings,
    upgrades_allowed: bool,
}

impl SonarrService {
    /// Evaluate the upgrade policy and build the service.
    ///
    /// A transport failure here is a startup failure.
    pub async fn initialize(
        api: Arc<dyn SonarrApi>,
        settings: ServiceSettings,
    ) -> Result<Self, SonarrError> {
        let upgrades_allowed = detect_upgrades_allowed(api.as_ref()).await?;
        Ok(Self::with_upgrade_policy(api, settings, upgrades_allowed))
    }

    /// Build the service with an already known upgrade policy
    pub fn with_upgrade_policy(
        api: Arc<dyn SonarrApi>,
        settings: ServiceSettings,
        upgrades_allowed: bool,
    ) -> Self {
        Self {
            api,
            settings,
            upgrades_allowed,
        }
    }

    pub fn upgrades_allowed(&self) -> bool {
        self.upgrades_allowed
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Copy of this service with dry run forced on or off
    pub fn with_dry_run(&self, dry_run: bool) -> Self {
        Self {
            api: Arc::clone(&self.api),
            settings: ServiceSettings {
                dry_run,
                ..self.settings
            },
            upgrades_allowed: self.upgrades_allowed,
        }
    }
}

#[async_trait::async_trait]
impl LibraryService for SonarrService {
    type Error = SonarrError;
    type Report = RemovalReport;

    async fn get_entries(&self) -> Result<Vec<LibraryItem>, SonarrError> {
        let settings = ExtractorSettings {
            filesystem_access: self.settings.filesystem_access,
            workers: self.settings.workers,
            selection: self.settings.selection,
            upgrades_allowed: self.upgrades_allowed,
        };
        HistoryExtractor::new(self.api.as_ref(), settings)
            .get_entries()
            .await
    }

    async fn remove_entries(&self, items: &[LibraryItem]) -> Result<RemovalReport, SonarrError> {
        let settings = ExecutorSettings {
            dry_run: self.settings.dry_run,
            workers: self.settings.workers,
        };
        RetentionExecutor::new(self.api.as_ref(), settings)
            .remove_entries(items)
            .await
    }
}
