//! Library items and the service interface shared by media managers
//!
//! A [`LibraryItem`] is the canonical record of one removable unit. For TV
//! that unit is a single season of a series; managers without seasons leave
//! [`LibraryItem::season`] empty.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Canonical record of one removable library unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryItem {
    /// Identifier of the owning entry in the media manager (e.g. series id)
    pub id: i64,
    /// Timestamp of the import event chosen as canonical
    pub imported_at: NaiveDateTime,
    /// Path the file had before import (download folder)
    pub dropped_path: String,
    /// Path the file was moved to on import
    pub imported_path: String,
    /// Resolved library path for the whole unit
    pub full_path: String,
    /// Season number, absent for non-seasonal media
    pub season: Option<i32>,
    pub tvdb_id: Option<i64>,
    pub imdb_id: Option<String>,
}

impl LibraryItem {
    /// Whole days between the canonical import and `now`
    pub fn age_days(&self, now: NaiveDateTime) -> i64 {
        (now - self.imported_at).num_days()
    }
}

/// Which import event becomes canonical when a unit was imported several times
///
/// `Oldest` treats the original acquisition as the unit's age. `Newest`
/// follows the latest import, which is what a quality upgrade produces.
/// Neither is derived automatically from the manager's upgrade settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    #[default]
    Oldest,
    Newest,
}

impl SelectionStrategy {
    /// Pick the canonical entry from candidates sorted ascending by timestamp
    pub fn pick<T>(self, ascending: Vec<T>) -> Option<T> {
        match self {
            SelectionStrategy::Oldest => ascending.into_iter().next(),
            SelectionStrategy::Newest => ascending.into_iter().last(),
        }
    }
}

/// Enumerate and remove library units of one media manager
#[async_trait::async_trait]
pub trait LibraryService: Send + Sync {
    /// Error returned by the underlying manager
    type Error: std::error::Error + Send + Sync + 'static;

    /// Summary produced by a removal pass
    type Report: Send;

    /// Build the current library surface, one item per removable unit
    async fn get_entries(&self) -> Result<Vec<LibraryItem>, Self::Error>;

    /// Remove the given units and keep the manager from re-acquiring them
    async fn remove_entries(&self, items: &[LibraryItem]) -> Result<Self::Report, Self::Error>;
}
