//! janitor-tv library interface
//!
//! Library reconciliation and retention for a Sonarr-managed TV collection:
//! derive one library item per season from import history, resolve its
//! path, and delete/unmonitor seasons picked for removal.

pub mod client;
pub mod services;
pub mod sonarr_service;

pub use client::{SonarrApi, SonarrClient, SonarrError};
pub use services::RemovalReport;
pub use sonarr_service::{ServiceSettings, SonarrService};

use chrono::NaiveDateTime;
use janitor_common::LibraryItem;

/// Items whose canonical import is at least `max_age_days` old at `now`
pub fn select_expired(
    items: Vec<LibraryItem>,
    max_age_days: i64,
    now: NaiveDateTime,
) -> Vec<LibraryItem> {
    items
        .into_iter()
        .filter(|item| item.age_days(now) >= max_age_days)
        .collect()
}
