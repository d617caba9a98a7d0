//! Timestamp utilities

use crate::{Error, Result};
use chrono::NaiveDateTime;

/// Layout of service timestamps once the zone designator is removed.
/// `%.f` also accepts the absence of fractional seconds.
const SERVICE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Current wall-clock time without zone, comparable with parsed service timestamps
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Parse a service-native timestamp such as `2024-01-02T03:04:05Z`.
///
/// The single trailing character (the zone designator) is dropped and the
/// remainder is read as a local timestamp, so the zone is never applied.
pub fn parse_service_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let (cut, _) = raw
        .char_indices()
        .last()
        .ok_or_else(|| Error::InvalidInput("empty timestamp".to_string()))?;

    NaiveDateTime::parse_from_str(&raw[..cut], SERVICE_TIMESTAMP_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("invalid timestamp '{}': {}", raw, e)))
}
