//! Retention engine components
//!
//! - `upgrade_gate`: whether quality upgrades can re-import seasons
//! - `history_extractor`: one canonical library item per series season
//! - `path_resolver`: library path of a season
//! - `retention_executor`: file deletion and season unmonitoring

pub mod history_extractor;
pub mod path_resolver;
pub mod retention_executor;
pub mod upgrade_gate;

pub use history_extractor::{canonical_event, ExtractorSettings, HistoryExtractor, ImportEvent};
pub use path_resolver::resolve_full_path;
pub use retention_executor::{ExecutorSettings, RemovalReport, RetentionExecutor};
pub use upgrade_gate::{detect_upgrades_allowed, upgrades_allowed};
