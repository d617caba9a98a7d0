//! # Janitor Common Library
//!
//! Shared code for the Janitor media managers including:
//! - Configuration loading
//! - Error types
//! - Library items and the `LibraryService` interface
//! - Service timestamp parsing

pub mod config;
pub mod error;
pub mod library;
pub mod time;

pub use error::{Error, Result};
pub use library::{LibraryItem, LibraryService, SelectionStrategy};
