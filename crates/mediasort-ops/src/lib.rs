//! Media migration engine for mediasort.
//!
//! This crate walks a source tree, copies every classified media file into
//! `destination/<category>/<file name>` and optionally deletes the original
//! once the copy is on disk.
//!
//! Two entry points share the same walk:
//!
//! - [`Migrator::run`] is synchronous and reports each migrated file through
//!   a callback (used by the one-shot command line mode);
//! - [`start_migration`] runs the migration on a blocking task and streams
//!   [`ProgressEvent`]s over a bounded channel, ending with exactly one
//!   terminal event.
//!
//! # Example
//!
//! ```rust,no_run
//! use mediasort_ops::{MigrationRequest, start_migration};
//!
//! # async fn demo() {
//! let request = MigrationRequest::new("/Volumes/CARD", "/home/me/Import", false);
//! let mut events = start_migration(request);
//!
//! while let Some(event) = events.recv().await {
//!     println!("{}/{} {}", event.current, event.total, event.current_file);
//!     if event.done {
//!         break;
//!     }
//! }
//! # }
//! ```

mod error;
mod migrate;
mod progress;
mod request;
mod worker;

pub use error::MigrationError;
pub use migrate::{MigratedFile, MigrationSummary, Migrator};
pub use progress::ProgressEvent;
pub use request::{MigrationRequest, MigrationRequestBuilder, MigrationRequestBuilderError};
pub use worker::start_migration;

/// Channel buffer size for migration progress events.
pub const MIGRATION_CHANNEL_SIZE: usize = 16;
