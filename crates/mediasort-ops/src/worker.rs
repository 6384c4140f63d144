//! Background migration with progress streaming.

use tokio::sync::mpsc;
use tracing::warn;

use crate::migrate::Migrator;
use crate::progress::ProgressEvent;
use crate::request::MigrationRequest;
use crate::MIGRATION_CHANNEL_SIZE;

/// Start a migration on a blocking task.
///
/// Returns the receiving end of the progress stream. The worker is the only
/// sender; it sends exactly one terminal event and then drops the sender, so
/// the channel closes right after the terminal event.
///
/// Dropping the receiver does not stop the worker: a run in flight finishes
/// or fails on its own.
///
/// Must be called from within a tokio runtime.
pub fn start_migration(request: MigrationRequest) -> mpsc::Receiver<ProgressEvent> {
    let (tx, rx) = mpsc::channel(MIGRATION_CHANNEL_SIZE);

    tokio::task::spawn_blocking(move || {
        let terminal = run_migration(Migrator::new(request), &tx);
        let _ = tx.blocking_send(terminal);
    });

    rx
}

/// Run the pre-scan and copy pass, sending one event per file.
///
/// Returns the terminal event instead of sending it.
fn run_migration(migrator: Migrator, tx: &mpsc::Sender<ProgressEvent>) -> ProgressEvent {
    let total = match migrator.count() {
        Ok(total) => total,
        Err(e) => {
            warn!(error = %e, "pre-scan failed");
            return ProgressEvent::failed(0, 0, 0, e);
        }
    };

    let mut current = 0;
    let mut bytes_copied = 0;

    let result = migrator.run(|file| {
        current += 1;
        bytes_copied += file.bytes;
        // A closed receiver means the session is gone; keep migrating.
        let _ = tx.blocking_send(ProgressEvent::file(
            current,
            total,
            file.file_name(),
            bytes_copied,
        ));
    });

    match result {
        Ok(summary) => ProgressEvent::finished(summary.files, total, summary.bytes),
        Err(e) => {
            warn!(error = %e, current, total, "migration aborted");
            ProgressEvent::failed(current, total, bytes_copied, e)
        }
    }
}
