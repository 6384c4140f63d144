//! Session state types.

use std::path::PathBuf;

use mediasort_core::Preset;
use mediasort_ops::{MigrationError, MigrationRequest, ProgressEvent};

use super::form::{FormSubmission, InputForm};

/// The session's current screen, carrying its state-specific data.
#[derive(Debug, Default)]
pub enum Session {
    /// Preset list and fixed entries.
    #[default]
    Menu,
    /// Editing a new preset or one-off paths.
    Input(InputForm),
    /// A migration is running.
    Copying(ActiveRun),
    /// A migration has ended.
    Done(FinishedRun),
}

/// Rows of the menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Index into the preset snapshot.
    Preset(usize),
    NewPreset,
    CustomPaths,
}

impl MenuItem {
    /// The row at `index` for a menu with `preset_count` presets.
    pub fn at(index: usize, preset_count: usize) -> Option<Self> {
        match index.checked_sub(preset_count) {
            None => Some(MenuItem::Preset(index)),
            Some(0) => Some(MenuItem::NewPreset),
            Some(1) => Some(MenuItem::CustomPaths),
            Some(_) => None,
        }
    }
}

/// What a run was started with. Kept until the completion view is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub wipe_after_copy: bool,
    /// Set when the run was started from a stored or newly created preset.
    pub preset_name: Option<String>,
}

impl RunContext {
    pub fn from_preset(preset: &Preset, wipe_after_copy: bool) -> Self {
        Self {
            source: preset.source.clone(),
            destination: preset.destination.clone(),
            wipe_after_copy,
            preset_name: Some(preset.name.clone()),
        }
    }

    pub fn from_submission(submission: FormSubmission, wipe_after_copy: bool) -> Self {
        Self {
            source: submission.source,
            destination: submission.destination,
            wipe_after_copy,
            preset_name: submission.name,
        }
    }

    pub fn request(&self) -> MigrationRequest {
        MigrationRequest::new(&self.source, &self.destination, self.wipe_after_copy)
    }

    /// Verb shown while the run is in progress.
    pub fn verb(&self) -> &'static str {
        if self.wipe_after_copy { "Moving" } else { "Copying" }
    }

    /// Verb shown once the run is over.
    pub fn past_verb(&self) -> &'static str {
        if self.wipe_after_copy { "Moved" } else { "Copied" }
    }
}

/// Progress of the running migration.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub context: RunContext,
    pub current: usize,
    pub total: usize,
    pub current_file: String,
    pub bytes_copied: u64,
}

impl ActiveRun {
    pub fn new(context: RunContext) -> Self {
        Self {
            context,
            current: 0,
            total: 0,
            current_file: String::new(),
            bytes_copied: 0,
        }
    }

    /// Record a non-terminal event.
    pub fn apply(&mut self, event: &ProgressEvent) {
        self.current = event.current;
        self.total = event.total;
        self.current_file.clone_from(&event.current_file);
        self.bytes_copied = event.bytes_copied;
    }

    /// Fraction complete, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64).min(1.0)
        }
    }

    /// End the run with its terminal event.
    pub fn finish(self, event: ProgressEvent) -> FinishedRun {
        FinishedRun {
            context: self.context,
            files: event.current,
            total: event.total,
            bytes_copied: event.bytes_copied,
            error: event.error,
        }
    }

    /// End the run because the worker went away without a terminal event.
    pub fn abandon(self) -> FinishedRun {
        FinishedRun {
            context: self.context,
            files: self.current,
            total: self.total,
            bytes_copied: self.bytes_copied,
            error: Some(MigrationError::WorkerStopped),
        }
    }
}

/// Outcome of a migration, shown until dismissed.
#[derive(Debug)]
pub struct FinishedRun {
    pub context: RunContext,
    pub files: usize,
    pub total: usize,
    pub bytes_copied: u64,
    pub error: Option<MigrationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(wipe: bool) -> RunContext {
        RunContext::from_preset(&Preset::new("card", "/card", "/import"), wipe)
    }

    #[test]
    fn test_menu_item_at() {
        assert_eq!(MenuItem::at(0, 2), Some(MenuItem::Preset(0)));
        assert_eq!(MenuItem::at(1, 2), Some(MenuItem::Preset(1)));
        assert_eq!(MenuItem::at(2, 2), Some(MenuItem::NewPreset));
        assert_eq!(MenuItem::at(3, 2), Some(MenuItem::CustomPaths));
        assert_eq!(MenuItem::at(4, 2), None);

        assert_eq!(MenuItem::at(0, 0), Some(MenuItem::NewPreset));
        assert_eq!(MenuItem::at(1, 0), Some(MenuItem::CustomPaths));
    }

    #[test]
    fn test_run_context_verbs() {
        assert_eq!(context(false).verb(), "Copying");
        assert_eq!(context(false).past_verb(), "Copied");
        assert_eq!(context(true).verb(), "Moving");
        assert_eq!(context(true).past_verb(), "Moved");
    }

    #[test]
    fn test_run_context_request() {
        let request = context(true).request();
        assert_eq!(request, MigrationRequest::new("/card", "/import", true));
    }

    #[test]
    fn test_active_run_tracks_events() {
        let mut run = ActiveRun::new(context(false));
        assert_eq!(run.ratio(), 0.0);

        run.apply(&ProgressEvent::file(1, 4, "a.jpg", 100));
        assert_eq!(run.current_file, "a.jpg");
        assert_eq!(run.ratio(), 0.25);

        let finished = run.finish(ProgressEvent::finished(4, 4, 400));
        assert_eq!(finished.files, 4);
        assert_eq!(finished.bytes_copied, 400);
        assert!(finished.error.is_none());
    }

    #[test]
    fn test_abandoned_run_reports_worker_stopped() {
        let mut run = ActiveRun::new(context(false));
        run.apply(&ProgressEvent::file(2, 5, "b.mov", 10));

        let finished = run.abandon();
        assert_eq!(finished.files, 2);
        assert_eq!(finished.total, 5);
        assert!(matches!(finished.error, Some(MigrationError::WorkerStopped)));
    }
}
