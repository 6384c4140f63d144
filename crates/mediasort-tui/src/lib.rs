//! Terminal user interface for mediasort.
//!
//! The session starts on a menu listing the stored presets followed by two
//! fixed entries, "new preset" and "custom paths". Selecting a preset starts
//! a migration right away; the fixed entries open an input form first. While
//! a migration runs its progress is streamed from a background worker and
//! redrawn after every event.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mediasort_store::PresetStore;
//! use mediasort_tui::TuiConfig;
//!
//! let config = TuiConfig {
//!     store: PresetStore::open_default().unwrap(),
//!     wipe_after_copy: false,
//! };
//! mediasort_tui::run(config).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter` - Select
//! - `w` - Toggle deleting originals after copy
//! - `d` - Delete the highlighted preset
//! - `Tab`/`Shift-Tab` - Switch form field
//! - `Esc` - Cancel the form, or quit while copying
//! - `q` - Quit

pub mod app;
mod event;
mod theme;

use mediasort_store::PresetStore;

pub use app::{App, AppResult};
pub use theme::Theme;

/// Settings the session starts with.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Where presets are loaded from and saved to.
    pub store: PresetStore,
    /// Initial state of the delete-after-copy flag.
    pub wipe_after_copy: bool,
}

/// Run the TUI application.
pub fn run(config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for the migration worker
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(config).run(terminal));
    ratatui::restore();

    // A migration left running is abandoned here
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
