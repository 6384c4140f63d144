//! Main application state and logic.

pub mod form;
pub mod input;
mod render;
pub mod state;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use mediasort_core::Preset;
use mediasort_ops::{ProgressEvent, start_migration};
use mediasort_store::PresetStore;

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;

use self::form::{FormAction, InputForm};
use self::render::{RenderContext, render_app};
use self::state::{ActiveRun, MenuItem, RunContext, Session};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Number of fixed menu rows after the presets.
const FIXED_MENU_ROWS: usize = 2;

/// Main application state.
pub struct App {
    store: PresetStore,
    /// Snapshot of the store, reloaded after every mutation.
    presets: Vec<Preset>,
    /// Menu cursor, always within `0..presets.len() + FIXED_MENU_ROWS`.
    cursor: usize,
    /// Delete originals after copying. Not persisted.
    wipe_after_copy: bool,
    session: Session,
    /// Receiver for the running migration, if any.
    progress_rx: Option<mpsc::Receiver<ProgressEvent>>,
    theme: Theme,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    /// Create the application and load the preset snapshot.
    pub fn new(config: TuiConfig) -> Self {
        let mut app = Self {
            store: config.store,
            presets: Vec::new(),
            cursor: 0,
            wipe_after_copy: config.wipe_after_copy,
            session: Session::Menu,
            progress_rx: None,
            theme: Theme::default(),
            should_quit: false,
            needs_redraw: true,
        };
        app.reload_presets();
        app
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let mut events = EventStream::new();

        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(event) = events.next() => self.handle_terminal_event(event),

                event = async {
                    if let Some(rx) = &mut self.progress_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_progress(event);
                    self.needs_redraw = true;
                }
            }
        }

        Ok(())
    }

    /// Handle one item from the terminal event stream.
    ///
    /// Read errors are logged and dropped; the session carries on.
    pub fn handle_terminal_event(&mut self, event: std::io::Result<Event>) {
        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Ok(_) => {}
            Err(err) => debug!(error = %err, "terminal read failed"),
        }
        self.needs_redraw = true;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn wipe_after_copy(&self) -> bool {
        self.wipe_after_copy
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn menu_len(&self) -> usize {
        self.presets.len() + FIXED_MENU_ROWS
    }

    /// Dispatch a key press to the current state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.session {
            Session::Menu => self.handle_menu_action(KeyAction::menu(key)),
            Session::Input(form) => {
                if KeyAction::menu(key) == KeyAction::ForceQuit {
                    self.should_quit = true;
                    return;
                }
                match form.handle_key(key) {
                    FormAction::Continue => {}
                    FormAction::Cancel => self.session = Session::Menu,
                    FormAction::Submit => self.submit_form(),
                }
            }
            Session::Copying(_) => match KeyAction::copying(key) {
                KeyAction::Quit | KeyAction::ForceQuit => {
                    info!("leaving while a migration is still running");
                    self.should_quit = true;
                }
                _ => {}
            },
            Session::Done(_) => match KeyAction::done(key) {
                KeyAction::Dismiss => self.session = Session::Menu,
                KeyAction::Quit | KeyAction::ForceQuit => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_menu_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            KeyAction::MoveDown => self.cursor = (self.cursor + 1).min(self.menu_len() - 1),
            KeyAction::ToggleWipe => self.wipe_after_copy = !self.wipe_after_copy,
            KeyAction::DeletePreset => self.delete_selected(),
            KeyAction::Select => self.select(),
            KeyAction::Quit | KeyAction::ForceQuit => self.should_quit = true,
            _ => {}
        }
    }

    fn select(&mut self) {
        match MenuItem::at(self.cursor, self.presets.len()) {
            Some(MenuItem::Preset(index)) => {
                let context = RunContext::from_preset(&self.presets[index], self.wipe_after_copy);
                self.start_run(context);
            }
            Some(MenuItem::NewPreset) => self.session = Session::Input(InputForm::new_preset()),
            Some(MenuItem::CustomPaths) => self.session = Session::Input(InputForm::custom()),
            None => {}
        }
    }

    fn delete_selected(&mut self) {
        let Some(MenuItem::Preset(index)) = MenuItem::at(self.cursor, self.presets.len()) else {
            return;
        };

        let name = self.presets[index].name.clone();
        if let Err(err) = self.store.delete(&name) {
            warn!(preset = %name, error = %err, "failed to delete preset");
        }
        self.reload_presets();
    }

    fn submit_form(&mut self) {
        let Session::Input(form) = &mut self.session else {
            return;
        };

        let submission = match form.submission(&self.presets) {
            Ok(submission) => submission,
            Err(err) => {
                debug!(error = %err, "form rejected");
                form.set_error(err);
                return;
            }
        };

        if let Some(preset) = submission.preset() {
            if let Err(err) = self.store.add(preset) {
                warn!(error = %err, "failed to save preset");
            }
            self.reload_presets();
        }

        // Replacing the session drops the form.
        self.start_run(RunContext::from_submission(submission, self.wipe_after_copy));
    }

    fn start_run(&mut self, context: RunContext) {
        info!(
            source = %context.source.display(),
            destination = %context.destination.display(),
            preset = context.preset_name.as_deref().unwrap_or("-"),
            "starting run"
        );
        self.progress_rx = Some(start_migration(context.request()));
        self.session = Session::Copying(ActiveRun::new(context));
    }

    /// Apply an event from the worker. `None` means the channel closed.
    pub fn handle_progress(&mut self, event: Option<ProgressEvent>) {
        let Session::Copying(run) = &mut self.session else {
            self.progress_rx = None;
            return;
        };

        match event {
            Some(event) if !event.is_terminal() => run.apply(&event),
            event => {
                self.progress_rx = None;
                if let Session::Copying(run) = std::mem::take(&mut self.session) {
                    let finished = match event {
                        Some(event) => run.finish(event),
                        None => run.abandon(),
                    };
                    self.session = Session::Done(finished);
                }
            }
        }
    }

    /// Reload the preset snapshot and clamp the cursor to the new menu.
    fn reload_presets(&mut self) {
        self.presets = self.store.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to load presets");
            Vec::new()
        });
        self.cursor = self.cursor.min(self.menu_len() - 1);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            theme: &self.theme,
            presets: &self.presets,
            cursor: self.cursor,
            wipe_after_copy: self.wipe_after_copy,
            session: &self.session,
        };

        render_app(&ctx, area, buf);
    }
}
