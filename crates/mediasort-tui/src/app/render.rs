//! Application rendering.
//!
//! Every frame redraws the header, the body of the current session state
//! and the key hints.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use mediasort_core::Preset;

use crate::event::{
    COPYING_BINDINGS, DONE_BINDINGS, INPUT_BINDINGS, KeyBinding, MENU_BINDINGS,
};
use crate::theme::Theme;

use super::form::InputForm;
use super::state::{ActiveRun, FinishedRun, Session};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub presets: &'a [Preset],
    pub cursor: usize,
    pub wipe_after_copy: bool,
    pub session: &'a Session,
}

/// Format bytes in binary units.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let [header, content, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(ctx, header, buf);

    let bindings = match ctx.session {
        Session::Menu => {
            render_menu(ctx, content, buf);
            MENU_BINDINGS
        }
        Session::Input(form) => {
            render_form(ctx, form, content, buf);
            INPUT_BINDINGS
        }
        Session::Copying(run) => {
            render_copying(ctx, run, content, buf);
            COPYING_BINDINGS
        }
        Session::Done(run) => {
            render_done(ctx, run, content, buf);
            DONE_BINDINGS
        }
    };

    render_footer(ctx, bindings, footer, buf);
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::styled(" mediasort ", ctx.theme.title),
        Span::styled(
            "sort photos and videos by format",
            Style::default().fg(ctx.theme.muted),
        ),
    ]);

    Paragraph::new(line)
        .style(ctx.theme.header)
        .render(area, buf);
}

fn content_block<'a>(ctx: &RenderContext, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(ctx.theme.title)
        .borders(Borders::ALL)
        .border_style(ctx.theme.border)
}

fn render_menu(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let block = content_block(ctx, " Presets ");
    let inner = block.inner(area);
    block.render(area, buf);

    let muted = Style::default().fg(ctx.theme.muted);
    let row_style = |index: usize| {
        if index == ctx.cursor {
            ctx.theme.selected
        } else {
            Style::default()
        }
    };
    let marker = |index: usize| if index == ctx.cursor { "> " } else { "  " };

    let mut lines: Vec<Line> = ctx
        .presets
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            Line::from(vec![
                Span::raw(marker(i)),
                Span::raw(preset.name.as_str()),
                Span::styled(
                    format!(
                        "  {} -> {}",
                        preset.source.display(),
                        preset.destination.display()
                    ),
                    muted,
                ),
            ])
            .style(row_style(i))
        })
        .collect();

    let new_row = ctx.presets.len();
    for (offset, label) in ["+ New preset", "Custom paths"].into_iter().enumerate() {
        let index = new_row + offset;
        lines.push(Line::from(format!("{}{label}", marker(index))).style(row_style(index)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {} ", checkbox(ctx.wipe_after_copy)),
            Style::default().fg(if ctx.wipe_after_copy {
                ctx.theme.warning
            } else {
                ctx.theme.muted
            }),
        ),
        Span::raw("Delete originals after copy"),
    ]));

    Paragraph::new(lines).render(inner, buf);
}

fn render_form(ctx: &RenderContext, form: &InputForm, area: Rect, buf: &mut Buffer) {
    let title = if form.is_new_preset() {
        " New preset "
    } else {
        " Custom paths "
    };
    let block = content_block(ctx, title);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::raw("")];

    for &field in form.fields() {
        let input = form.field(field);
        let label: &'static str = field.into();
        let focused = field == form.focused();

        let mut spans = vec![Span::styled(
            format!("{} {label:<12}", if focused { ">" } else { " " }),
            if focused {
                ctx.theme.field_focused
            } else {
                ctx.theme.field_label
            },
        )];

        if focused {
            let (before, after) = input.split_at_cursor();
            let mut rest = after.chars();
            let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".into());
            spans.push(Span::raw(before));
            spans.push(Span::styled(under_cursor, ctx.theme.input_cursor));
            spans.push(Span::raw(rest.as_str()));
        } else {
            spans.push(Span::raw(input.buffer()));
        }

        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {} ", checkbox(ctx.wipe_after_copy)),
            Style::default().fg(ctx.theme.muted),
        ),
        Span::styled("Delete originals after copy", Style::default().fg(ctx.theme.muted)),
    ]));

    if let Some(error) = form.error() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("  {error}"),
            Style::default().fg(ctx.theme.error),
        ));
    }

    Paragraph::new(lines).render(inner, buf);
}

fn render_copying(ctx: &RenderContext, run: &ActiveRun, area: Rect, buf: &mut Buffer) {
    let title = match &run.context.preset_name {
        Some(name) => format!(" Importing {name} "),
        None => " Importing ".to_string(),
    };
    let block = content_block(ctx, title);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::raw("")];

    if run.current_file.is_empty() {
        lines.push(Line::styled(
            "  Scanning...",
            Style::default().fg(ctx.theme.muted),
        ));
    } else {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", run.context.verb()), ctx.theme.help_desc),
            Span::raw(run.current_file.as_str()),
        ]));
    }

    // Progress bar
    let pct = (run.ratio() * 100.0) as usize;
    let bar_width = (inner.width as usize).saturating_sub(10);
    let filled = (pct * bar_width) / 100;
    let empty = bar_width.saturating_sub(filled);

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  ["),
        Span::styled("\u{2588}".repeat(filled), ctx.theme.progress_bar),
        Span::styled("\u{2591}".repeat(empty), ctx.theme.progress_bg),
        Span::raw(format!("] {pct}%")),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("  Files:  ", ctx.theme.help_desc),
        Span::raw(format!("{}/{}", run.current, run.total)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Size:   ", ctx.theme.help_desc),
        Span::raw(format_size(run.bytes_copied)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  To:     ", ctx.theme.help_desc),
        Span::raw(run.context.destination.display().to_string()),
    ]));

    Paragraph::new(lines).render(inner, buf);
}

fn render_done(ctx: &RenderContext, run: &FinishedRun, area: Rect, buf: &mut Buffer) {
    let block = content_block(ctx, " Finished ");
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::raw("")];

    match &run.error {
        None => {
            lines.push(Line::styled(
                format!("  Done! {} {} files.", run.context.past_verb(), run.files),
                Style::default()
                    .fg(ctx.theme.success)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("  Size:   ", ctx.theme.help_desc),
                Span::raw(format_size(run.bytes_copied)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  To:     ", ctx.theme.help_desc),
                Span::raw(run.context.destination.display().to_string()),
            ]));
        }
        Some(error) => {
            lines.push(Line::styled(
                format!("  Error: {error}"),
                Style::default()
                    .fg(ctx.theme.error)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!(
                    "  {} {} of {} files before the failure.",
                    run.context.past_verb(),
                    run.files,
                    run.total
                ),
                ctx.theme.help_desc,
            ));
        }
    }

    Paragraph::new(lines).render(inner, buf);
}

fn render_footer(ctx: &RenderContext, bindings: &[KeyBinding], area: Rect, buf: &mut Buffer) {
    let spans: Vec<Span> = bindings
        .iter()
        .flat_map(|binding| {
            vec![
                Span::styled(format!(" {} ", binding.keys), ctx.theme.help_key),
                Span::styled(format!("{} ", binding.description), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediasort_core::ValidationError;
    use mediasort_ops::{MigrationError, ProgressEvent};

    use crate::app::state::RunContext;

    fn render_text(presets: &[Preset], cursor: usize, wipe: bool, session: &Session) -> String {
        let theme = Theme::default();
        let ctx = RenderContext {
            theme: &theme,
            presets,
            cursor,
            wipe_after_copy: wipe,
            session,
        };

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        render_app(&ctx, area, &mut buf);

        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn context(preset_name: Option<&str>, wipe: bool) -> RunContext {
        RunContext {
            source: "/card".into(),
            destination: "/import".into(),
            wipe_after_copy: wipe,
            preset_name: preset_name.map(String::from),
        }
    }

    #[test]
    fn test_render_menu() {
        let presets = [Preset::new("card", "/card", "/import")];
        let text = render_text(&presets, 1, false, &Session::Menu);

        assert!(text.contains("  card  /card -> /import"));
        assert!(text.contains("> + New preset"));
        assert!(text.contains("  Custom paths"));
        assert!(text.contains("[ ] Delete originals after copy"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_render_menu_wipe_on() {
        let text = render_text(&[], 0, true, &Session::Menu);
        assert!(text.contains("[x] Delete originals after copy"));
    }

    #[test]
    fn test_render_form_with_error() {
        let mut form = InputForm::custom();
        form.set_error(ValidationError::MissingPaths);
        let text = render_text(&[], 0, false, &Session::Input(form));

        assert!(text.contains("Custom paths"));
        assert!(text.contains("> Source"));
        assert!(text.contains("  Destination"));
        assert!(!text.contains("Name"));
        assert!(text.contains("source and destination paths are required"));
    }

    #[test]
    fn test_render_copying() {
        let mut run = ActiveRun::new(context(Some("card"), false));
        run.apply(&ProgressEvent::file(1, 4, "a.jpg", 2048));
        let text = render_text(&[], 0, false, &Session::Copying(run));

        assert!(text.contains("Importing card"));
        assert!(text.contains("Copying: a.jpg"));
        assert!(text.contains("] 25%"));
        assert!(text.contains("1/4"));
        assert!(text.contains(&format_size(2048)));
    }

    #[test]
    fn test_render_moving_without_preset() {
        let mut run = ActiveRun::new(context(None, true));
        run.apply(&ProgressEvent::file(2, 2, "b.mov", 1));
        let text = render_text(&[], 0, true, &Session::Copying(run));

        assert!(text.contains(" Importing "));
        assert!(text.contains("Moving: b.mov"));
        assert!(text.contains("] 100%"));
    }

    #[test]
    fn test_render_done() {
        let run = ActiveRun::new(context(Some("card"), false))
            .finish(ProgressEvent::finished(2, 2, 13));
        let text = render_text(&[], 0, false, &Session::Done(run));

        assert!(text.contains("Done! Copied 2 files."));
        assert!(text.contains(&format_size(13)));
    }

    #[test]
    fn test_render_done_with_error() {
        let run = ActiveRun::new(context(None, true))
            .finish(ProgressEvent::failed(1, 3, 5, MigrationError::WorkerStopped));
        let text = render_text(&[], 0, true, &Session::Done(run));

        assert!(text.contains("Error: migration worker stopped before reporting completion"));
        assert!(text.contains("Moved 1 of 3 files before the failure."));
        assert!(!text.contains("Done!"));
    }
}
