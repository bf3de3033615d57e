use crate::app::App;
use crate::config::Theme;
use crate::listing::Entry;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::path::Path;

/// The contiguous slice of the listing that fits the terminal, plus whether
/// a truncation marker is due on either edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub start: usize,
    pub end: usize,
    pub truncated_top: bool,
    pub truncated_bottom: bool,
}

/// Scroll-window math for a listing of `len` entries on a terminal `rows`
/// high. One row is spent on the header and one is reserved as a bottom
/// margin, so the body holds `rows - 2` entries. Until the cursor scrolls past the
/// first screenful the window is anchored at the top; after that it trails
/// the cursor, keeping one entry of lookahead below it.
pub fn viewport(len: usize, selected: usize, rows: u16) -> Viewport {
    let usable = rows.saturating_sub(2) as usize;

    if len == 0 {
        return Viewport {
            start: 0,
            end: 0,
            truncated_top: false,
            truncated_bottom: false,
        };
    }

    if usable == 0 {
        // Degenerate terminal: header plus the selected line only.
        return Viewport {
            start: selected,
            end: (selected + 1).min(len),
            truncated_top: selected > 0,
            truncated_bottom: selected + 1 < len,
        };
    }

    if selected >= usable {
        let end = (selected + 2).min(len);
        let mut start = end.saturating_sub(usable);
        // A tiny body can still push the cursor out of the window.
        start = start.min(selected);
        Viewport {
            start,
            end,
            truncated_top: true,
            truncated_bottom: end < len,
        }
    } else {
        let end = len.min(usable);
        Viewport {
            start: 0,
            end,
            truncated_top: false,
            truncated_bottom: end < len,
        }
    }
}

/// Builds the full frame body: header line, optional markers, and the
/// visible window of entries. Pure over its inputs.
pub fn listing_lines(
    entries: &[Entry],
    selected: usize,
    rows: u16,
    current_path: &Path,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("$ ", Style::default().fg(theme.marker)),
        Span::styled(
            current_path.display().to_string(),
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        ),
    ])];

    if entries.is_empty() {
        return lines;
    }

    let window = viewport(entries.len(), selected, rows);
    let marker_style = Style::default().fg(theme.marker).add_modifier(Modifier::BOLD);

    if window.truncated_top {
        lines.push(Line::styled("...", marker_style));
    }

    for (i, entry) in entries.iter().enumerate().take(window.end).skip(window.start) {
        lines.push(entry_line(entry, i == selected, theme));
    }

    if window.truncated_bottom {
        lines.push(Line::styled("...", marker_style));
    }

    lines
}

fn entry_line(entry: &Entry, is_selected: bool, theme: &Theme) -> Line<'static> {
    let color = if entry.is_dir { theme.directory } else { theme.text };
    let mut style = Style::default().fg(color);
    if is_selected {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    let prefix = if is_selected { "> " } else { "  " };
    let name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };

    Line::from(vec![
        Span::styled(prefix.to_string(), Style::default().fg(theme.text)),
        Span::styled(name, style),
    ])
}

/// Paints the whole frame. The line list is built against the full terminal
/// height; the reserved margin row at the bottom is where the bottom
/// truncation marker lands when the listing overflows, so nothing is layered
/// under it.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let body = listing_lines(
        &app.entries,
        app.selected,
        area.height,
        &app.current_path,
        &app.config.theme,
    );
    frame.render_widget(Paragraph::new(body), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry {
                name: format!("entry{:02}", i),
                path: PathBuf::from(format!("/fake/entry{:02}", i)),
                is_dir: i % 3 == 0,
            })
            .collect()
    }

    #[test]
    fn default_window_anchors_at_the_top() {
        let w = viewport(20, 0, 10);
        assert_eq!((w.start, w.end), (0, 8));
        assert!(!w.truncated_top);
        assert!(w.truncated_bottom);
    }

    #[test]
    fn trailing_window_follows_the_cursor() {
        let w = viewport(20, 15, 10);
        assert_eq!((w.start, w.end), (9, 17));
        assert!(w.truncated_top);
        assert!(w.truncated_bottom);
    }

    #[test]
    fn trailing_window_clamps_at_the_last_entry() {
        let w = viewport(20, 19, 10);
        assert_eq!((w.start, w.end), (12, 20));
        assert!(w.truncated_top);
        assert!(!w.truncated_bottom);
    }

    #[test]
    fn short_listing_fits_without_markers() {
        let w = viewport(5, 2, 10);
        assert_eq!((w.start, w.end), (0, 5));
        assert!(!w.truncated_top);
        assert!(!w.truncated_bottom);
    }

    #[test]
    fn boundary_selection_switches_to_trailing() {
        // rows = 10 gives 8 usable lines; index 8 is the first off-screen one.
        let w = viewport(20, 8, 10);
        assert!(w.truncated_top);
        assert!(w.start <= 8 && 8 < w.end);
    }

    #[test]
    fn empty_listing_has_an_empty_window() {
        let w = viewport(0, 0, 10);
        assert_eq!((w.start, w.end), (0, 0));
        assert!(!w.truncated_top && !w.truncated_bottom);
    }

    #[test]
    fn degenerate_terminal_still_shows_the_selection() {
        let w = viewport(20, 5, 2);
        assert_eq!((w.start, w.end), (5, 6));
        assert!(w.truncated_top);
        assert!(w.truncated_bottom);
    }

    #[test]
    fn selection_always_visible() {
        for len in [1usize, 5, 20, 100] {
            for rows in [1u16, 2, 3, 10, 40] {
                for selected in 0..len {
                    let w = viewport(len, selected, rows);
                    assert!(
                        w.start <= selected && selected < w.end,
                        "len={} rows={} selected={} window={:?}",
                        len,
                        rows,
                        selected,
                        w
                    );
                }
            }
        }
    }

    #[test]
    fn empty_listing_renders_header_only() {
        let lines = listing_lines(&[], 0, 10, Path::new("/tmp"), &Theme::default());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn markers_bracket_a_scrolled_window() {
        let all = entries(20);
        let lines = listing_lines(&all, 15, 10, Path::new("/tmp"), &Theme::default());
        // header + top marker + 8 entries + bottom marker
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1].to_string(), "...");
        assert_eq!(lines[10].to_string(), "...");
    }

    #[test]
    fn selected_entry_gets_the_cursor_prefix() {
        let all = entries(3);
        let lines = listing_lines(&all, 1, 10, Path::new("/tmp"), &Theme::default());
        assert!(lines[2].to_string().starts_with("> "));
        assert!(lines[1].to_string().starts_with("  "));
        assert!(lines[3].to_string().starts_with("  "));
    }

    fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area().height)
            .map(|y| {
                (0..buffer.area().width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn app_with_entries(n: usize) -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        let mut app = App::new(tmp.path().to_path_buf()).unwrap();
        app.entries = entries(n);
        (tmp, app)
    }

    #[test]
    fn bottom_marker_reaches_the_screen() {
        let (_tmp, mut app) = app_with_entries(20);
        app.selected = 0;
        let rows = draw(&app, 40, 10);

        assert!(rows[1].contains("entry00"));
        assert!(rows[8].contains("entry07"));
        assert!(rows[9].contains("..."));
    }

    #[test]
    fn trailing_window_draws_top_marker_and_lookahead() {
        let (_tmp, mut app) = app_with_entries(20);
        app.selected = 15;
        let rows = draw(&app, 40, 10);

        assert!(rows[1].contains("..."));
        assert!(rows[2].contains("entry09"));
        assert!(rows[8].contains("> entry15"));
        // One entry of lookahead below the cursor stays on screen.
        assert!(rows[9].contains("entry16"));
    }

    #[test]
    fn short_listing_draws_without_markers() {
        let (_tmp, mut app) = app_with_entries(3);
        app.selected = 0;
        let rows = draw(&app, 40, 10);

        assert!(rows[3].contains("entry02"));
        assert!(rows.iter().all(|r| !r.contains("...")));
    }

    #[test]
    fn directories_render_with_a_trailing_slash() {
        let all = entries(2); // entry00 is a directory
        let lines = listing_lines(&all, 1, 10, Path::new("/tmp"), &Theme::default());
        assert!(lines[1].to_string().contains("entry00/"));
        assert!(!lines[2].to_string().contains("entry01/"));
    }
}
