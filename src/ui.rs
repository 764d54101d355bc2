//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It only
//! reads from `App` and `PlaybackState`; every change goes through the
//! runtime.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, ListState, Padding, Paragraph, Table, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Page, Row, ViewMode};
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlaybackState, format_time};

const GRID_COLUMNS: usize = 3;
const GRID_ROW_HEIGHT: u16 = 2;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("1/2/3", "pages");
    map.insert("tab", "next page");
    map.insert("j/k", "down/up");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L and -/+ are filled from config.
    map.insert("/", "edit query");
    map.insert("f", "filter");
    map.insert("o", "sort");
    map.insert("v", "list/grid");
    map.insert("s", "shuffle");
    map.insert("r", "repeat");
    map.insert("q", "quit");
    map
});

/// Render the controls help text with the configured step sizes.
fn controls_text(seek_step_percent: u8, volume_step: u8) -> String {
    let order = [
        "1/2/3", "tab", "j/k", "enter", "space/p", "h/l", "H/L", "-/+", "/", "f", "o", "v", "s",
        "r", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] seek -/+{}%", seek_step_percent)),
            "-/+" => Some(format!("[-/+] volume -/+{}", volume_step)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

const EDIT_CONTROLS: &str = "[type] edit query | [backspace] delete | [enter] done | [esc] clear";

/// Window of `total` rows of height `height` that keeps `selected` centered
/// when possible. Returns `(start, end, selected position inside the window)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

/// Grid rows to draw for `len` cells in an area `area_height` tall, keeping
/// the selected cell's row on screen. Returns `(first row, end row)`.
fn grid_window(len: usize, area_height: u16, selected: usize) -> (usize, usize) {
    let total_rows = len.div_ceil(GRID_COLUMNS);
    let visible_rows = (area_height.saturating_sub(2) / GRID_ROW_HEIGHT) as usize;
    let selected_row = selected / GRID_COLUMNS;
    let (start, end, _) = visible_window(total_rows, visible_rows.max(1), selected_row);
    (start, end)
}

fn row_text(row: &Row<'_>, playback: &PlaybackState) -> String {
    match row {
        Row::Playlist(p) => format!("{} · {}", p.title, p.description),
        Row::Song(t) => {
            let marker = if playback.current_id() == Some(t.id.as_str()) {
                "♪ "
            } else {
                "  "
            };
            format!(
                "{}{} · {} · {}  {}",
                marker, t.title, t.artist, t.album, t.duration
            )
        }
        Row::Category(c) => c.title.to_string(),
        Row::Item(i) => {
            let pin = if i.pinned { "* " } else { "  " };
            let dl = if i.downloaded { " ↓" } else { "" };
            format!("{}{} · {} · {}{}", pin, i.title, i.kind.label(), i.subtitle, dl)
        }
    }
}

fn row_title(row: &Row<'_>) -> String {
    match row {
        Row::Playlist(p) => p.title.clone(),
        Row::Song(t) => t.title.clone(),
        Row::Category(c) => c.title.to_string(),
        Row::Item(i) => i.title.clone(),
    }
}

fn page_title(app: &App) -> String {
    let query = match app.query() {
        Some(q) if !q.is_empty() || app.editing => format!("\"{}\"", q),
        _ => String::new(),
    };
    match app.page {
        Page::Home => " Home ".to_string(),
        Page::Search if query.is_empty() => " Search: browse all ".to_string(),
        Page::Search => format!(" Search: {} ", query),
        Page::Library => format!(
            " Your Library [{}] [{}] {} ",
            app.library_filter.label(),
            app.library_sort.label(),
            query
        ),
    }
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .zip(1..)
        .map(|(page, n)| ListItem::new(format!("{} {}", n, page.title())))
        .collect();
    let mut state = ListState::default();
    state.select(Page::ALL.iter().position(|p| *p == app.page));

    let list = List::new(items)
        .block(Block::bordered().title(" tunedeck "))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_list(frame: &mut Frame, app: &App, playback: &PlaybackState, area: Rect) {
    let rows = app.rows();
    let block = Block::bordered().title(page_title(app));

    if rows.is_empty() {
        let empty = match app.page {
            Page::Library => "No items found. Try changing your search or filters.",
            _ => "No results.",
        };
        frame.render_widget(Paragraph::new(empty).block(block), area);
        return;
    }

    let list_height = area.height.saturating_sub(2) as usize;
    let (start, end, pos) = visible_window(rows.len(), list_height, app.selected());

    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|r| ListItem::new(row_text(r, playback)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(pos));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.rows();
    let selected = app.selected();
    let (first, last) = grid_window(rows.len(), area.height, selected);

    let table_rows: Vec<ratatui::widgets::Row> = rows
        .chunks(GRID_COLUMNS)
        .enumerate()
        .skip(first)
        .take(last - first)
        .map(|(r, chunk)| {
            let cells = chunk.iter().enumerate().map(|(c, row)| {
                let cell = Cell::from(row_title(row));
                if r * GRID_COLUMNS + c == selected {
                    cell.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    cell
                }
            });
            ratatui::widgets::Row::new(cells).height(GRID_ROW_HEIGHT)
        })
        .collect();

    let widths = [Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];
    let table = Table::new(table_rows, widths)
        .column_spacing(2)
        .block(Block::bordered().title(page_title(app)));
    frame.render_widget(table, area);
}

fn draw_player_bar(frame: &mut Frame, playback: &PlaybackState, area: Rect) {
    let block = Block::bordered().title(" now playing ").padding(Padding {
        left: 1,
        right: 1,
        top: 0,
        bottom: 0,
    });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let glyph = if playback.is_loading {
        "…"
    } else if playback.is_playing {
        "▶"
    } else {
        "⏸"
    };
    let track = match &playback.current_track {
        Some(t) => format!("{} {} · {}", glyph, t.title, t.artist),
        None => format!("{} nothing queued", glyph),
    };
    frame.render_widget(Paragraph::new(track), lines[0]);

    let ratio = (playback.progress_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(if ratio.is_finite() { ratio } else { 0.0 })
        .label(format!(
            "{} / {}",
            format_time(playback.elapsed_seconds),
            format_time(playback.total_seconds)
        ));
    frame.render_widget(gauge, lines[1]);

    let mut status = vec![
        format!("vol {:.0}%", playback.volume_percent),
        format!("shuffle {}", if playback.is_shuffled { "on" } else { "off" }),
        format!("repeat {}", playback.repeat_mode.label()),
    ];
    if let Some(err) = &playback.last_error {
        status.push(err.clone());
    }
    let style = if playback.last_error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(Line::from(status.join(" • "))).style(style),
        lines[2],
    );
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    playback: &PlaybackState,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let help_height = if ui_settings.show_help { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(help_height),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(10)])
        .split(chunks[1]);
    draw_sidebar(frame, app, body[0]);
    match app.view_mode {
        ViewMode::List => draw_list(frame, app, playback, body[1]),
        ViewMode::Grid => draw_grid(frame, app, body[1]),
    }

    draw_player_bar(frame, playback, chunks[2]);

    if ui_settings.show_help {
        let text = if app.editing {
            EDIT_CONTROLS.to_string()
        } else {
            controls_text(
                controls_settings.seek_step_percent,
                controls_settings.volume_step,
            )
        };
        let footer = Paragraph::new(text)
            .block(Block::bordered().title(" controls ").padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }))
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_text_includes_configured_steps() {
        let text = controls_text(5, 10);
        assert!(text.contains("[H/L] seek -/+5%"));
        assert!(text.contains("[-/+] volume -/+10"));
        assert!(text.starts_with("[1/2/3] pages"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn visible_window_centers_selection() {
        assert_eq!(visible_window(5, 10, 3), (0, 5, 3));
        assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
        assert_eq!(visible_window(100, 10, 2), (0, 10, 2));
        assert_eq!(visible_window(100, 10, 99), (90, 100, 9));
    }

    #[test]
    fn grid_window_keeps_selected_row_visible() {
        // 30 cells make 10 rows; a 10-line area fits 4 rows of height 2.
        assert_eq!(grid_window(30, 10, 0), (0, 4));
        assert_eq!(grid_window(30, 10, 29), (6, 10));
        assert_eq!(grid_window(30, 10, 14), (2, 6));
        // Everything fits.
        assert_eq!(grid_window(8, 40, 7), (0, 3));
        // A cramped area still shows the selected row.
        assert_eq!(grid_window(30, 3, 17), (5, 6));
        assert_eq!(grid_window(0, 10, 0), (0, 0));
    }
}
