//! Terminal rendering of the list surface.
//!
//! Draws the descriptor output of the render module: search bar, header row,
//! the visible body rows, a footer mirroring the header, and the status bar
//! with pagination controls. A fetch failure replaces the whole body with a
//! single error banner; the prior rows come back on the next successful
//! load, never silently.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::render::{Align, Column, ColumnWidth, RowDescriptor};

/// Border color for all blocks.
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Dim text for disabled controls and hints.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Error banner color.
pub const COLOR_ERROR: Color = Color::Red;

/// Loading indicator color.
pub const COLOR_LOADING: Color = Color::LightGreen;

/// Spinner frames for the loading indicator.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Terminal color for a name-column accent class.
fn accent_color(accent: &str) -> Color {
    match accent {
        "colorb" => Color::Gray,
        "color3" => Color::LightBlue,
        "color2" => Color::LightGreen,
        "color9" => Color::LightYellow,
        "color4" => Color::Rgb(199, 179, 119),
        "color8" => Color::Rgb(255, 168, 0),
        _ => Color::White,
    }
}

/// Draw the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let [search_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_search_bar(frame, search_area, app);
    render_table(frame, table_area, app);
    render_status_bar(frame, status_area, app);
}

fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title("Search");
    let inner = block.inner(area);
    let input = Paragraph::new(app.search_input.as_str()).block(block);
    frame.render_widget(input, area);

    // Cursor sits after the typed text
    let cursor_x = inner.x + app.search_input.width() as u16;
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title("Items");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let widths = column_widths(&app.layout.columns);
    let header = columns_row(&app.layout.columns);
    frame.render_widget(Table::new([header], widths.clone()), header_area);

    if let Some(message) = &app.store.state().last_error {
        render_error_banner(frame, body_area, message);
    } else {
        let body: Vec<Row> = app.rows.iter().map(body_row).collect();
        frame.render_widget(Table::new(body, widths.clone()), body_area);
    }

    // Footer mirrors the header exactly
    let footer = columns_row(app.layout.footer());
    frame.render_widget(Table::new([footer], widths), footer_area);
}

fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("Error: ", Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)),
        Span::styled(message.to_string(), Style::default().fg(COLOR_ERROR)),
    ]))
    .alignment(Alignment::Center);
    let y = area.y + area.height / 2;
    let centered = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    frame.render_widget(banner, centered);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    let prev_style = control_style(app.store.can_prev());
    let next_style = control_style(app.store.can_next());
    spans.push(Span::styled("[← Prev]", prev_style));
    spans.push(Span::raw(" "));
    spans.push(Span::styled("[Next →]", next_style));
    spans.push(Span::raw("  "));
    spans.push(Span::raw(app.store.page_info()));

    if app.store.state().is_loading {
        let frame_idx = app.tick_count as usize % SPINNER_FRAMES.len();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} Loading…", SPINNER_FRAMES[frame_idx]),
            Style::default().fg(COLOR_LOADING),
        ));
    }

    spans.push(Span::styled(
        "  F5 reload · Esc quit",
        Style::default().fg(COLOR_DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn control_style(enabled: bool) -> Style {
    if enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_DIM)
    }
}

fn column_widths(columns: &[Column]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|column| match column.width {
            ColumnWidth::Pct(pct) => Constraint::Percentage(pct),
            ColumnWidth::Fill => Constraint::Fill(1),
        })
        .collect()
}

fn columns_row(columns: &[Column]) -> Row<'static> {
    let cells: Vec<TableCell> = columns
        .iter()
        .map(|column| {
            TableCell::from(
                Line::from(Span::styled(
                    column.title,
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .alignment(alignment(column.align)),
            )
        })
        .collect();
    Row::new(cells)
}

fn body_row(row: &RowDescriptor) -> Row<'static> {
    let mut cells: Vec<TableCell> = Vec::with_capacity(row.cells.len() + 2);

    if let Some(char_cell) = &row.char_cell {
        cells.push(TableCell::from(
            Line::from(Span::styled(
                char_cell.text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(alignment(char_cell.align)),
        ));
    }

    for cell in &row.cells {
        cells.push(TableCell::from(
            Line::from(cell.text.clone()).alignment(alignment(cell.align)),
        ));
    }

    cells.push(TableCell::from(Line::from(Span::styled(
        row.name.clone(),
        Style::default()
            .fg(accent_color(row.name_accent))
            .add_modifier(Modifier::BOLD),
    ))));

    Row::new(cells)
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
    }
}
