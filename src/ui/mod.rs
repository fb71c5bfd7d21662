// UI module for rendering the TUI.
// Lays out the header, the grid of widget panels, the status bar, and the
// input line / help overlay.

mod panel;

use chrono::Local;
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode};
use crate::settings::{Theme, WidgetKind};
use crate::widgets::calendar;

/// Colors derived from the active theme.
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self {
                text: Color::White,
                muted: Color::DarkGray,
                border: Color::DarkGray,
                accent: Color::Cyan,
            }
        } else {
            Self {
                text: Color::Black,
                muted: Color::Gray,
                border: Color::Gray,
                accent: Color::Blue,
            }
        }
    }
}

/// Panels per grid row.
const COLUMNS: usize = 3;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.settings.theme);
    let has_input = app.input_mode != InputMode::Normal;

    let mut constraints = vec![
        Constraint::Length(2), // Header: clock + date
        Constraint::Min(1),    // Widget grid
    ];
    if has_input {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    draw_header(frame, app, &palette, chunks[0]);
    draw_grid(frame, app, &palette, chunks[1]);
    if has_input {
        draw_input_line(frame, app, chunks[2]);
    }
    draw_status_bar(frame, app, &palette, chunks[chunks.len() - 1]);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Clock and date on the left, app title and theme on the right.
fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(24)])
        .split(area);

    let now = Local::now();
    let clock_line = Line::from(vec![
        Span::styled(
            app.clock.time_line(now),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.clock.date_line(now), Style::default().fg(palette.text)),
    ]);
    frame.render_widget(Paragraph::new(clock_line), chunks[0]);

    let right = Line::from(vec![
        Span::styled("startdeck", Style::default().fg(palette.accent)),
        Span::styled(
            format!(" · {}", app.settings.theme.label()),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        chunks[1],
    );
}

/// Visible widgets packed into rows of three.
fn draw_grid(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let visible = app.visible.clone();
    if visible.is_empty() {
        let text = Paragraph::new("All widgets hidden. Press X to restore.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let row_count = visible.len().div_ceil(COLUMNS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(area);

    for (row_index, row_widgets) in visible.chunks(COLUMNS).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, row_widgets.len() as u32);
                row_widgets.len()
            ])
            .split(rows[row_index]);
        for (col_index, widget) in row_widgets.iter().enumerate() {
            let focused = app.focused() == Some(*widget);
            draw_widget(frame, app, *widget, focused, palette, columns[col_index]);
        }
    }
}

fn draw_widget(
    frame: &mut Frame,
    app: &mut App,
    widget: WidgetKind,
    focused: bool,
    palette: &Palette,
    area: Rect,
) {
    match widget {
        WidgetKind::Weather => {
            let title = format!(
                "Weather ({}, {})",
                if app.weather.params.city.is_empty() {
                    "auto"
                } else {
                    app.weather.params.city.as_str()
                },
                app.weather.params.unit.symbol()
            );
            panel::draw_refresh_panel(
                frame,
                &title,
                &app.weather.slot.view,
                focused,
                palette,
                area,
            );
        }
        WidgetKind::Calendar => {
            let grid = calendar::month_grid(Local::now().date_naive());
            panel::draw_text_panel(frame, "Calendar", &grid, focused, palette, area);
        }
        WidgetKind::Todos => {
            let items: Vec<ListItem> = app
                .todos
                .todos
                .iter()
                .map(|todo| {
                    let marker = if todo.done { "[x]" } else { "[ ]" };
                    let style = if todo.done {
                        Style::default()
                            .fg(palette.muted)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(palette.text)
                    };
                    ListItem::new(Line::styled(format!("{} {}", marker, todo.text), style))
                })
                .collect();
            panel::draw_list_panel(
                frame,
                "To-Do",
                items,
                &mut app.todos.list_state,
                "No tasks.",
                focused,
                palette,
                area,
            );
        }
        WidgetKind::News => {
            let title = format!("News ({})", app.news.selected_name());
            panel::draw_refresh_panel(frame, &title, &app.news.slot.view, focused, palette, area);
        }
        WidgetKind::Quote => {
            panel::draw_refresh_panel(
                frame,
                "Quote",
                app.quote.view(),
                focused,
                palette,
                area,
            );
        }
        WidgetKind::Bookmarks => {
            let items: Vec<ListItem> = app
                .bookmarks
                .bookmarks
                .iter()
                .map(|bookmark| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            bookmark.title.clone(),
                            Style::default().fg(palette.text),
                        ),
                        Span::styled(
                            format!("  {}", bookmark.url),
                            Style::default().fg(palette.muted),
                        ),
                    ]))
                })
                .collect();
            panel::draw_list_panel(
                frame,
                "Bookmarks",
                items,
                &mut app.bookmarks.list_state,
                "No bookmarks.",
                focused,
                palette,
                area,
            );
        }
    }
}

fn draw_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(app.input_mode.prompt(), Style::default().fg(Color::Yellow)),
        Span::raw(app.input_buffer.as_str()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);
    let input = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(input, area);
}

/// Key hints for the focused widget, with the toast on the right.
fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let hint_style = Style::default().fg(palette.muted);
    let mut hints = vec![
        Span::raw(" Tab "),
        Span::styled("Focus", hint_style),
        Span::raw("  r "),
        Span::styled("Refresh", hint_style),
    ];
    match app.focused() {
        Some(WidgetKind::Weather) => {
            hints.extend([
                Span::raw("  c "),
                Span::styled("City", hint_style),
                Span::raw("  u "),
                Span::styled("°C/°F", hint_style),
            ]);
        }
        Some(WidgetKind::News) => {
            hints.extend([
                Span::raw("  [/] "),
                Span::styled("Feed", hint_style),
                Span::raw("  a "),
                Span::styled("Add", hint_style),
            ]);
        }
        Some(WidgetKind::Todos) => {
            hints.extend([
                Span::raw("  a "),
                Span::styled("Add", hint_style),
                Span::raw("  ␣ "),
                Span::styled("Done", hint_style),
                Span::raw("  d "),
                Span::styled("Delete", hint_style),
            ]);
        }
        Some(WidgetKind::Bookmarks) => {
            hints.extend([
                Span::raw("  a "),
                Span::styled("Add", hint_style),
                Span::raw("  d "),
                Span::styled("Delete", hint_style),
            ]);
        }
        Some(WidgetKind::Quote) => {
            hints.extend([Span::raw("  n "), Span::styled("Next", hint_style)]);
        }
        _ => {}
    }
    hints.extend([
        Span::raw("  ? "),
        Span::styled("Help", hint_style),
        Span::raw("  q "),
        Span::styled("Quit", hint_style),
    ]);

    let toast_width = app
        .toast
        .as_ref()
        .map(|(message, _)| message.chars().count() as u16 + 2)
        .unwrap_or(0);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(toast_width)])
        .split(area);
    frame.render_widget(Paragraph::new(Line::from(hints)), chunks[0]);

    if let Some((message, _)) = &app.toast {
        let toast = Span::styled(
            format!("{} ", message),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(
            Paragraph::new(Line::from(toast)).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 52;
    let popup_height = 20;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let entry = |key: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ])
    };
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("Tab", "Cycle widget focus"),
        entry("r", "Refresh / retry focused widget"),
        entry("c", "Set weather city (blank = auto)"),
        entry("u", "Toggle °C/°F"),
        entry("[/]", "Previous / next news feed"),
        entry("a", "Add (task, feed, bookmark)"),
        entry("Space", "Toggle task done"),
        entry("d / z", "Delete / undo delete"),
        entry("J/K", "Reorder list item"),
        entry("n", "Next quote"),
        entry("m", "Cycle theme"),
        entry("2", "Toggle 12/24h clock"),
        entry("x / X", "Hide widget / restore all"),
        entry("0", "Reset all settings"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(help, popup_area);
}
