// Panel rendering helpers.
// A refreshable panel renders its WidgetView: placeholder, loading, error
// with the retry hint, or the rendered output.

use ratatui::{prelude::*, widgets::*};

use crate::refresh::WidgetView;

use super::Palette;

/// Bordered block shared by every panel; the focused one gets the accent.
pub fn panel_block(title: &str, focused: bool, palette: &Palette) -> Block<'static> {
    let border_style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(palette.text))
}

/// Render a refresh-protocol panel in its current state.
pub fn draw_refresh_panel(
    frame: &mut Frame,
    title: &str,
    view: &WidgetView,
    focused: bool,
    palette: &Palette,
    area: Rect,
) {
    let block = panel_block(title, focused, palette);
    match view {
        WidgetView::Idle => {
            let text = Paragraph::new("Press r to load")
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.muted))
                .block(block);
            frame.render_widget(text, area);
        }
        WidgetView::Loading => {
            let text = Paragraph::new("⏳ Loading...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(text, area);
        }
        WidgetView::Error(message) => {
            let lines = vec![
                Line::styled(format!("❌ {}", message), Style::default().fg(Color::Red)),
                Line::styled("Press r to retry", Style::default().fg(palette.muted)),
            ];
            let text = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(text, area);
        }
        WidgetView::Ready(rendered) => {
            let text = Paragraph::new(rendered.as_str())
                .style(Style::default().fg(palette.text))
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(text, area);
        }
    }
}

/// Render a static text panel (calendar, clock detail).
pub fn draw_text_panel(
    frame: &mut Frame,
    title: &str,
    content: &str,
    focused: bool,
    palette: &Palette,
    area: Rect,
) {
    let text = Paragraph::new(content)
        .style(Style::default().fg(palette.text))
        .block(panel_block(title, focused, palette));
    frame.render_widget(text, area);
}

/// Render a selectable list panel with an empty-state line.
pub fn draw_list_panel(
    frame: &mut Frame,
    title: &str,
    items: Vec<ListItem<'_>>,
    list_state: &mut ListState,
    empty_message: &str,
    focused: bool,
    palette: &Palette,
    area: Rect,
) {
    let block = panel_block(title, focused, palette);
    if items.is_empty() {
        let text = Paragraph::new(empty_message)
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(text, area);
        return;
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, list_state);
}
