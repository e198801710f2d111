use crate::features::app::ClockWidget;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::Duration;

use super::super::state::{Field, FormState, InputMode};
use super::format::spinner_frame;

pub(in crate::features::ui) fn draw_main(
    frame: &mut ratatui::Frame,
    area: Rect,
    widget: &ClockWidget,
    form: &FormState,
    mode: InputMode,
    uptime: Duration,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Form
            Constraint::Length(5), // Display
            Constraint::Min(1),    // Status
        ])
        .split(area);

    draw_form(frame, rows[0], form, mode);
    draw_display(frame, rows[1], widget, uptime);
    draw_status(frame, rows[2], widget);
}

fn draw_form(frame: &mut ratatui::Frame, area: Rect, form: &FormState, mode: InputMode) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (field, title, column) in [
        (Field::Region, " Region ", columns[0]),
        (Field::City, " City ", columns[1]),
    ] {
        let focused = mode == InputMode::Editing(field);
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let mut spans = vec![Span::raw(form.field(field).to_string())];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Gray)));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(input, column);
    }
}

fn draw_display(frame: &mut ratatui::Frame, area: Rect, widget: &ClockWidget, uptime: Duration) {
    let text = widget.display();
    let (line, border) = if widget.is_loading() {
        (
            Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame(uptime)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(text.to_string(), Style::default().fg(Color::Yellow)),
            ]),
            Color::Yellow,
        )
    } else if widget.is_error() {
        (
            Line::styled(
                text.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Color::Red,
        )
    } else if text.is_empty() {
        (
            Line::styled(
                "Enter a region and city, then press Enter",
                Style::default().fg(Color::DarkGray),
            ),
            Color::DarkGray,
        )
    } else {
        (
            Line::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Color::Cyan,
        )
    };

    let display = Paragraph::new(vec![Line::from(""), line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Time ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(display, area);
}

fn draw_status(frame: &mut ratatui::Frame, area: Rect, widget: &ClockWidget) {
    let mut lines = Vec::new();
    if let Some(ticker) = widget.active_ticker() {
        lines.push(Line::from(vec![
            Span::styled(" ticker ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("#{}", ticker.id()), Style::default().fg(Color::Green)),
        ]));
    }
    if let Some(err) = widget.last_error() {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", err.label()),
                Style::default().fg(Color::Black).bg(Color::Red),
            ),
            Span::styled(format!(" {err}"), Style::default().fg(Color::Red)),
        ]));
    }

    let status = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}
