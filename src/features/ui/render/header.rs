use crate::features::app::ClockWidget;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::state::InputMode;
use super::format::truncate_string;

pub(in crate::features::ui) fn draw_header(
    frame: &mut ratatui::Frame,
    area: Rect,
    widget: &ClockWidget,
) {
    let location = widget
        .query()
        .map(|query| truncate_string(&query.location(), 32))
        .unwrap_or_else(|| "none".to_string());
    let zone = widget.zone().label().unwrap_or_else(|| "-".to_string());

    let header = Line::from(vec![
        Span::styled(
            " tzclock",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled("Location:", Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {location} "), Style::default().fg(Color::Green)),
        Span::raw("│ "),
        Span::styled("Zone:", Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {zone} "), Style::default().fg(Color::Magenta)),
        Span::raw("│ "),
        Span::styled("State:", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {} ", widget.phase().label()),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let paragraph = Paragraph::new(header).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub(in crate::features::ui) fn draw_footer(
    frame: &mut ratatui::Frame,
    area: Rect,
    mode: InputMode,
) {
    let hints = match mode {
        InputMode::Normal => vec![
            ("q", "Quit"),
            ("?", "Help"),
            ("e", "Edit"),
            ("Enter", "Get time"),
        ],
        InputMode::Editing(_) => vec![
            ("Tab", "Switch field"),
            ("Enter", "Get time"),
            ("Esc", "Done"),
        ],
        InputMode::Help => vec![("Esc", "Close")],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!(" {key} "), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{action} "), Style::default().fg(Color::Gray)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(footer, area);
}
