use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::super::state::{MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};
use super::format::centered_rect;

pub(in crate::features::ui) fn draw_help_popup(frame: &mut ratatui::Frame, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let key = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), Style::default().fg(Color::Green)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "  Keyboard Shortcuts  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("e / Tab", "Edit region"),
        key("c", "Edit city"),
        key("Tab", "Switch field while editing"),
        key("Enter", "Fetch time for region/city"),
        key("Esc", "Stop editing / quit"),
        key("q", "Quit"),
        Line::from(""),
        Line::styled(
            "  The clock ticks locally after one fetch.",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(popup, popup_area);
}

/// Draw a warning when terminal is too small
pub(in crate::features::ui) fn draw_terminal_too_small(frame: &mut ratatui::Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::styled(
            "Terminal Too Small",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::raw("Current: "),
            Span::styled(
                format!("{}x{}", area.width, area.height),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("Minimum: "),
            Span::styled(
                format!("{MIN_TERMINAL_WIDTH}x{MIN_TERMINAL_HEIGHT}"),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" tzclock"),
    );

    frame.render_widget(paragraph, area);
}
