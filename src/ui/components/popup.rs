use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Spans,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw a bordered message box over the middle of `area`
pub fn render_popup<B: Backend>(frame: &mut Frame<B>, area: Rect, title: &str, message: &str, hint: &str, color: Color) {
    let popup_area = centered_rect(60, 20, area);

    let text = vec![
        Spans::from(message.to_string()),
        Spans::from(""),
        Spans::from(hint.to_string()),
    ];

    let popup = Paragraph::new(text)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
