use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use meadow_core::splash::Splash;

/// White loading screen with the centered progress label.
pub fn render_splash(f: &mut Frame, area: Rect, splash: &Splash) {
    f.render_widget(
        Block::default().style(Style::default().bg(Color::White)),
        area,
    );
    if area.height == 0 {
        return;
    }

    let label = splash.label();
    let width = (label.width() as u16).min(area.width);
    let row = area.y + area.height / 2;
    let rect = Rect::new(area.x + (area.width - width) / 2, row, width, 1);
    f.render_widget(
        Paragraph::new(Line::from(label)).style(Style::default().fg(Color::Black).bg(Color::White)),
        rect,
    );

    if !splash.stage().is_empty() && row + 1 < area.y + area.height {
        let stage = splash.stage();
        let width = (stage.width() as u16).min(area.width);
        let rect = Rect::new(area.x + (area.width - width) / 2, row + 1, width, 1);
        f.render_widget(
            Paragraph::new(Line::from(stage.to_string()))
                .style(Style::default().fg(Color::DarkGray).bg(Color::White)),
            rect,
        );
    }
}
