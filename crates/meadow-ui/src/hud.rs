use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use meadow_agent::{Scene, Sprite};

use crate::layout::MeadowRects;

const KEY_HINTS: &str = "q quit  ~ console";

/// What the top bar and HUD show besides the scene itself.
pub struct HudView<'a> {
    pub status_line: &'a str,
    pub fps: f64,
    pub seed: u64,
    /// Time until the next behavior round, `None` once torn down.
    pub next_decision: Option<std::time::Duration>,
}

pub fn render_top_bar(f: &mut Frame, area: Rect, view: &HudView<'_>) {
    let fps = format!("{:.0} fps", view.fps);
    let left = format!(" MEADOW | {}", view.status_line);
    let pad = (area.width as usize)
        .saturating_sub(left.width() + fps.width() + 1)
        .max(1);
    let line = Line::from(vec![
        Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(fps, Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White)),
        area,
    );
}

/// Bottom panel: scene stats on the left, one row per bunny on the right.
pub fn render_hud(f: &mut Frame, rects: &MeadowRects, scene: &Scene, view: &HudView<'_>) {
    if rects.hud.height == 0 {
        return;
    }
    let left = Paragraph::new(Text::from(scene_lines(scene, view)))
        .block(Block::default().borders(Borders::ALL).title("SCENE"));
    f.render_widget(left, rects.hud_left);

    let right = Paragraph::new(Text::from(bunny_lines(scene)))
        .block(Block::default().borders(Borders::ALL).title("BUNNIES"));
    f.render_widget(right, rects.hud_right);
}

fn scene_lines(scene: &Scene, view: &HudView<'_>) -> Vec<Line<'static>> {
    let next = match view.next_decision {
        Some(d) => format!("{:.1}s", d.as_secs_f64()),
        None => "stopped".to_string(),
    };
    vec![
        Line::from(format!("seed    {}", view.seed)),
        Line::from(format!("frames  {}", scene.frames())),
        Line::from(format!(
            "rounds  {} (next in {next})",
            scene.driver().rounds()
        )),
        Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
    ]
}

fn bunny_lines(scene: &Scene) -> Vec<Line<'static>> {
    if scene.agents().is_empty() {
        return vec![Line::from("(empty meadow)")];
    }
    scene
        .agents()
        .iter()
        .map(|bunny| {
            let state = format!("{:?}", bunny.state());
            let color = if bunny.state().is_running() {
                Color::Green
            } else {
                Color::Cyan
            };
            Line::from(vec![
                Span::raw(format!("{:>4} ", bunny.id().to_string())),
                Span::styled(format!("{state:<9}"), Style::default().fg(color)),
                Span::raw(format!(
                    " x={:>6.1} frame={}",
                    bunny.position().x,
                    bunny.sprite().current_frame()
                )),
            ])
        })
        .collect()
}
