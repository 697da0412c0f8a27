use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use meadow_agent::scene::SPRITE_PIXEL_SIZE;
use meadow_agent::scenery::{GROUND_HEIGHT, SKY_TILE_WIDTH};
use meadow_agent::{Scene, Sprite};

use crate::canvas::{Canvas, Rgb};

/// Sky colour, `#1099bb`.
const SKY: Rgb = (0x10, 0x99, 0xbb);
const CLOUD: Rgb = (235, 245, 250);
const GRASS: Rgb = (96, 170, 72);
const SOIL: Rgb = (120, 84, 52);
const BUSH: Rgb = (46, 122, 56);

/// Cloud puffs in one sky tile: `(x, y, w, h)` in world pixels.
const CLOUDS: [(f32, f32, f32, f32); 3] = [
    (20.0, 60.0, 70.0, 18.0),
    (130.0, 150.0, 50.0, 14.0),
    (190.0, 40.0, 40.0, 12.0),
];

/// World→canvas scaling for one render.
struct Projection {
    sx: f32,
    sy: f32,
}

impl Projection {
    fn new(canvas: &Canvas, world_w: f32, world_h: f32) -> Self {
        Self {
            sx: canvas.width() as f32 / world_w,
            sy: canvas.height() as f32 / world_h,
        }
    }

    fn x(&self, wx: f32) -> i32 {
        (wx * self.sx).floor() as i32
    }

    fn y(&self, wy: f32) -> i32 {
        (wy * self.sy).floor() as i32
    }

    fn w(&self, ww: f32) -> i32 {
        (ww * self.sx).round().max(1.0) as i32
    }

    fn h(&self, wh: f32) -> i32 {
        (wh * self.sy).round().max(1.0) as i32
    }
}

/// Draw the meadow scene (sky, ground, bushes, bunnies, title) into `area`.
pub fn render_meadow(f: &mut Frame, area: Rect, scene: &Scene) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let world = scene.world();
    let scenery = &world.scenery;
    let mut canvas = Canvas::for_area(area);
    let p = Projection::new(&canvas, scenery.width(), scenery.height());

    canvas.fill_rect(0, 0, canvas.width() as i32, canvas.height() as i32, SKY);
    let mut tile_x = scenery.sky_offset() - SKY_TILE_WIDTH;
    while tile_x < scenery.width() {
        for (cx, cy, cw, ch) in CLOUDS {
            canvas.fill_rect(p.x(tile_x + cx), p.y(cy), p.w(cw), p.h(ch), CLOUD);
        }
        tile_x += SKY_TILE_WIDTH;
    }

    let ground_top = scenery.ground_top();
    let ground_y = p.y(ground_top);
    let ground_h = (canvas.height() as i32 - ground_y).max(p.h(GROUND_HEIGHT));
    canvas.fill_rect(0, ground_y, canvas.width() as i32, ground_h, SOIL);
    canvas.fill_rect(0, ground_y, canvas.width() as i32, p.h(12.0), GRASS);

    for bush in scenery.bushes() {
        canvas.fill_rect(
            p.x(bush.x),
            p.y(ground_top - bush.size),
            p.w(bush.size),
            p.h(bush.size),
            BUSH,
        );
    }

    let sheet = &world.sheet;
    for bunny in scene.agents() {
        let sprite = bunny.sprite();
        let Some(frame) = sheet.frame(sprite.current_frame()) else {
            continue;
        };
        let pos = sprite.position();
        let size = sprite.scale() * SPRITE_PIXEL_SIZE;
        canvas.blit(
            &frame.data,
            frame.width,
            frame.height,
            p.x(pos.x),
            p.y(pos.y),
            p.w(frame.width as f32 * size) as u32,
            p.h(frame.height as f32 * size) as u32,
        );
    }

    canvas.flush(f.buffer_mut(), area);
    render_title(f, area, &world.title, p.y(100.0) / 2);
}

fn render_title(f: &mut Frame, area: Rect, title: &str, row: i32) {
    let lines: Vec<Line> = title.lines().map(Line::from).collect();
    let row = (row.max(0) as u16).min(area.height.saturating_sub(1));
    let height = (lines.len() as u16).min(area.height - row);
    let rect = Rect::new(area.x, area.y + row, area.width, height);
    let title = Paragraph::new(lines).alignment(Alignment::Center).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(SKY.0, SKY.1, SKY.2))
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, rect);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{backend::TestBackend, Terminal};

    use meadow_agent::{load_default_sheet, SceneRng};
    use meadow_config::MeadowConfig;

    use super::*;

    fn scene() -> Scene {
        let config = MeadowConfig::default();
        Scene::from_config(
            &config,
            load_default_sheet().unwrap(),
            &mut SceneRng::new(4),
            Instant::now(),
        )
        .unwrap()
    }

    fn draw(width: u16, height: u16, scene: &Scene) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_meadow(f, f.area(), scene))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn sky_and_ground_fill_the_area() {
        let buf = draw(80, 24, &scene());
        let sky_cell = buf.cell((0, 1)).unwrap();
        assert_eq!(sky_cell.symbol(), "▀");
        let ground_cell = buf.cell((0, 23)).unwrap();
        assert_eq!(ground_cell.fg, Color::Rgb(SOIL.0, SOIL.1, SOIL.2));
    }

    #[test]
    fn title_is_centered_text() {
        let buf = draw(80, 24, &scene());
        let text: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect();
        assert!(text.contains("WELCOME"));
        assert!(text.contains("Bunny Meadow"));
    }

    #[test]
    fn bunnies_are_painted_white() {
        let buf = draw(120, 40, &scene());
        let white = Color::Rgb(250, 250, 250);
        let painted = buf
            .content()
            .iter()
            .any(|cell| cell.fg == white || cell.bg == white);
        assert!(painted, "no bunny pixels found");
    }

    #[test]
    fn zero_area_is_ignored() {
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal
            .draw(|f| render_meadow(f, Rect::new(0, 0, 0, 0), &scene()))
            .unwrap();
    }
}
