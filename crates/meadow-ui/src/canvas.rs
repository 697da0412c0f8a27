use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Minimum alpha (0–255) for a sprite pixel to be drawn.
const ALPHA_THRESHOLD: u8 = 128;

pub type Rgb = (u8, u8, u8);

/// Off-screen pixel grid flushed to the terminal with half-block glyphs.
///
/// A terminal cell holds two vertically stacked pixels, so a canvas for an
/// `N×M` cell area is `N` pixels wide and `2M` pixels tall. Unpainted pixels
/// leave the cell untouched.
pub struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<Option<Rgb>>,
}

impl Canvas {
    /// Canvas matching a cell area.
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width, area.height.saturating_mul(2))
    }

    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).and_then(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Some(color);
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color);
            }
        }
    }

    /// Draw an RGBA image scaled into `dest_w×dest_h` at `(dest_x, dest_y)`
    /// with nearest-neighbour sampling. Transparent pixels are skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &mut self,
        data: &[u8],
        src_width: u32,
        src_height: u32,
        dest_x: i32,
        dest_y: i32,
        dest_w: u32,
        dest_h: u32,
    ) {
        if src_width == 0 || src_height == 0 || dest_w == 0 || dest_h == 0 {
            return;
        }
        for dy in 0..dest_h {
            let sy = dy * src_height / dest_h;
            for dx in 0..dest_w {
                let sx = dx * src_width / dest_w;
                let Some((r, g, b, a)) = sample_pixel(data, src_width, sx, sy) else {
                    continue;
                };
                if a >= ALPHA_THRESHOLD {
                    self.put(dest_x + dx as i32, dest_y + dy as i32, (r, g, b));
                }
            }
        }
    }

    /// Write the canvas into `area` of `buf`, two pixels per cell.
    pub fn flush(&self, buf: &mut Buffer, area: Rect) {
        let cols = self.width.min(area.width);
        let rows = (self.height / 2).min(area.height);
        for cy in 0..rows {
            for cx in 0..cols {
                let top = self.get(cx as i32, cy as i32 * 2);
                let bottom = self.get(cx as i32, cy as i32 * 2 + 1);
                let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) else {
                    continue;
                };
                match (top, bottom) {
                    (Some(t), Some(b)) => {
                        cell.set_char('▀');
                        cell.set_fg(rgb(t));
                        cell.set_bg(rgb(b));
                    }
                    (Some(t), None) => {
                        cell.set_char('▀');
                        cell.set_fg(rgb(t));
                        cell.set_bg(Color::Reset);
                    }
                    (None, Some(b)) => {
                        cell.set_char('▄');
                        cell.set_fg(rgb(b));
                        cell.set_bg(Color::Reset);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Read an RGBA pixel from row-major data; `None` when out of range.
fn sample_pixel(data: &[u8], width: u32, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
    let idx = (y as usize)
        .checked_mul(width as usize)?
        .checked_add(x as usize)?
        .checked_mul(4)?;
    let px = data.get(idx..idx + 4)?;
    Some((px[0], px[1], px[2], px[3]))
}
