use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct MeadowRects {
    pub top: Rect,
    pub scene: Rect,
    pub hud: Rect,
    pub hud_left: Rect,
    pub hud_right: Rect,
}

/// Top bar, scene in the middle, HUD along the bottom.
pub fn meadow_layout(area: Rect, hud_height: u16) -> MeadowRects {
    let hud_height = hud_height.min(area.height.saturating_sub(4));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(hud_height),
        ])
        .split(area);

    let hud = rows[2];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(hud);

    MeadowRects {
        top: rows[0],
        scene: rows[1],
        hud,
        hud_left: cols[0],
        hud_right: cols[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_stack_vertically() {
        let r = meadow_layout(Rect::new(0, 0, 100, 40), 8);
        assert_eq!(r.top.height, 1);
        assert_eq!(r.hud.height, 8);
        assert_eq!(r.scene.height, 31);
        assert_eq!(r.scene.y, 1);
        assert_eq!(r.hud_left.width + r.hud_right.width, 100);
    }

    #[test]
    fn tiny_terminal_keeps_a_scene() {
        let r = meadow_layout(Rect::new(0, 0, 20, 6), 8);
        assert!(r.scene.height >= 3);
        assert!(r.hud.height <= 2);
    }
}
