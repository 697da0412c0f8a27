use crate::rng::SceneRng;

/// Height of the ground band along the bottom of the viewport.
pub const GROUND_HEIGHT: f32 = 100.0;
pub const BUSH_COUNT: usize = 20;
pub const BUSH_MIN_SIZE: u32 = 20;
pub const BUSH_MAX_SIZE: u32 = 50;
/// Bushes keep this far from the side edges.
pub const BUSH_EDGE_INSET: u32 = 30;
/// Sky tile scroll per frame, in world pixels.
pub const SKY_DRIFT: f32 = 0.2;
/// Width of one repeat of the sky pattern.
pub const SKY_TILE_WIDTH: f32 = 256.0;

/// A bush sitting on the ground line; `x` is its left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bush {
    pub x: f32,
    pub size: f32,
}

/// Static decoration around the bunnies plus the drifting sky offset.
#[derive(Debug, Clone)]
pub struct Scenery {
    width: f32,
    height: f32,
    sky_offset: f32,
    bushes: Vec<Bush>,
}

impl Scenery {
    pub fn generate(width: f32, height: f32, rng: &mut SceneRng) -> Self {
        let max_x = (width as u32).saturating_sub(BUSH_EDGE_INSET);
        let bushes = (0..BUSH_COUNT)
            .map(|_| Bush {
                size: rng.range_u32(BUSH_MIN_SIZE..=BUSH_MAX_SIZE) as f32,
                x: rng.range_u32(BUSH_EDGE_INSET..=max_x) as f32,
            })
            .collect();

        Self {
            width,
            height,
            sky_offset: 0.0,
            bushes,
        }
    }

    /// Scroll the sky by one frame's drift.
    pub fn advance(&mut self) {
        self.sky_offset = (self.sky_offset + SKY_DRIFT) % SKY_TILE_WIDTH;
    }

    /// World y of the top of the ground band.
    pub fn ground_top(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    pub fn sky_offset(&self) -> f32 {
        self.sky_offset
    }

    pub fn bushes(&self) -> &[Bush] {
        &self.bushes
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bushes_respect_size_and_inset() {
        let scenery = Scenery::generate(1024.0, 768.0, &mut SceneRng::new(3));
        assert_eq!(scenery.bushes().len(), BUSH_COUNT);
        for bush in scenery.bushes() {
            assert!((20.0..=50.0).contains(&bush.size), "{bush:?}");
            assert!((30.0..=994.0).contains(&bush.x), "{bush:?}");
        }
    }

    #[test]
    fn ground_sits_at_bottom() {
        let scenery = Scenery::generate(1024.0, 768.0, &mut SceneRng::new(3));
        assert_eq!(scenery.ground_top(), 668.0);
    }

    #[test]
    fn sky_drifts_and_wraps() {
        let mut scenery = Scenery::generate(1024.0, 768.0, &mut SceneRng::new(3));
        for _ in 0..5 {
            scenery.advance();
        }
        assert!((scenery.sky_offset() - 1.0).abs() < 1e-4);

        for _ in 0..2000 {
            scenery.advance();
        }
        assert!(scenery.sky_offset() < SKY_TILE_WIDTH);
    }
}
