//! The embedded bunny: four right-facing poses drawn as pixel art, mirrored
//! to produce the left-facing half of the strip.

use anyhow::{bail, Result};

use crate::types::{Frame, SpriteSheet};

const HEAD: [&str; 5] = [
    "........W.W.",
    "........W.W.",
    "........P.P.",
    ".......WWWW.",
    ".......WWKWP",
];

const SIT: [&str; 5] = [
    "...WWWWWWWW.",
    "..WWWWWWWW..",
    ".GWWWWWWWW..",
    "..WWWWWWW...",
    "...GG..GG...",
];

const STRIDE: [&str; 5] = [
    "...WWWWWWWW.",
    "..WWWWWWWWW.",
    ".GWWWWWWWW..",
    "WW......WW..",
    "G........GG.",
];

const PASS: [&str; 5] = [
    "...WWWWWWWW.",
    "..WWWWWWWW..",
    ".GWWWWWWWW..",
    "..WW...WW...",
    "...GG.GG....",
];

const TUCK: [&str; 5] = [
    "....WWWWWWW.",
    "..WWWWWWWWW.",
    ".GWWWWWWWW..",
    "...WWWWW....",
    "....GGG.....",
];

fn palette(c: char) -> Result<[u8; 4]> {
    Ok(match c {
        '.' => [0, 0, 0, 0],
        'W' => [250, 250, 250, 255],
        'G' => [190, 190, 200, 255],
        'P' => [255, 160, 190, 255],
        'K' => [30, 30, 30, 255],
        other => bail!("unknown pixel-art colour {other:?}"),
    })
}

/// Rasterise pixel-art rows into a frame, optionally mirrored left-right.
fn raster(rows: &[&str], mirrored: bool) -> Result<Frame> {
    let width = rows.first().map_or(0, |r| r.chars().count());
    let mut data = Vec::with_capacity(width * rows.len() * 4);

    for (y, row) in rows.iter().enumerate() {
        let mut pixels: Vec<char> = row.chars().collect();
        if pixels.len() != width {
            bail!("pixel-art row {y} is {} wide, expected {width}", pixels.len());
        }
        if mirrored {
            pixels.reverse();
        }
        for c in pixels {
            data.extend_from_slice(&palette(c)?);
        }
    }

    Ok(Frame {
        data,
        width: width as u32,
        height: rows.len() as u32,
    })
}

fn pose(body: &[&'static str; 5]) -> Vec<&'static str> {
    HEAD.iter().chain(body.iter()).copied().collect()
}

/// Build the embedded 8-frame strip:
/// look-right, three run-right poses, look-left, three run-left poses.
pub fn load_default_sheet() -> Result<SpriteSheet> {
    let poses = [pose(&SIT), pose(&STRIDE), pose(&PASS), pose(&TUCK)];

    let mut frames = Vec::with_capacity(poses.len() * 2);
    for mirrored in [false, true] {
        for rows in &poses {
            frames.push(raster(rows, mirrored)?);
        }
    }
    SpriteSheet::new(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{LOOK_LEFT_FRAME, LOOK_RIGHT_FRAME, REQUIRED_FRAMES};

    #[test]
    fn default_sheet_is_valid() {
        let sheet = load_default_sheet().unwrap();
        assert_eq!(sheet.frame_count(), REQUIRED_FRAMES);
        assert_eq!(sheet.frame_width(), 12);
        assert_eq!(sheet.frame_height(), 10);
    }

    #[test]
    fn left_half_mirrors_right_half() {
        let sheet = load_default_sheet().unwrap();
        let right = sheet.frame(LOOK_RIGHT_FRAME).unwrap();
        let left = sheet.frame(LOOK_LEFT_FRAME).unwrap();
        let w = right.width as usize;
        for y in 0..right.height as usize {
            for x in 0..w {
                let a = (y * w + x) * 4;
                let b = (y * w + (w - 1 - x)) * 4;
                assert_eq!(right.data[a..a + 4], left.data[b..b + 4], "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn run_poses_differ_from_each_other() {
        let sheet = load_default_sheet().unwrap();
        let frames: Vec<_> = (1..=3).map(|i| sheet.frame(i).unwrap()).collect();
        assert_ne!(frames[0], frames[1]);
        assert_ne!(frames[1], frames[2]);
    }

    #[test]
    fn ragged_art_is_rejected() {
        assert!(raster(&["...", ".."], false).is_err());
    }

    #[test]
    fn unknown_colour_is_rejected() {
        assert!(raster(&["..X"], false).is_err());
    }
}
