use std::path::Path;

use anyhow::{bail, Context, Result};
use image::GenericImageView;

use crate::clip::REQUIRED_FRAMES;
use crate::types::{Frame, SpriteSheet, SpriteSheetMeta};

/// Decode a horizontal sprite strip from PNG bytes and its JSON metadata.
pub fn load_from_bytes(png: &[u8], json: &[u8]) -> Result<SpriteSheet> {
    let meta: SpriteSheetMeta =
        serde_json::from_slice(json).context("failed to parse sprite sheet JSON")?;

    let [frame_w, frame_h] = meta.sprite_size;
    if frame_w == 0 || frame_h == 0 {
        bail!("sprite_size must be non-zero, got {frame_w}x{frame_h}");
    }
    if meta.frame_count < REQUIRED_FRAMES {
        bail!(
            "sprite strip declares {} frames; the bunny needs at least {REQUIRED_FRAMES}",
            meta.frame_count
        );
    }

    let sheet = image::load_from_memory(png).context("failed to decode sprite sheet PNG")?;
    let (sheet_w, sheet_h) = sheet.dimensions();
    let expected_w = frame_w * meta.frame_count as u32;
    if sheet_w != expected_w || sheet_h != frame_h {
        bail!(
            "sprite sheet is {sheet_w}x{sheet_h}, expected {expected_w}x{frame_h} \
             ({} frames of {frame_w}x{frame_h} in one row)",
            meta.frame_count
        );
    }

    let frames = (0..meta.frame_count as u32)
        .map(|i| Frame {
            data: sheet.crop_imm(i * frame_w, 0, frame_w, frame_h).to_rgba8().into_raw(),
            width: frame_w,
            height: frame_h,
        })
        .collect();

    SpriteSheet::new(frames)
}

/// Load a sprite strip from PNG and JSON files on disk.
pub fn load_from_files(png_path: &Path, json_path: &Path) -> Result<SpriteSheet> {
    let png = std::fs::read(png_path)
        .with_context(|| format!("failed to read {}", png_path.display()))?;
    let json = std::fs::read(json_path)
        .with_context(|| format!("failed to read {}", json_path.display()))?;
    load_from_bytes(&png, &json)
        .with_context(|| format!("invalid sprite sheet {}", png_path.display()))
}
