use std::{ffi::OsStr, path::Path};

use image::RgbaImage;
use nom::Parser;

use crate::{
    error::SpriteError, parser::parse_header, Sprite, SpriteFrame, SpriteFrames, SpriteHeader,
    PIXEL_DATA_OFFSET, SUPPORTED_VERSION,
};

/// Cuts the combined pixel array into per-frame RGBA grids.
///
/// Frames sit side by side in each row, `total_width / frame_count` source
/// columns apart. The division truncates; a `total_width` that does not
/// divide evenly misaligns frame boundaries exactly like the original dumps
/// do, so no attempt is made to "fix" it here.
pub fn decode_frames(i: &[u8], header: &SpriteHeader) -> Result<SpriteFrames, SpriteError> {
    if header.version != SUPPORTED_VERSION {
        return Err(SpriteError::UnsupportedVersion {
            version: header.version,
        });
    }

    if header.frame_count == 0 {
        return Err(SpriteError::ZeroFrameCount);
    }

    let frame_stride = (header.total_width / header.frame_count) as usize;
    let total_width = header.total_width as usize;
    let frame_width = header.frame_width as usize;
    let height = header.height as usize;
    let frame_count = header.frame_count as usize;

    // zero-area frames decode to empty grids, nothing to read
    if height == 0 || frame_width == 0 {
        return Ok((0..frame_count)
            .map(|_| SpriteFrame { image: Vec::new() })
            .collect());
    }

    // The furthest read the declared geometry implies. Checked once, in u128
    // so a hostile header cannot wrap the arithmetic, before touching pixels.
    let last_column = frame_stride as u128 * (frame_count as u128 - 1) + frame_width as u128;
    let end = PIXEL_DATA_OFFSET as u128
        + (height as u128 - 1) * total_width as u128 * 4
        + last_column * 4;

    if end > i.len() as u128 {
        return Err(SpriteError::PixelOutOfBounds {
            offset: (end - 4).min(usize::MAX as u128) as usize,
            len: i.len(),
        });
    }

    let frames = (0..frame_count)
        .map(|frame_index| {
            let mut image = Vec::with_capacity(height * frame_width * 4);

            for y in 0..height {
                let row_start =
                    PIXEL_DATA_OFFSET + y * total_width * 4 + frame_stride * frame_index * 4;
                image.extend_from_slice(&i[row_start..row_start + frame_width * 4]);
            }

            SpriteFrame { image }
        })
        .collect();

    Ok(frames)
}

impl Sprite {
    pub fn open_from_bytes(i: &[u8]) -> Result<Sprite, SpriteError> {
        let (_, header) = parse_header
            .parse(i)
            .map_err(move |op| SpriteError::NomError {
                source: op.to_owned(),
            })?;

        let frames = decode_frames(i, &header)?;

        Ok(Sprite { header, frames })
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Sprite, SpriteError> {
        let file = std::fs::read(path).map_err(|op| SpriteError::IOError { source: op })?;

        Self::open_from_bytes(&file)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn to_rgba8(&self, frame_index: usize) -> RgbaImage {
        let frame = &self.frames[frame_index];

        // length is always frame_width * height * 4, decode_frames built it
        RgbaImage::from_vec(
            self.header.frame_width as u32,
            self.header.height as u32,
            frame.image.clone(),
        )
        .unwrap()
    }
}
