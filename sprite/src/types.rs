/// The only sprite version this crate handles. Everything else is the
/// low-end/legacy family and gets skipped.
pub const SUPPORTED_VERSION: u16 = 31;

/// The header is a fixed 0x28 bytes. Pixel data follows immediately.
pub const PIXEL_DATA_OFFSET: usize = 0x28;

/// Fixed-offset header block at the start of a .sprite file.
///
/// All multi-byte fields are little-endian. `total_width` spans every frame
/// laid side by side; `frame_width` is the width of one frame.
#[derive(Debug)]
pub struct SpriteHeader {
    pub signature: [u8; 4],
    /// At 0x04.
    pub version: u16,
    /// At 0x06.
    pub frame_width: u16,
    /// At 0x08.
    pub total_width: u32,
    /// At 0x0C.
    pub height: u32,
    /// At 0x14.
    pub frame_count: u32,
}

/// Tightly packed RGBA8 rows, `height * frame_width * 4` bytes.
pub type SpriteFrameImage = Vec<u8>;

#[derive(Debug)]
pub struct SpriteFrame {
    pub image: SpriteFrameImage,
}

pub type SpriteFrames = Vec<SpriteFrame>;

#[derive(Debug)]
pub struct Sprite {
    pub header: SpriteHeader,
    pub frames: SpriteFrames,
}
