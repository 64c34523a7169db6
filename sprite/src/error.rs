#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("Error parsing sprite: {source}")]
    NomError {
        #[source]
        source: nom::Err<nom::error::Error<Vec<u8>>>,
    },
    #[error("Error opening sprite: {source}")]
    IOError {
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported sprite version: {version}")]
    UnsupportedVersion { version: u16 },
    #[error("Sprite declares zero frames")]
    ZeroFrameCount,
    #[error("Pixel read at byte {offset} is past the end of the file ({len} bytes)")]
    PixelOutOfBounds { offset: usize, len: usize },
}

impl SpriteError {
    /// A version mismatch is an expected skip condition, not a broken file.
    pub fn is_version_skip(&self) -> bool {
        matches!(self, SpriteError::UnsupportedVersion { .. })
    }
}
