use nom::{
    bytes::complete::take,
    combinator::map,
    number::complete::{le_u16, le_u32},
    IResult as _IResult, Parser,
};

use crate::{SpriteHeader, PIXEL_DATA_OFFSET};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

/// Parses the fixed 0x28-byte header. Consumes up to the start of pixel data
/// so a short buffer fails here instead of during frame decode.
///
/// The version field is carried through as-is; rejecting non-HD versions is
/// the decoder's call, not a parse failure.
pub fn parse_header(i: &'_ [u8]) -> IResult<'_, SpriteHeader> {
    map(
        (
            map(take(4usize), |arr: &[u8]| [arr[0], arr[1], arr[2], arr[3]]),
            le_u16,       // 0x04 version
            le_u16,       // 0x06 frame width
            le_u32,       // 0x08 total width
            le_u32,       // 0x0C height
            take(4usize), // 0x10 unknown
            le_u32,       // 0x14 frame count
            take(PIXEL_DATA_OFFSET - 0x18), // 0x18..0x28 unknown
        ),
        |(signature, version, frame_width, total_width, height, _, frame_count, _)| SpriteHeader {
            signature,
            version,
            frame_width,
            total_width,
            height,
            frame_count,
        },
    )
    .parse(i)
}
