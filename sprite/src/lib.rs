pub mod error;
pub mod parser;
mod types;
mod utils;

pub use types::*;
pub use utils::decode_frames;
