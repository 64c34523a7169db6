pub mod modules;
pub mod utils;
