//! Parses config file

use std::{
    fs::OpenOptions,
    io::Read,
    path::{Path, PathBuf},
};

use std::env;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Folder the PNGs go into when the command line does not give one.
    pub output_root: Option<String>,
    /// Overrides the default "lowend" exclusion filter. An empty string
    /// disables filtering.
    pub skip_if_contains: Option<String>,
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parses `config.toml` in the same folder as the binary. A missing file is
/// fine, the defaults apply.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path.parent().unwrap().join(CONFIG_FILE_NAME),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    let config: Config = toml::from_str(&buffer)?;

    Ok(config)
}
