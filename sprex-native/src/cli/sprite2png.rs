use std::path::{Path, PathBuf};

use crate::config::parse_config;

use super::{Cli, CliRes};

pub struct Sprite2Png;

impl Cli for Sprite2Png {
    fn name(&self) -> &'static str {
        "sprite2png"
    }

    // In: path to a .sprite file or a folder of them, optional output folder
    fn cli(&self) -> CliRes {
        let args: Vec<String> = std::env::args().skip(2).collect();

        if args.is_empty() || args.len() > 2 {
            self.cli_help();
            return CliRes::Err;
        }

        let config = match parse_config() {
            Ok(config) => config,
            Err(err) => {
                println!("Cannot parse config: {}", err);
                return CliRes::Err;
            }
        };

        let input = PathBuf::from(&args[0]);

        let output = if args.len() == 2 {
            PathBuf::from(&args[1])
        } else if let Some(output_root) = &config.output_root {
            PathBuf::from(output_root)
        } else {
            default_output(&input)
        };

        let mut binding = sprex::modules::sprite2png::Sprite2Png::new();
        let job = if input.is_dir() {
            binding.sprite_root(&input)
        } else {
            binding.sprite_file(&input)
        };

        job.output_root(&output);

        if let Some(skip) = &config.skip_if_contains {
            // an empty string in the config turns the filter off
            job.skip_if_contains(if skip.is_empty() {
                None
            } else {
                Some(skip.clone())
            });
        }

        if let Err(err) = job.work() {
            println!("{}", err);
            return CliRes::Err;
        }

        CliRes::Ok
    }

    fn cli_help(&self) {
        println!(
            "\
Converts HD .sprite files into PNGs, one per frame

<path to .sprite file or folder> <output folder (optional)>
"
        )
    }
}

/// A folder converts into `<name>_png` beside it; a single file converts
/// next to itself.
fn default_output(input: &Path) -> PathBuf {
    let parent = input
        .parent()
        .map(|parent| parent.to_path_buf())
        .unwrap_or_default();

    if input.is_dir() {
        let name = input
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("sprite");

        parent.join(format!("{}_png", name))
    } else {
        parent
    }
}
