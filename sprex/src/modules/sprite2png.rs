//! Extracts HD sprite frames into PNG files, one image per frame.
//!
//! Every input file ends in exactly one of three states: converted, skipped
//! because it is not an HD sprite, or failed because it cannot be read or
//! decoded. A bad file never stops the rest of the batch.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use sprite::{error::SpriteError, Sprite, SUPPORTED_VERSION};

use crate::{
    err,
    utils::misc::{find_sprite_files, rebase_parent},
};

/// Low-resolution variants dumped next to the HD sprites, not worth keeping.
pub const DEFAULT_SKIP_IF_CONTAINS: &str = "lowend";

#[derive(Clone)]
pub struct Sprite2PngOptions {
    /// Skips files whose name contains this string (case-insensitive).
    /// `None` disables the filter.
    pub skip_if_contains: Option<String>,
}

impl Default for Sprite2PngOptions {
    fn default() -> Self {
        Self {
            skip_if_contains: Some(DEFAULT_SKIP_IF_CONTAINS.to_string()),
        }
    }
}

pub enum FileOutcome {
    /// Every frame written, paths in frame order.
    Ok(Vec<PathBuf>),
    /// Not an HD sprite, left alone.
    Skip { version: u16 },
    Err(eyre::Report),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Sprite2PngStats {
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct Sprite2Png {
    sprite_file: Option<PathBuf>,
    sprite_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
    options: Sprite2PngOptions,
}

impl Default for Sprite2Png {
    fn default() -> Self {
        Self {
            sprite_file: Default::default(),
            sprite_root: Default::default(),
            output_root: Default::default(),
            options: Default::default(),
        }
    }
}

impl Sprite2Png {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts one .sprite file.
    pub fn sprite_file(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.sprite_file = Some(path.into());

        self
    }

    /// Converts a whole folder, recursively.
    pub fn sprite_root(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.sprite_root = Some(path.into());

        self
    }

    pub fn output_root(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.output_root = Some(path.into());

        self
    }

    pub fn skip_if_contains(&mut self, v: Option<String>) -> &mut Self {
        self.options.skip_if_contains = v;

        self
    }

    fn check_input(&self) -> eyre::Result<()> {
        if self.sprite_file.is_none() && self.sprite_root.is_none() {
            return err!("no input set");
        }

        if let Some(file) = &self.sprite_file {
            if !file.is_file() {
                return err!("sprite file `{}` is not a file", file.display());
            }
        }

        if let Some(root) = &self.sprite_root {
            if !root.is_dir() {
                return err!("input folder `{}` is not a folder", root.display());
            }
        }

        Ok(())
    }

    /// (source file, folder its PNGs go into)
    fn build_tasks(&self, output_root: &Path) -> eyre::Result<Vec<(PathBuf, PathBuf)>> {
        let mut tasks: Vec<(PathBuf, PathBuf)> = vec![];

        if let Some(file) = &self.sprite_file {
            tasks.push((file.clone(), output_root.to_path_buf()));
        }

        if let Some(root) = &self.sprite_root {
            let files = find_sprite_files(root, self.options.skip_if_contains.as_deref())?;

            for file in files {
                let out_dir = rebase_parent(root, output_root, &file)?;
                tasks.push((file, out_dir));
            }
        }

        Ok(tasks)
    }

    pub fn work(&self) -> eyre::Result<Sprite2PngStats> {
        self.check_input()?;

        let Some(output_root) = &self.output_root else {
            return err!("output folder is not set");
        };

        let tasks = self.build_tasks(output_root)?;

        println!("[INFO] Found {} sprite(s) to process.", tasks.len());

        let outcomes: Vec<FileOutcome> = tasks
            .par_iter()
            .map(|(file, out_dir)| {
                let outcome = extract_sprite(file, out_dir);

                match &outcome {
                    FileOutcome::Ok(outputs) => {
                        for output in outputs {
                            println!("[OK] {}", output.display());
                        }
                    }
                    FileOutcome::Skip { version } => {
                        println!(
                            "[SKIP] {} - version {} != {}",
                            file.display(),
                            version,
                            SUPPORTED_VERSION
                        );
                    }
                    FileOutcome::Err(report) => {
                        println!("[ERROR] {}: {}", file.display(), report);
                    }
                }

                outcome
            })
            .collect();

        let stats = outcomes
            .iter()
            .fold(Sprite2PngStats::default(), |mut stats, outcome| {
                match outcome {
                    FileOutcome::Ok(_) => stats.ok += 1,
                    FileOutcome::Skip { .. } => stats.skipped += 1,
                    FileOutcome::Err(_) => stats.failed += 1,
                }

                stats
            });

        println!(
            "[DONE] {} converted, {} skipped, {} failed.",
            stats.ok, stats.skipped, stats.failed
        );

        Ok(stats)
    }
}

/// Decodes one sprite file and writes its frames under `out_dir`.
pub fn extract_sprite(sprite_path: &Path, out_dir: &Path) -> FileOutcome {
    let sprite = match Sprite::open_from_file(sprite_path) {
        Ok(sprite) => sprite,
        Err(SpriteError::UnsupportedVersion { version }) => {
            return FileOutcome::Skip { version }
        }
        Err(err) => return FileOutcome::Err(err.into()),
    };

    match write_frames(&sprite, sprite_path, out_dir) {
        Ok(outputs) => FileOutcome::Ok(outputs),
        Err(report) => FileOutcome::Err(report),
    }
}

fn write_frames(
    sprite: &Sprite,
    sprite_path: &Path,
    out_dir: &Path,
) -> eyre::Result<Vec<PathBuf>> {
    let Some(stem) = sprite_path.file_stem().and_then(|stem| stem.to_str()) else {
        return err!(
            "sprite file `{}` does not have a usable name",
            sprite_path.display()
        );
    };

    fs::create_dir_all(out_dir)?;

    let mut outputs = Vec::with_capacity(sprite.frame_count());

    for frame_index in 0..sprite.frame_count() {
        let out_path = out_dir.join(format!("{}.{:02}.png", stem, frame_index));

        sprite.to_rgba8(frame_index).save(&out_path)?;
        outputs.push(out_path);
    }

    Ok(outputs)
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use sprite::PIXEL_DATA_OFFSET;

    use super::{FileOutcome, Sprite2Png, Sprite2PngStats};

    fn build_sprite(version: u16, frame_count: u32) -> Vec<u8> {
        // 1 row, 2 columns per frame
        let total_width = 2 * frame_count.max(1);
        let mut buf = vec![0u8; PIXEL_DATA_OFFSET];

        buf[0x00..0x04].copy_from_slice(b"SpA1");
        buf[0x04..0x06].copy_from_slice(&version.to_le_bytes());
        buf[0x06..0x08].copy_from_slice(&2u16.to_le_bytes());
        buf[0x08..0x0C].copy_from_slice(&total_width.to_le_bytes());
        buf[0x0C..0x10].copy_from_slice(&1u32.to_le_bytes());
        buf[0x14..0x18].copy_from_slice(&frame_count.to_le_bytes());
        buf.extend(std::iter::repeat(0x7F).take(total_width as usize * 4));

        buf
    }

    fn scratch(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sprex-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        dir
    }

    #[test]
    fn no_input() {
        assert!(Sprite2Png::new().work().is_err());
    }

    #[test]
    fn no_output() {
        let root = scratch("no-output");
        fs::create_dir_all(&root).unwrap();

        assert!(Sprite2Png::new().sprite_root(&root).work().is_err());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn missing_root_is_fatal() {
        let root = scratch("missing-root");
        let out = scratch("missing-root-out");

        assert!(Sprite2Png::new()
            .sprite_root(&root)
            .output_root(&out)
            .work()
            .is_err());
    }

    #[test]
    fn single_file() {
        let root = scratch("single");
        let out = scratch("single-out");
        fs::create_dir_all(&root).unwrap();

        let file = root.join("cursor.sprite");
        fs::write(&file, build_sprite(31, 3)).unwrap();

        let stats = Sprite2Png::new()
            .sprite_file(&file)
            .output_root(&out)
            .work()
            .unwrap();

        assert_eq!(
            stats,
            Sprite2PngStats {
                ok: 1,
                skipped: 0,
                failed: 0
            }
        );

        for frame_index in 0..3 {
            let out_path = out.join(format!("cursor.{:02}.png", frame_index));
            let image = image::open(&out_path).unwrap();
            assert_eq!(image.width(), 2);
            assert_eq!(image.height(), 1);
        }

        fs::remove_dir_all(&root).unwrap();
        fs::remove_dir_all(&out).unwrap();
    }

    #[test]
    fn folder_mirrors_tree_and_tallies() {
        let root = scratch("batch");
        let out = scratch("batch-out");
        fs::create_dir_all(root.join("hd/ui")).unwrap();

        // converted
        fs::write(root.join("hd/ui/cursor.sprite"), build_sprite(31, 1)).unwrap();
        // skipped, wrong version
        fs::write(root.join("hd/legacy.sprite"), build_sprite(30, 1)).unwrap();
        // failed, truncated header
        fs::write(root.join("hd/broken.sprite"), [0u8; 0x10]).unwrap();
        // filtered out before tasks are built
        fs::write(root.join("hd/ui/cursor_LowEnd.sprite"), build_sprite(31, 1)).unwrap();
        // not a sprite file at all
        fs::write(root.join("hd/readme.txt"), "hello").unwrap();

        let stats = Sprite2Png::new()
            .sprite_root(&root)
            .output_root(&out)
            .work()
            .unwrap();

        assert_eq!(
            stats,
            Sprite2PngStats {
                ok: 1,
                skipped: 1,
                failed: 1
            }
        );

        assert!(out.join("hd/ui/cursor.00.png").is_file());
        assert!(!out.join("hd/legacy.00.png").exists());
        assert!(!out.join("hd/ui/cursor_LowEnd.00.png").exists());

        fs::remove_dir_all(&root).unwrap();
        fs::remove_dir_all(&out).unwrap();
    }

    #[test]
    fn skip_filter_can_be_disabled() {
        let root = scratch("no-filter");
        let out = scratch("no-filter-out");
        fs::create_dir_all(&root).unwrap();

        fs::write(root.join("cursor_lowend.sprite"), build_sprite(31, 1)).unwrap();

        let stats = Sprite2Png::new()
            .sprite_root(&root)
            .output_root(&out)
            .skip_if_contains(None)
            .work()
            .unwrap();

        assert_eq!(stats.ok, 1);
        assert!(out.join("cursor_lowend.00.png").is_file());

        fs::remove_dir_all(&root).unwrap();
        fs::remove_dir_all(&out).unwrap();
    }

    #[test]
    fn outcome_for_unreadable_file() {
        let missing = scratch("unreadable").join("nope.sprite");

        let outcome = super::extract_sprite(&missing, &scratch("unreadable-out"));

        assert!(matches!(outcome, FileOutcome::Err(_)));
    }
}
