//! Output path composition and file writing.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::GenerationOptions;
use crate::error::{Result, TokensError};
use crate::flatten::{Flattener, OutputSink};

use super::OutputFormat;

/// Build `<out_dir>/<file_name><extension>`.
///
/// A leading `/` and a trailing `.` are dropped from the file name, and the
/// extension gets exactly one leading dot.
pub fn compose_file_path(out_dir: &Path, file_name: &str, extension: &str) -> PathBuf {
    let name = file_name.strip_prefix('/').unwrap_or(file_name);
    let name = name.strip_suffix('.').unwrap_or(name);

    let ext = extension.trim_start_matches('.');
    let ext = ext.strip_suffix('.').unwrap_or(ext);

    clean_path(&out_dir.join(format!("{}.{}", name, ext)))
}

/// Output path for a single source in per-source mode.
///
/// The source's directory relative to `root` is mirrored below `out_dir`:
/// `tokens/color/black.json` becomes `<out_dir>/tokens/color/black.css`.
/// Sources outside `root` are written directly into `out_dir`.
pub fn source_out_path(root: &Path, out_dir: &Path, source: &Path, extension: &str) -> PathBuf {
    let relative = source.strip_prefix(root).unwrap_or(source);

    let mirrored: PathBuf = if relative.is_absolute() {
        PathBuf::new()
    } else {
        relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .collect()
            })
            .unwrap_or_default()
    };

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    compose_file_path(&root.join(out_dir).join(mirrored), &stem, extension)
}

/// Drop `.` components so printed paths stay readable.
fn clean_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Writes rendered output to disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
    out_dir: PathBuf,
    out_file_name: String,
    format: OutputFormat,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>, options: &GenerationOptions) -> Self {
        Self {
            root: root.into(),
            out_dir: options.out_dir.clone(),
            out_file_name: options.out_file_name.clone(),
            format: OutputFormat::for_options(options),
        }
    }

    /// Path of the bundled output file.
    pub fn bundle_path(&self) -> PathBuf {
        compose_file_path(
            &self.root.join(&self.out_dir),
            &self.out_file_name,
            self.format.extension(),
        )
    }

    fn write(&self, path: PathBuf, content: &str) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TokensError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        fs::write(&path, content).map_err(|e| TokensError::Io {
            path: path.clone(),
            message: format!("Failed to write {} file: {}", self.format.name(), e),
        })?;

        log::debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}

impl OutputSink for FileSink {
    fn write_bundle(&mut self, flattener: &Flattener) -> Result<PathBuf> {
        let content = self.format.render(flattener)?;
        self.write(self.bundle_path(), &content)
    }

    fn write_source(&mut self, source: &Path, flattener: &Flattener) -> Result<PathBuf> {
        let content = self.format.render(flattener)?;
        let path = source_out_path(&self.root, &self.out_dir, source, self.format.extension());
        self.write(path, &content)
    }
}
