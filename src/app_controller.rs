use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::report;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for subtitle parsing

/// Totals over one controller run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub entries: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse one subtitle file
    pub fn parse_file(&self, input_file: &Path) -> Result<SubtitleCollection, AppError> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)));
        }

        let collection = SubtitleCollection::from_file(input_file, self.config.normalizer())?;
        debug!("{:?}: {:?}", input_file, collection.stats);
        Ok(collection)
    }

    /// Parse a file or every matching file under a directory
    ///
    /// Reports go to `output_dir` when given, otherwise to `out`.
    pub fn run<W: Write>(
        &self,
        input_path: &Path,
        output_dir: Option<&Path>,
        force_overwrite: bool,
        out: &mut W,
    ) -> Result<RunSummary> {
        let (files, input_root) = if FileManager::file_exists(input_path) {
            let root = input_path.parent().unwrap_or(Path::new("")).to_path_buf();
            (vec![input_path.to_path_buf()], root)
        } else if FileManager::dir_exists(input_path) {
            let files = FileManager::find_files(input_path, &self.config.file_extension)?;
            (files, input_path.to_path_buf())
        } else {
            return Err(anyhow!("Input path does not exist: {:?}", input_path));
        };

        if files.is_empty() {
            warn!("No .{} files found under {:?}", self.config.file_extension, input_path);
        }

        let mut summary = RunSummary::default();
        for file in &files {
            match self.process_file(file, &input_root, output_dir, force_overwrite, out) {
                Ok(Some(entries)) => {
                    summary.files_processed += 1;
                    summary.entries += entries;
                }
                Ok(None) => summary.files_skipped += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {}", file, e);
                    summary.files_failed += 1;
                }
            }
        }

        info!(
            "Finished: {} file(s) parsed, {} skipped, {} failed, {} entries",
            summary.files_processed, summary.files_skipped, summary.files_failed, summary.entries
        );

        Ok(summary)
    }

    // Returns the entry count, or None when an existing report was kept
    fn process_file<W: Write>(
        &self,
        input_file: &Path,
        input_root: &Path,
        output_dir: Option<&Path>,
        force_overwrite: bool,
        out: &mut W,
    ) -> Result<Option<usize>> {
        let format = self.config.output_format;

        let output_path: Option<PathBuf> = output_dir
            .map(|dir| FileManager::generate_output_path(input_file, input_root, dir, format.extension()));

        if let Some(path) = &output_path {
            if path.exists() && !force_overwrite {
                warn!("Output file already exists: {:?}. Use -f to force overwrite.", path);
                return Ok(None);
            }
        }

        let collection = self.parse_file(input_file)?;
        let rendered = report::render(&collection.entries, format)?;

        match output_path {
            Some(path) => {
                FileManager::write_to_file(&path, &rendered)?;
                info!("Wrote {} entries to {:?}", collection.entries.len(), path);
            }
            None => {
                out.write_all(rendered.as_bytes())?;
                if !rendered.ends_with('\n') {
                    writeln!(out)?;
                }
            }
        }

        Ok(Some(collection.entries.len()))
    }
}
