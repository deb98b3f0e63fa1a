//! Cleans every `.txt` file of a directory into one corpus file.

use crate::config::MergeConfig;
use crate::error::Result;
use crate::parsers::clean_text;
use crate::results::MergeReport;
use crate::utils;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Merges `config.source_dir` into `config.output_file`
pub fn run(config: &MergeConfig) -> Result<MergeReport> {
    merge_files(&config.source_dir, &config.output_file, config.sort_entries)
}

/// Appends the cleaned contents of every `.txt` file directly inside
/// `directory` to a freshly truncated `output`, each followed by a blank line
///
/// Files are taken in directory listing order unless `sorted` is set.
pub fn merge_files(directory: &Path, output: &Path, sorted: bool) -> Result<MergeReport> {
    ::log::info!("Merging files in the directory '{}'", directory.display());

    let mut files = text_files(directory, output)?;
    if sorted {
        files.sort();
    }

    utils::ensure_parent(output)?;
    let mut out = BufWriter::new(File::create(output)?);

    for file in &files {
        ::log::info!("Processing file: {}", file.display());
        let content = fs::read_to_string(file)?;
        let cleaned = clean_text(&content);
        out.write_all(cleaned.as_bytes())?;
        out.write_all(b"\n\n")?;
        ::log::debug!("{} cleaned to {} bytes", file.display(), cleaned.len());
    }
    out.flush()?;

    ::log::info!(
        "All {} files have been merged and saved in '{}'",
        files.len(),
        output.display()
    );

    Ok(MergeReport {
        files,
        output: output.to_path_buf(),
    })
}

/// Regular `.txt` files directly inside `directory`, excluding `output`
fn text_files(directory: &Path, output: &Path) -> Result<Vec<PathBuf>> {
    let output = fs::canonicalize(output).ok();

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        if output.is_some() && fs::canonicalize(&path).ok() == output {
            ::log::debug!("Skipping the output file {}", path.display());
            continue;
        }
        files.push(path);
    }

    Ok(files)
}
