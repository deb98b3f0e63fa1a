use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Convert a URL fragment to a sanitized filename
pub fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\', ':', '?', '&', '=', '#', '%', '*', '"', '<', '>', '|'], "_");

    // Limit filename length
    if name.len() > 100 {
        name.chars().take(100).collect()
    } else {
        name
    }
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write each line followed by a newline, truncating the file
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()
}

/// Trimmed, non-empty lines of a file
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
