// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::CSV_SEP;
use crate::csv::write_row;
use crate::data::{AgentRound, MatchRow};
use crate::error::SinkError;

/// Create/truncate `path` and write the header plus every row.
/// Parent directories are created as needed.
pub fn write_table<I>(path: &Path, headers: &[&str], rows: I) -> Result<PathBuf, SinkError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    ensure_parent(path)?;

    let file = File::create(path).map_err(SinkError::io(path))?;
    let mut out = BufWriter::new(file);
    write_row(&mut out, headers, CSV_SEP).map_err(SinkError::io(path))?;
    for row in rows {
        write_row(&mut out, row.as_slice(), CSV_SEP).map_err(SinkError::io(path))?;
    }
    out.flush().map_err(SinkError::io(path))?;
    Ok(path.to_path_buf())
}

pub fn write_agent_rounds(path: &Path, rows: &[AgentRound]) -> Result<PathBuf, SinkError> {
    write_table(path, &AgentRound::HEADERS, rows.iter().map(AgentRound::cells))
}

pub fn write_matches(path: &Path, rows: &[MatchRow]) -> Result<PathBuf, SinkError> {
    write_table(path, &MatchRow::HEADERS, rows.iter().map(MatchRow::cells))
}

pub fn ensure_parent(path: &Path) -> Result<(), SinkError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), SinkError> {
    if dir.exists() && !dir.is_dir() {
        return Err(SinkError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        });
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(SinkError::io(dir))?;
    }
    Ok(())
}
