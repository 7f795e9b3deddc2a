use crate::capture::record::CaptureRecord;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CSV_FILE: &str = "posicoes_mouse.csv";
pub const CSV_HEADER: &str = "tipo,x1,y1,x2,y2";

/// Append-only CSV log of capture records.
///
/// The file is reopened for every write so each row is on disk by the time
/// [`CsvStore::append`] returns and no handle is kept between captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Opens the store at `path`, writing the header row when the file does
    /// not exist yet. Existing files are left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create csv folder {}", parent.display()))?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .with_context(|| format!("create csv file {}", path.display()))?;
            writeln!(file, "{CSV_HEADER}")
                .with_context(|| format!("write csv header to {}", path.display()))?;
            tracing::info!("created capture log {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &CaptureRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open csv file {}", self.path.display()))?;
        writeln!(file, "{}", record.csv_row())
            .with_context(|| format!("append to csv file {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_missing_parent_folders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.csv");
        let store = CsvStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert_eq!(fs::read_to_string(&path).unwrap(), "tipo,x1,y1,x2,y2\n");
    }
}
