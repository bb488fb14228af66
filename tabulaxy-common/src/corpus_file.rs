//! JSON corpus file persistence
//!
//! The corpus file is a pretty-printed JSON array of [`WordEntry`] values
//! and is the only state the enrichment tool keeps between runs. A sibling
//! backup file (`words.json` → `words_backup.json`) holds the generation
//! that was live before the most recent save.
//!
//! Saving never leaves the live path missing or half written:
//! 1. the new content is fully written and synced to a temp file in the
//!    same directory,
//! 2. the previous backup is removed and the live file is copied over it,
//! 3. the temp file is renamed onto the live path.
//!
//! A failure before step 3 leaves the live file as it was.

use crate::models::WordEntry;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Live corpus path plus its backup sibling
#[derive(Debug, Clone)]
pub struct CorpusFile {
    path: PathBuf,
    backup_path: PathBuf,
}

impl CorpusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = backup_path_for(&path);
        Self { path, backup_path }
    }

    pub fn with_backup_path(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Load all entries
    ///
    /// A missing file is an empty corpus. A file that exists but cannot be
    /// parsed is an error: treating it as empty would let the next save
    /// replace it.
    pub fn load(&self) -> Result<Vec<WordEntry>> {
        if !self.path.exists() {
            debug!("No corpus file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let entries: Vec<WordEntry> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Corpus(format!("{}: {}", self.path.display(), e)))?;

        info!("Loaded {} words from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    /// Replace the live file with `entries`, rotating the previous content
    /// into the backup
    pub fn persist(&self, entries: &[WordEntry]) -> Result<()> {
        let parent_dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }
        temp_file.as_file().sync_all()?;

        if self.path.exists() {
            if self.backup_path.exists() {
                fs::remove_file(&self.backup_path)?;
            }
            fs::copy(&self.path, &self.backup_path)?;
            debug!("Rotated {} into {}", self.path.display(), self.backup_path.display());
        }

        temp_file
            .persist(&self.path)
            .map_err(|e| Error::Corpus(format!("replace {}: {}", self.path.display(), e.error)))?;

        info!("Saved {} words to {}", entries.len(), self.path.display());
        Ok(())
    }
}

/// `dir/words.json` → `dir/words_backup.json`
pub fn backup_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string());

    let file_name = match path.extension() {
        Some(ext) => format!("{}_backup.{}", stem, ext.to_string_lossy()),
        None => format!("{}_backup", stem),
    };

    path.with_file_name(file_name)
}
