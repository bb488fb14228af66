//! Folding an enrichment corpus file into the generated batch

use std::collections::HashSet;
use std::path::Path;
use tabulaxy_common::corpus_file::CorpusFile;
use tabulaxy_common::{Error, Result, WordEntry};
use tracing::{info, warn};

/// Append the entries of a JSON corpus file to `entries`
///
/// Entries whose normalized target is already in the batch are skipped so
/// the bulk insert does not fail on a collision the operator can't fix.
/// Returns the number appended.
pub fn append_corpus_file(entries: &mut Vec<WordEntry>, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::Corpus(format!("{} not found", path.display())));
    }
    let imported = CorpusFile::new(path).load()?;

    let mut known: HashSet<String> = entries.iter().map(WordEntry::target_key).collect();
    let mut appended = 0;

    for entry in imported {
        if known.insert(entry.target_key()) {
            entries.push(entry);
            appended += 1;
        } else {
            warn!(target_word = %entry.target, "Skipping duplicate target from corpus file");
        }
    }

    info!("Imported {} words from {}", appended, path.display());
    Ok(appended)
}
