//! Domain corpus loading.
//!
//! Each assistant domain maps to one `.txt` file inside the data directory.
//! Files are split into line chunks: trimmed, empty lines dropped, file
//! order preserved, duplicates kept.

use std::fs;
use std::path::{Path, PathBuf};

use pintar_core::config::MissingSourcePolicy;
use tracing::warn;

use crate::errors::KnowledgeResult;

/// Fixed mapping from assistant domain to corpus file.
const DOMAIN_FILES: &[(&str, &str)] = &[
    ("edukasi", "edukasi.txt"),
    ("gizi", "gizi.txt"),
    ("travel", "travel.txt"),
    ("produktivitas", "produktivitas.txt"),
];

/// File used for domains without a mapping of their own.
const DEFAULT_DOMAIN_FILE: &str = "edukasi.txt";

/// Normalize a domain identifier for lookups and comparisons.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

/// Corpus file name for a domain. Unknown domains map to the default file.
pub fn domain_file(domain: &str) -> &'static str {
    let normalized = normalize_domain(domain);
    DOMAIN_FILES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, file)| *file)
        .unwrap_or(DEFAULT_DOMAIN_FILE)
}

/// Load the chunk corpus for a domain.
///
/// When the mapped file does not exist, `policy` decides between
/// aggregating every `.txt` in the directory and starting empty.
pub fn load_corpus(
    data_dir: &Path,
    domain: &str,
    policy: MissingSourcePolicy,
) -> KnowledgeResult<Vec<String>> {
    let file = domain_file(domain);
    let path = data_dir.join(file);

    if path.is_file() {
        return read_chunks(&path);
    }

    match policy {
        MissingSourcePolicy::Aggregate => {
            warn!(
                domain = %domain,
                file = %path.display(),
                "corpus file missing, aggregating all .txt files"
            );
            Ok(aggregate_all(data_dir))
        }
        MissingSourcePolicy::Empty => {
            warn!(
                domain = %domain,
                file = %path.display(),
                "corpus file missing, starting with an empty corpus"
            );
            Ok(Vec::new())
        }
    }
}

/// Concatenate every `.txt` file in `data_dir`, in filename order.
/// Files that fail to read are logged and skipped.
fn aggregate_all(data_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(data_dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|v| v.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();
    files.sort();

    let mut chunks = Vec::new();
    for path in files {
        match read_chunks(&path) {
            Ok(lines) => chunks.extend(lines),
            Err(err) => {
                warn!(
                    file = %path.display(),
                    error = %err,
                    "skipping unreadable corpus file"
                );
            }
        }
    }
    chunks
}

fn read_chunks(path: &Path) -> KnowledgeResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
