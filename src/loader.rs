//! Loading documents from a directory of plain-text files.

use std::path::Path;

use tracing::{info, warn};

use crate::document::Document;
use crate::error::{RagError, Result};

/// Load every `.txt` file in `dir` as a [`Document`].
///
/// The document id is the file name. Files are loaded in file-name order so
/// repeated loads produce the same document sequence. Files that are not
/// valid UTF-8 or cannot be read are skipped with a warning; only a missing
/// or unreadable directory is an error. An empty directory yields an empty
/// `Vec` — callers decide whether that is fatal.
pub fn load_from_directory(dir: impl AsRef<Path>) -> Result<Vec<Document>> {
    let dir = dir.as_ref();

    let entries = std::fs::read_dir(dir).map_err(|e| {
        RagError::Input(format!("cannot read document directory {}: {e}", dir.display()))
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                warn!(path = %path.display(), "skipping file with non-UTF-8 name");
                continue;
            }
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => documents.push(Document::new(name, text)),
            Err(e) => {
                warn!(file = %name, error = %e, "skipping unreadable document");
            }
        }
    }

    info!(dir = %dir.display(), document_count = documents.len(), "loaded documents");
    Ok(documents)
}
