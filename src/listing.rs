//! Enumeration of the served root's immediate entries.

use std::path::Path;

use crate::errors::RuntimeError;

/// Reads the served root's direct children and returns their names in
/// filesystem enumeration order. No sorting is imposed; both the HTML and
/// the JSON listing render exactly this sequence.
pub async fn read_root_directory(root: &Path) -> Result<Vec<String>, RuntimeError> {
    let mut entries = tokio::fs::read_dir(root)
        .await
        .map_err(|_| RuntimeError::DirectoryReadError)?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|_| RuntimeError::DirectoryReadError)?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}
