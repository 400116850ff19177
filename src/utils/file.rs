//! File name sanitization and saving of generated payloads

use crate::error::StorageError;
use std::path::{Path, PathBuf};

const FALLBACK_FILE_NAME: &str = "download";

/// Replace path separators and other unsafe characters with underscores.
///
/// Names that would resolve to the directory itself (`""`, `.`, `..`) fall
/// back to `download`.
pub fn sanitize_file_name(input: &str) -> String {
    let sanitized: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        _ => sanitized,
    }
}

/// Join a sanitized file name onto `dir`
pub fn build_safe_filepath(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(sanitize_file_name(file_name))
}

/// Write `contents` to `dir/file_name`, creating `dir` when missing.
pub async fn save_to_dir(
    dir: &Path,
    file_name: &str,
    contents: &[u8],
) -> Result<PathBuf, StorageError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| StorageError::FileIo {
            path: dir.to_string_lossy().to_string(),
            source,
        })?;

    let path = build_safe_filepath(dir, file_name);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

    log::debug!("Saved {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_file_name_replaces_separators() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\x.csv"), "C__temp_x.csv");
        assert_eq!(sanitize_file_name("relatório|mar.csv"), "relatório_mar.csv");
    }

    #[test]
    fn test_sanitize_file_name_keeps_safe_names() {
        assert_eq!(
            sanitize_file_name("template_embarques.csv"),
            "template_embarques.csv"
        );
    }

    #[test]
    fn test_sanitize_file_name_falls_back_for_directory_names() {
        assert_eq!(sanitize_file_name(""), "download");
        assert_eq!(sanitize_file_name(" . "), "download");
        assert_eq!(sanitize_file_name(".."), "download");
    }

    #[tokio::test]
    async fn test_save_to_dir_creates_directory() {
        let temp = tempdir().expect("Failed to create temp dir");
        let nested = temp.path().join("exports").join("csv");

        let path = save_to_dir(&nested, "out.csv", b"a,b\n1,2")
            .await
            .expect("save failed");

        assert_eq!(path, nested.join("out.csv"));
        let written = std::fs::read_to_string(path).expect("read back failed");
        assert_eq!(written, "a,b\n1,2");
    }
}
