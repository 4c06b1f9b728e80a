// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saving prints to disk.

use super::snapshot::Snapshot;
use crate::models::photo::PhotoId;
use anyhow::{Context, Result};
use std::path::Path;

/// Suggested file name for a print.
pub fn default_file_name(id: PhotoId) -> String {
    format!("print-{}.png", id)
}

/// Write the print's PNG payload to `path` unchanged.
pub fn save_print(snapshot: &Snapshot, path: &Path) -> Result<()> {
    std::fs::write(path, snapshot.png())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Frame;
    use crate::models::photo::PhotoIdGenerator;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    #[test]
    fn test_default_file_name() {
        let id = PhotoIdGenerator::new().next(UNIX_EPOCH + Duration::from_millis(1_234));
        assert_eq!(default_file_name(id), "print-1234.png");
    }

    #[test]
    fn test_saved_file_is_the_payload() {
        let frame = Frame {
            width: 4,
            height: 4,
            rgb: vec![200; 48],
        };
        let snapshot = Snapshot::encode(&frame).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join(default_file_name(PhotoIdGenerator::new().next(UNIX_EPOCH)));

        save_print(&snapshot, &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), snapshot.png());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let snapshot = Snapshot::from_png(1, 1, vec![1]);
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("print.png");

        assert!(save_print(&snapshot, &path).is_err());
    }
}
