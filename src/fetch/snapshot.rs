// src/fetch/snapshot.rs

use crate::fetch::FetchError;
use std::path::PathBuf;

/// Loads locally saved page snapshots. A missing file is logged and
/// skipped; the source only fails when no snapshot could be read at all.
pub fn read_snapshots(paths: &[PathBuf]) -> Result<Vec<String>, FetchError> {
    let mut pages = Vec::new();

    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(html) => {
                eprintln!("📄 Loaded snapshot {}", path.display());
                pages.push(html);
            }
            Err(e) => eprintln!("❌ Snapshot {} skipped: {e}", path.display()),
        }
    }

    if pages.is_empty() {
        return Err(FetchError::MissingInput(format!(
            "none of the {} snapshot file(s) could be read",
            paths.len()
        )));
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_skipped_but_all_missing_fails() {
        let dir = std::env::temp_dir();
        let present = dir.join("housing_scrape_snapshot_test.html");
        std::fs::write(&present, "<html><body>ok</body></html>").unwrap();

        let pages = read_snapshots(&[present.clone(), dir.join("housing_scrape_absent.html")]);
        assert_eq!(pages.unwrap().len(), 1);

        let none = read_snapshots(&[dir.join("housing_scrape_absent.html")]);
        assert!(none.is_err());

        std::fs::remove_file(present).unwrap();
    }
}
