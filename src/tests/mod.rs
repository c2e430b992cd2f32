
use std::path::PathBuf;

/// A throwaway data directory under the system temp dir, unique per test.
pub fn temp_data_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("housing_scrape_{label}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp data dir");
    dir
}
