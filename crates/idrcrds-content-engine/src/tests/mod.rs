use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The label's content document as shipped with the site.
pub const SAMPLE_CONTENT: &str = include_str!("../../tests/fixtures/site-content.txt");

/// Create a temporary site root
pub fn create_test_site_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file under the site root, creating parent directories as needed
pub fn create_test_file(site_dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = site_dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
