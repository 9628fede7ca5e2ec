//! JSON persistence helpers for the ~/.ecoquest/ data directory.

use crate::core::constants::DATA_DIR_NAME;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the ~/.ecoquest/ directory path, creating it if needed.
pub fn default_data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("[CONFIG] ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON, replacing the file atomically.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_atomic(path, json.as_bytes())
}

/// Write to a fresh sibling temp file then rename over `path`.
///
/// Readers either see the old contents or the new ones, never a torn write.
/// Every call gets its own temp file, so concurrent writers cannot rename
/// each other's partial output into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Unique scratch directory for tests.
#[cfg(test)]
pub(crate) fn test_dir(label: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "ecoquest-{}-{}-{}",
        label,
        std::process::id(),
        test_id
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create test dir");
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = test_dir("persist-missing");
        let val: Vec<String> = load_json_or_default(&dir.join("nope.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let dir = test_dir("persist-invalid");
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let val: Vec<u32> = load_json_or_default(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = test_dir("persist-roundtrip");
        let path = dir.join("data.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        save_json(&path, &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_or_default(&path);
        assert_eq!(loaded, data);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = test_dir("persist-overwrite");
        let path = dir.join("blob.bin");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_concurrent_writers_never_tear() {
        let dir = test_dir("persist-concurrent");
        let path = dir.join("shared.json");
        let payloads: Vec<Vec<u8>> = (0..8u8).map(|n| vec![b'a' + n; 4096]).collect();

        std::thread::scope(|scope| {
            for payload in &payloads {
                let path = &path;
                scope.spawn(move || {
                    for _ in 0..20 {
                        write_atomic(path, payload).unwrap();
                    }
                });
            }
        });

        let written = fs::read(&path).unwrap();
        assert!(payloads.contains(&written));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }
}
