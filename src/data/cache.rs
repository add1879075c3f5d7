//! Dataset Cache
//! Memoizes loads keyed on the input path. An entry stays valid while the
//! file's modification time and length are unchanged.

use super::loader::{DataLoader, Dataset, LoadError};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// What the cache remembers about a file to decide if it went stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileFingerprint {
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let metadata = fs::metadata(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Ok(Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

struct CacheEntry {
    fingerprint: FileFingerprint,
    dataset: Arc<Dataset>,
}

/// Path-keyed cache of loaded datasets.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it when absent or stale.
    pub fn load(&mut self, loader: &DataLoader, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let fingerprint = match FileFingerprint::of(path) {
            Ok(fp) => fp,
            Err(e) => {
                self.entries.remove(path);
                return Err(e);
            }
        };

        if let Some(entry) = self.entries.get(path) {
            if entry.fingerprint == fingerprint {
                debug!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
            info!(path = %path.display(), "sales file changed, reloading");
        }

        let dataset = Arc::new(loader.load(path)?);
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                fingerprint,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &[u8] = b"COUNTRY,PRODUCTLINE,SALES\nUSA,Ships,100\nFrance,Planes,50\n";

    fn write_csv(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_hit_returns_same_dataset() {
        let file = write_csv(CSV);
        let loader = DataLoader::default();
        let mut cache = DatasetCache::new();

        let first = cache.load(&loader, file.path()).unwrap();
        let second = cache.load(&loader, file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_file_is_reloaded() {
        let file = write_csv(CSV);
        let loader = DataLoader::default();
        let mut cache = DatasetCache::new();

        let first = cache.load(&loader, file.path()).unwrap();
        assert_eq!(first.row_count(), 2);

        fs::write(
            file.path(),
            b"COUNTRY,PRODUCTLINE,SALES\nUSA,Ships,100\nFrance,Planes,50\nSpain,Ships,7\n",
        )
        .unwrap();

        let second = cache.load(&loader, file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.row_count(), 3);
    }

    #[test]
    fn test_missing_file_evicts_entry() {
        let file = write_csv(CSV);
        let path = file.path().to_path_buf();
        let loader = DataLoader::default();
        let mut cache = DatasetCache::new();

        cache.load(&loader, &path).unwrap();
        drop(file);

        let result = cache.load(&loader, &path);
        assert!(matches!(result, Err(LoadError::NotFound(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let file = write_csv(CSV);
        let loader = DataLoader::default();
        let mut cache = DatasetCache::new();

        let first = cache.load(&loader, file.path()).unwrap();
        cache.invalidate(file.path());
        let second = cache.load(&loader, file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(first.table.equals_missing(&second.table));
    }
}
