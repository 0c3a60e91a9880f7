use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::CachedReleases;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    fn get_path_for_key(&self, key: &str, subdir: Option<&str>, use_data_dir: bool) -> PathBuf {
        let base_dir = if use_data_dir {
            &self.data_dir
        } else {
            &self.cache_dir
        };

        if let Some(dir) = subdir {
            base_dir.join(dir).join(format!("{}.json", key))
        } else {
            base_dir.join(format!("{}.json", key))
        }
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Replaces the whole file; the previous content is never merged.
    fn write_json_file<T: serde::Serialize + ?Sized>(
        &self,
        key: &str,
        subdir: Option<&str>,
        data: &T,
        use_data_dir: bool,
    ) -> Result<()> {
        let path = self.get_path_for_key(key, subdir, use_data_dir);
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }

        let content = serde_json::to_string_pretty(data)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn read_json_file<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        subdir: Option<&str>,
        use_data_dir: bool,
    ) -> Result<Option<T>> {
        let path = self.get_path_for_key(key, subdir, use_data_dir);
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        } else {
            Ok(None)
        }
    }
}

impl Storage for FileSystemStore {
    fn load_tracked_games(&self) -> Result<Option<Vec<u64>>> {
        self.read_json_file(StorageKeys::TRACKED_GAMES, None, true)
    }

    fn save_tracked_games(&self, ids: &[u64]) -> Result<()> {
        self.write_json_file(StorageKeys::TRACKED_GAMES, None, ids, true)
    }

    fn load_release_cache(&self) -> Result<Option<CachedReleases>> {
        self.read_json_file(
            StorageKeys::UPCOMING_RELEASES,
            Some(StorageKeys::RELEASES_DIR),
            false,
        )
    }

    fn save_release_cache(&self, cache: &CachedReleases) -> Result<()> {
        self.write_json_file(
            StorageKeys::UPCOMING_RELEASES,
            Some(StorageKeys::RELEASES_DIR),
            cache,
            false,
        )
    }
}
