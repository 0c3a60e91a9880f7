use super::CachedReleases;
use crate::error::Result;

pub trait Storage: Send + Sync {
    fn load_tracked_games(&self) -> Result<Option<Vec<u64>>>;
    fn save_tracked_games(&self, ids: &[u64]) -> Result<()>;
    fn load_release_cache(&self) -> Result<Option<CachedReleases>>;
    fn save_release_cache(&self, cache: &CachedReleases) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    // Base directories
    pub const RELEASES_DIR: &'static str = "releases";

    pub const TRACKED_GAMES: &'static str = "tracked_games";
    pub const UPCOMING_RELEASES: &'static str = "upcoming";
}
