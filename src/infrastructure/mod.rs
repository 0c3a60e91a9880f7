mod clients;
mod storage;

pub use clients::rawg::{RawgClient, DEFAULT_BASE_URL};
pub use storage::fs_store::FileSystemStore;
