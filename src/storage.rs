//! Best-score persistence.
//!
//! Loading never fails: a missing or unreadable record counts as a best score
//! of zero. Saving reports failures so the caller can log them.

#[cfg(feature = "persist")]
use std::path::{Path, PathBuf};

#[cfg(feature = "persist")]
use log::{debug, warn};

pub trait ScoreStore {
    /// Stored best score, or 0 when there is none.
    fn load_best_score(&self) -> u32;

    fn save_best_score(&mut self, score: u32) -> Result<(), String>;
}

/// Keeps the best score in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    best_score: u32,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best_score(best_score: u32) -> Self {
        Self { best_score, saves: 0 }
    }

    /// Number of successful `save_best_score` calls.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&self) -> u32 {
        self.best_score
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), String> {
        self.best_score = score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(feature = "persist")]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// Stores the best score as a small JSON document on disk.
#[cfg(feature = "persist")]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(feature = "persist")]
impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32, String> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        let record: BestScoreRecord = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))?;

        Ok(record.best_score)
    }
}

#[cfg(feature = "persist")]
impl ScoreStore for FileStore {
    fn load_best_score(&self) -> u32 {
        if !self.path.exists() {
            debug!("No best score at {}", self.path.display());
            return 0;
        }

        self.read().unwrap_or_else(|e| {
            warn!("{}; best score reset to 0", e);
            0
        })
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        let contents = serde_json::to_string(&BestScoreRecord { best_score: score })
            .map_err(|e| format!("Failed to serialize best score: {}", e))?;

        std::fs::write(&self.path, contents)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

/// Browser `localStorage`, under the `bestScore` key as a decimal string.
#[cfg(feature = "wasm")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(feature = "wasm")]
impl LocalStorageStore {
    pub const KEY: &'static str = "bestScore";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(feature = "wasm")]
impl ScoreStore for LocalStorageStore {
    fn load_best_score(&self) -> u32 {
        Self::storage()
            .and_then(|storage| storage.get_item(Self::KEY).ok()?)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), String> {
        let storage = Self::storage().ok_or("localStorage unavailable")?;

        storage
            .set_item(Self::KEY, &score.to_string())
            .map_err(|e| format!("Failed to store best score: {:?}", e))
    }
}
