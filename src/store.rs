//! Repository for optimization suggestions attached to videos.
//!
//! Handlers receive an `Arc<dyn SuggestionStore>` instead of touching a
//! process-wide list, so tests and the server each own their store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub video_id: Option<String>,
    pub kind: String,
    pub content: String,
    pub created_at_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSuggestion {
    pub video_id: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub content: String,
}

fn default_kind() -> String {
    "general".to_string()
}

impl NewSuggestion {
    fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::InvalidInput("suggestion content is required".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn create(&self, draft: NewSuggestion) -> Result<Suggestion>;

    /// Newest first.
    async fn list(&self) -> Vec<Suggestion>;

    async fn get(&self, suggestion_id: &str) -> Option<Suggestion>;

    /// Removes everything and returns how many entries were dropped.
    async fn clear(&self) -> Result<usize>;
}

/// Shared bookkeeping for both store flavours.
struct SuggestionLog {
    entries: RwLock<Vec<Suggestion>>,
    counter: AtomicU64,
    max_entries: usize,
}

impl SuggestionLog {
    fn new(entries: Vec<Suggestion>, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(entries),
            counter: AtomicU64::new(0),
            max_entries: max_entries.max(1),
        }
    }

    fn build(&self, draft: NewSuggestion) -> Suggestion {
        let created_at_ms = now_ms();
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let payload = format!(
            "{}:{}:{}:{}:{}",
            draft.video_id.as_deref().unwrap_or(""),
            draft.kind,
            draft.content,
            created_at_ms,
            sequence
        );
        Suggestion {
            id: format!("sug_{:x}", stable_hash64(&payload)),
            video_id: draft.video_id,
            kind: draft.kind,
            content: draft.content.trim().to_string(),
            created_at_ms,
        }
    }
}

pub struct MemorySuggestionStore {
    log: SuggestionLog,
}

impl MemorySuggestionStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            log: SuggestionLog::new(Vec::new(), max_entries),
        }
    }
}

impl Default for MemorySuggestionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl SuggestionStore for MemorySuggestionStore {
    async fn create(&self, draft: NewSuggestion) -> Result<Suggestion> {
        draft.validate()?;
        let suggestion = self.log.build(draft);
        let mut guard = self.log.entries.write().await;
        guard.insert(0, suggestion.clone());
        guard.truncate(self.log.max_entries);
        Ok(suggestion)
    }

    async fn list(&self) -> Vec<Suggestion> {
        self.log.entries.read().await.clone()
    }

    async fn get(&self, suggestion_id: &str) -> Option<Suggestion> {
        let guard = self.log.entries.read().await;
        guard.iter().find(|entry| entry.id == suggestion_id).cloned()
    }

    async fn clear(&self) -> Result<usize> {
        let mut guard = self.log.entries.write().await;
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }
}

/// Suggestions persisted as a JSON array, rewritten through a temp file on
/// every change.
pub struct FileSuggestionStore {
    path: PathBuf,
    log: SuggestionLog,
}

impl FileSuggestionStore {
    pub async fn load(path: PathBuf, max_entries: usize) -> Result<Self> {
        let entries = if path.exists() {
            let data = tokio::fs::read_to_string(&path).await?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            Vec::new()
        };
        info!(path = %path.display(), entries = entries.len(), "loaded suggestion store");

        Ok(Self {
            path,
            log: SuggestionLog::new(entries, max_entries),
        })
    }

    async fn persist(&self, entries: &[Suggestion]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!(path = %self.path.display(), entries = entries.len(), "persisted suggestions");
        Ok(())
    }
}

#[async_trait]
impl SuggestionStore for FileSuggestionStore {
    async fn create(&self, draft: NewSuggestion) -> Result<Suggestion> {
        draft.validate()?;
        let suggestion = self.log.build(draft);
        let mut guard = self.log.entries.write().await;
        let mut staged = Vec::with_capacity(guard.len() + 1);
        staged.push(suggestion.clone());
        staged.extend(guard.iter().cloned());
        staged.truncate(self.log.max_entries);
        // Memory only changes once the file write has succeeded.
        self.persist(&staged).await?;
        *guard = staged;
        Ok(suggestion)
    }

    async fn list(&self) -> Vec<Suggestion> {
        self.log.entries.read().await.clone()
    }

    async fn get(&self, suggestion_id: &str) -> Option<Suggestion> {
        let guard = self.log.entries.read().await;
        guard.iter().find(|entry| entry.id == suggestion_id).cloned()
    }

    async fn clear(&self) -> Result<usize> {
        let mut guard = self.log.entries.write().await;
        self.persist(&[]).await?;
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

fn stable_hash64(value: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}
