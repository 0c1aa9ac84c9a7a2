use std::path::Path;

use anyhow::Result;

use crate::db::Database;
use crate::models::StoredState;

/// Key the serialized state lives under.
pub const STORAGE_KEY: &str = "dinner-decider:v1";

/// Durable home for the meal list and settings.
///
/// Implementors only move raw JSON; parsing and sanitizing live in the
/// provided `load`/`save`.
pub trait MealStore {
    fn read_raw(&self) -> Result<Option<String>>;
    fn write_raw(&mut self, payload: &str) -> Result<()>;

    /// Load stored state. Unreadable or malformed data counts as absent.
    fn load(&self) -> Option<StoredState> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("failed to read stored meals: {e:#}");
                return None;
            }
        };
        let state = StoredState::parse(&raw);
        if state.is_none() {
            tracing::warn!("stored meals are malformed, ignoring them");
        }
        state
    }

    fn save(&mut self, state: &StoredState) -> Result<()> {
        let payload = state.to_json()?;
        self.write_raw(&payload)
    }
}

pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl MealStore for SqliteStore {
    fn read_raw(&self) -> Result<Option<String>> {
        self.db.get_value(STORAGE_KEY)
    }

    fn write_raw(&mut self, payload: &str) -> Result<()> {
        self.db.set_value(STORAGE_KEY, payload)
    }
}

/// In-process store. `fail_writes` simulates a full or blocked backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub payload: Option<String>,
    pub fail_writes: bool,
    pub writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }
}

impl MealStore for MemoryStore {
    fn read_raw(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write_raw(&mut self, payload: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("storage unavailable");
        }
        self.payload = Some(payload.to_string());
        self.writes += 1;
        Ok(())
    }
}
