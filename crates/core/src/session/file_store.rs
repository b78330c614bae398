//! File-based session storage
//!
//! Stores the session as JSON in a file on disk, the terminal counterpart of
//! a browser tab's session storage.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use super::model::Session;
use super::store::SessionStore;
use crate::Result;

/// File-based session store using JSON
pub struct FileSessionStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the session
    cache: RwLock<Option<Session>>,
}

impl FileSessionStore {
    /// Create a new FileSessionStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            Some(serde_json::from_str(&content)?)
        } else {
            None
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.cache.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        *self.cache.write().await = Some(session.clone());
        debug!("Saved session for person {}", session.person.id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.cache.write().await = None;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Role};
    use tempfile::TempDir;

    fn jeanne() -> Person {
        Person::new(7, Role::User)
            .with_name("Jeanne", "Dupont")
            .with_mail("jeanne@example.com")
            .with_seats_remaining(3)
    }

    async fn create_test_store() -> (FileSessionStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = FileSessionStore::new(&path).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (store, _temp) = create_test_store().await;
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");
        let session = Session::new(jeanne()).with_token("tok");

        {
            let store = FileSessionStore::new(&path).await.unwrap();
            store.save(&session).await.unwrap();
        }

        {
            let store = FileSessionStore::new(&path).await.unwrap();
            let restored = store.load().await.unwrap();
            assert_eq!(restored, Some(session));
        }
    }

    #[tokio::test]
    async fn test_booking_update_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        {
            let store = FileSessionStore::new(&path).await.unwrap();
            store.save(&Session::new(jeanne())).await.unwrap();
            store.update_person(jeanne().after_booking()).await.unwrap();
        }

        let store = FileSessionStore::new(&path).await.unwrap();
        let session = store.require().await.unwrap();
        assert_eq!(session.person.seats_remaining, 0);
        assert_eq!(session.person.id, 7);
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let (store, _temp) = create_test_store().await;
        store.save(&Session::new(jeanne())).await.unwrap();
        assert!(store.path().exists());

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        assert!(store.load().await.unwrap().is_none());

        // Clearing twice is fine
        store.clear().await.unwrap();
    }
}
