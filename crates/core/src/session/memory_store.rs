//! In-memory session storage

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::Session;
use super::store::SessionStore;
use crate::Result;

/// Session store that lives as long as the process
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Role};
    use crate::Error;

    #[tokio::test]
    async fn test_require_without_session() {
        let store = MemorySessionStore::new();
        match store.require().await {
            Err(Error::NotAuthenticated) => {}
            other => panic!("Expected NotAuthenticated, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_person_keeps_token() {
        let store = MemorySessionStore::with_session(
            Session::new(Person::new(7, Role::User).with_seats_remaining(2)).with_token("tok"),
        );

        let updated = store
            .update_person(Person::new(7, Role::User))
            .await
            .unwrap();
        assert_eq!(updated.token.as_deref(), Some("tok"));
        assert_eq!(store.require().await.unwrap().person.seats_remaining, 0);
    }
}
