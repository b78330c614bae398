//! Session store trait
//!
//! Defines the interface for session persistence.

use async_trait::async_trait;

use super::model::Session;
use crate::model::Person;
use crate::{Error, Result};

/// Storage for the current session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the current session, if any
    async fn load(&self) -> Result<Option<Session>>;

    /// Replace the current session
    async fn save(&self, session: &Session) -> Result<()>;

    /// Drop the current session unconditionally
    async fn clear(&self) -> Result<()>;

    /// Get the current session or fail when nobody is logged in
    async fn require(&self) -> Result<Session> {
        self.load().await?.ok_or(Error::NotAuthenticated)
    }

    /// Replace the person record of the current session
    async fn update_person(&self, person: Person) -> Result<Session> {
        let session = self.require().await?.with_person(person);
        self.save(&session).await?;
        Ok(session)
    }
}
