//! Login and logout

use tracing::{info, warn};

use crate::api::{Credentials, SeatingApi};
use crate::model::{Booking, Role};
use crate::session::{Session, SessionStore};
use crate::{Error, Result};

/// Message shown next to an empty login field
pub const REQUIRED_FIELD: &str = "Ce champ est obligatoire";

/// What a successful login produced
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    /// Booking already made by a person with no seats left, for the recap
    pub existing_booking: Option<Booking>,
}

/// Log in, store the session and pick up an earlier booking if there is one
pub async fn login(
    api: &dyn SeatingApi,
    sessions: &dyn SessionStore,
    credentials: &Credentials,
) -> Result<LoginOutcome> {
    if credentials.id.trim().is_empty() || credentials.pswd.is_empty() {
        return Err(Error::InvalidInput(REQUIRED_FIELD.to_string()));
    }

    let response = api.log_in(credentials).await?;
    if let Some(message) = response.error {
        warn!("Login rejected for {}: {}", credentials.id, message);
        return Err(Error::LoginRejected(message));
    }

    let person = response
        .person()
        .ok_or_else(|| Error::Decode("login response carries no person id".to_string()))?;

    api.set_token(response.token.clone());
    let mut session = Session::new(person);
    if let Some(token) = response.token {
        session = session.with_token(token);
    }
    sessions.save(&session).await?;
    info!(
        "Person {} logged in as {:?}",
        session.person.id, session.person.role
    );

    let existing_booking = if session.person.seats_remaining == 0 {
        match api.bookings_by_person(session.person.id).await {
            Ok(bookings) => bookings.into_iter().next(),
            Err(e) => {
                warn!(
                    "Could not load booking of person {}: {}",
                    session.person.id, e
                );
                None
            }
        }
    } else {
        None
    };

    Ok(LoginOutcome {
        session,
        existing_booking,
    })
}

/// Drop the session unconditionally
pub async fn logout(api: &dyn SeatingApi, sessions: &dyn SessionStore) -> Result<()> {
    api.set_token(None);
    sessions.clear().await?;
    info!("Logged out");
    Ok(())
}

/// Fail unless the session belongs to an admin
pub fn require_admin(session: &Session) -> Result<()> {
    match session.person.role {
        Role::Admin => Ok(()),
        Role::User => Err(Error::Forbidden(format!(
            "person {} is not an admin",
            session.person.id
        ))),
    }
}
