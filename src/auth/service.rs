//! Registration, login and logout.
//!
//! `AuthService` owns every business rule of the session lifecycle:
//! usernames are unique, passwords are stored hashed, a successful login
//! adds a session row, and logout removes all of a user's session rows.
//! A user counts as authenticated exactly while at least one session row
//! exists for them; the user record itself is never touched by login or
//! logout.

use tracing::{debug, info, warn};

use super::identity::{IdentitySlot, Principal};
use super::password::CredentialHasher;
use crate::db::{CredentialStore, NewSession, NewUser, Session, SessionStore};
use crate::{AuthGateError, Result};

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password, hashed before it is stored.
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Authentication core over a credential store, a session store and a
/// password hasher.
#[derive(Debug, Clone)]
pub struct AuthService<U, S, H> {
    users: U,
    sessions: S,
    hasher: H,
}

impl<U, S, H> AuthService<U, S, H>
where
    U: CredentialStore,
    S: SessionStore,
    H: CredentialHasher,
{
    /// Create a new service.
    pub fn new(users: U, sessions: S, hasher: H) -> Self {
        Self {
            users,
            sessions,
            hasher,
        }
    }

    /// Get the credential store.
    pub fn users(&self) -> &U {
        &self.users
    }

    /// Get the session store.
    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Register a new user.
    ///
    /// Returns `Ok(false)` when the username is empty or already taken;
    /// nothing is written in that case. On success the plaintext password
    /// is replaced by its hash and exactly one user record is inserted.
    ///
    /// The existence check is repeated atomically by the store's insert,
    /// so two concurrent registrations of the same name cannot both win.
    pub async fn register(&self, request: RegistrationRequest) -> Result<bool> {
        if request.username.is_empty() {
            debug!("Registration rejected: empty username");
            return Ok(false);
        }

        if self.users.find_by_username(&request.username).await?.is_some() {
            info!(username = %request.username, "Registration rejected: username exists");
            return Ok(false);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let new_user = NewUser::new(&request.username, password_hash);

        match self.users.insert(&new_user).await? {
            Some(user) => {
                info!(
                    username = %user.username,
                    user_id = user.id,
                    "New user registered"
                );
                Ok(true)
            }
            None => {
                info!(
                    username = %request.username,
                    "Registration rejected: username taken concurrently"
                );
                Ok(false)
            }
        }
    }

    /// Verify credentials and open a session.
    ///
    /// Returns the new session on success, `None` when the username is
    /// unknown or the password does not verify. An unknown username
    /// returns before any hash verification runs.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Session>> {
        let Some(user) = self.users.find_by_username(username).await? else {
            warn!(username = %username, "Login failed: user not found");
            return Ok(None);
        };

        if !self.hasher.verify(password, &user.password) {
            warn!(username = %username, "Login failed: wrong password");
            return Ok(None);
        }

        let session = self.sessions.save(&NewSession::now(user.id)).await?;

        info!(
            username = %username,
            user_id = user.id,
            session_id = %session.id,
            "Login successful"
        );

        Ok(Some(session))
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown user and wrong password are both reported as `false`.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool> {
        Ok(self.authenticate(username, password).await?.is_some())
    }

    /// Close every session of `user_id` and drop the caller's identity.
    ///
    /// Safe to call when the user has no sessions.
    pub async fn logout(&self, user_id: i64, identity: &mut impl IdentitySlot) -> Result<()> {
        let removed = self.sessions.delete_by_user_id(user_id).await?;
        identity.invalidate();

        info!(user_id = user_id, removed = removed, "User logged out");
        Ok(())
    }

    /// Load the identity for `username`.
    ///
    /// Unlike `login`, a missing user is a hard failure: callers of this
    /// path have no fallback.
    pub async fn load_principal(&self, username: &str) -> Result<Principal> {
        self.users
            .find_by_username(username)
            .await?
            .map(Principal::from)
            .ok_or_else(|| AuthGateError::UnknownUser(username.to_string()))
    }

    /// Resolve a session ID to the identity of its owner.
    ///
    /// Returns `None` for an unknown session or one whose user no longer
    /// exists.
    pub async fn resolve_session(&self, session_id: &str) -> Result<Option<Principal>> {
        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Ok(None);
        };

        let user = self.users.find_by_id(session.user_id).await?;
        if user.is_none() {
            debug!(
                session_id = %session_id,
                user_id = session.user_id,
                "Session refers to a missing user"
            );
        }

        Ok(user.map(Principal::from))
    }
}
