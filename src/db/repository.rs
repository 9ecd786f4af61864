//! SQLite-backed credential and session stores.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::repository_traits::{CredentialStore, SessionStore};
use super::session::{NewSession, Session};
use super::user::{NewUser, User};
use super::DbPool;
use crate::{AuthGateError, Result};

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert(&self, new_user: &NewUser) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password) VALUES (?, ?)
             RETURNING id, username, password",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                debug!(username = %new_user.username, "Insert rejected: username taken");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, user: &User) -> Result<User> {
        let result = sqlx::query("UPDATE users SET username = ?, password = ? WHERE id = ?")
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthGateError::NotFound("user".to_string()));
        }

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| AuthGateError::NotFound("user".to_string()))
    }
}

/// Repository for session records.
#[derive(Clone)]
pub struct SessionRepository {
    pool: DbPool,
}

impl SessionRepository {
    /// Create a new SessionRepository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Count all sessions.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn save(&self, new_session: &NewSession) -> Result<Session> {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: new_session.user_id,
            created_at: new_session.created_at,
        };

        sqlx::query("INSERT INTO sessions (id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&session.id)
            .bind(session.user_id)
            .bind(session.created_at)
            .execute(&self.pool)
            .await?;

        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, created_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn delete_by_user_id(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count_by_user_id(&self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> (Database, UserRepository, SessionRepository) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool().clone());
        let sessions = SessionRepository::new(db.pool().clone());
        (db, users, sessions)
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let (_db, users, _) = setup().await;

        let user = users
            .insert(&NewUser::new("alice", "hash1"))
            .await
            .unwrap()
            .unwrap();
        assert!(user.id > 0);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "hash1");

        let by_name = users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name, user);

        let by_id = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id, user);
    }

    #[tokio::test]
    async fn test_find_missing_user() {
        let (_db, users, _) = setup().await;
        assert!(users.find_by_username("nobody").await.unwrap().is_none());
        assert!(users.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_lookup_is_case_sensitive() {
        let (_db, users, _) = setup().await;
        users.insert(&NewUser::new("Alice", "hash")).await.unwrap();

        assert!(users.find_by_username("alice").await.unwrap().is_none());
        assert!(users.find_by_username("Alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_duplicate_is_rejected() {
        let (_db, users, _) = setup().await;

        assert!(users.insert(&NewUser::new("alice", "h1")).await.unwrap().is_some());
        assert!(users.insert(&NewUser::new("alice", "h2")).await.unwrap().is_none());
        assert_eq!(users.count().await.unwrap(), 1);

        let stored = users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password, "h1");
    }

    #[tokio::test]
    async fn test_insert_differing_case_is_distinct() {
        let (_db, users, _) = setup().await;

        assert!(users.insert(&NewUser::new("bob", "h")).await.unwrap().is_some());
        assert!(users.insert(&NewUser::new("BOB", "h")).await.unwrap().is_some());
        assert_eq!(users.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_replaces_password_hash() {
        let (_db, users, _) = setup().await;
        let mut user = users
            .insert(&NewUser::new("alice", "old"))
            .await
            .unwrap()
            .unwrap();

        user.password = "new".to_string();
        let saved = users.save(&user).await.unwrap();
        assert_eq!(saved.id, user.id);
        assert_eq!(saved.password, "new");
    }

    #[tokio::test]
    async fn test_save_unknown_user() {
        let (_db, users, _) = setup().await;
        let ghost = User {
            id: 99,
            username: "ghost".to_string(),
            password: "h".to_string(),
        };

        let result = users.save(&ghost).await;
        assert!(matches!(result, Err(AuthGateError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_and_find_session() {
        let (_db, _, sessions) = setup().await;

        let new_session = NewSession::now(1);
        let session = sessions.save(&new_session).await.unwrap();
        assert!(Uuid::parse_str(&session.id).is_ok());
        assert_eq!(session.user_id, 1);

        let found = sessions.find_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.user_id, 1);
        assert_eq!(found.created_at.timestamp(), new_session.created_at.timestamp());

        assert!(sessions.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sessions_accumulate() {
        let (_db, _, sessions) = setup().await;

        let first = sessions.save(&NewSession::now(1)).await.unwrap();
        let second = sessions.save(&NewSession::now(1)).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(sessions.count_by_user_id(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_user_id_only_affects_that_user() {
        let (_db, _, sessions) = setup().await;

        sessions.save(&NewSession::now(1)).await.unwrap();
        sessions.save(&NewSession::now(1)).await.unwrap();
        sessions.save(&NewSession::now(2)).await.unwrap();

        assert_eq!(sessions.delete_by_user_id(1).await.unwrap(), 2);
        assert_eq!(sessions.count_by_user_id(1).await.unwrap(), 0);
        assert_eq!(sessions.count_by_user_id(2).await.unwrap(), 1);
        assert_eq!(sessions.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_user_id_without_sessions() {
        let (_db, _, sessions) = setup().await;
        assert_eq!(sessions.delete_by_user_id(5).await.unwrap(), 0);
        assert_eq!(sessions.delete_by_user_id(5).await.unwrap(), 0);
    }
}
