//! User repository trait defining the interface for the credential store.
//!
//! The session authority only reads `pwd_update_time` through this trait; the
//! account service owns writes. Implementations map driver failures and
//! timeouts to [`DomainError::StoreUnavailable`].

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by uid
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with given uid
    /// * `Err(DomainError)` - Store unreachable or query failed
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, DomainError>;

    /// List every user, ordered by uid
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError)` - Duplicate uid or store failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Time of the user's last credential change in ms, `None` if the user is unknown
    ///
    /// ```no_run
    /// # use ne_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.get_password_update_time("alice").await? {
    ///     Some(ms) => println!("credentials last changed at {}", ms),
    ///     None => println!("no such user"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn get_password_update_time(&self, uid: &str) -> Result<Option<i64>, DomainError> {
        Ok(self.find_by_uid(uid).await?.map(|user| user.pwd_update_time))
    }

    /// Check whether a user exists
    async fn user_exists(&self, uid: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_uid(uid).await?.is_some())
    }
}
