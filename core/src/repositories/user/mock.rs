//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// `set_unavailable(true)` makes every call fail with `StoreUnavailable`.
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<BTreeMap<String, User>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate the store going away (or coming back)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Overwrite a user's credential-change timestamp directly
    pub async fn set_password_update_time(&self, uid: &str, pwd_update_time: i64) {
        if let Some(user) = self.users.write().await.get_mut(uid) {
            user.pwd_update_time = pwd_update_time;
        }
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock user store offline"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(uid).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.contains_key(&user.uid) {
            return Err(DomainError::validation(format!(
                "Duplicate entry '{}' for key 'users.PRIMARY'",
                user.uid
            )));
        }

        users.insert(user.uid.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if !users.contains_key(&user.uid) {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.uid),
            });
        }

        users.insert(user.uid.clone(), user.clone());
        Ok(user)
    }
}
