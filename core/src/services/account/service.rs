//! Account service implementation

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::emoji::{EmojiEntry, EmojiRecord};
use crate::domain::entities::user::{User, UserChanges, UserView};
use crate::errors::DomainError;
use crate::repositories::{EmojiRepository, UserRepository};
use crate::services::clock::Clock;

/// Message returned when `user.mod` tries to create an incomplete user
pub const MISSING_NEW_USER_FIELDS: &str = "pwh and name required for new user";

/// Service for user records and the emoji inventory
pub struct AccountService<U: UserRepository, E: EmojiRepository> {
    users: Arc<U>,
    emojis: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U: UserRepository, E: EmojiRepository> AccountService<U, E> {
    pub fn new(users: Arc<U>, emojis: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            emojis,
            clock,
        }
    }

    /// Creates or updates a user
    ///
    /// Existing users keep their password hash and name unless new ones are
    /// given; phone, email and the superuser flag are always overwritten.
    /// Changing the password hash moves `pwd_update_time` forward, which
    /// invalidates every token issued up to that instant.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - User stored
    /// * `Err(DomainError::Validation)` - New user without `pwh` or `name`
    pub async fn modify_user(&self, changes: UserChanges) -> Result<bool, DomainError> {
        let now = self.clock.now_ms();

        match self.users.find_by_uid(&changes.uid).await? {
            Some(mut user) => {
                let credentials_changed = user.apply(changes, now);
                let user = self.users.update(user).await?;
                if credentials_changed {
                    info!(uid = %user.uid, pwd_update_time = user.pwd_update_time, "credentials changed");
                } else {
                    debug!(uid = %user.uid, "user updated");
                }
            }
            None => {
                let user = User::from_changes(changes, now)
                    .ok_or_else(|| DomainError::validation(MISSING_NEW_USER_FIELDS))?;
                let user = self.users.create(user).await?;
                info!(uid = %user.uid, "user created");
            }
        }

        Ok(true)
    }

    /// Looks up one user
    pub async fn query_user(&self, uid: &str) -> Result<Option<UserView>, DomainError> {
        Ok(self.users.find_by_uid(uid).await?.map(UserView::from))
    }

    /// Lists every user
    pub async fn list_users(&self) -> Result<Vec<UserView>, DomainError> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// Records an emoji for an existing user
    ///
    /// Unknown users are skipped silently; the result is `true` either way.
    pub async fn insert_emoji(&self, uid: &str, emoji: i32) -> Result<bool, DomainError> {
        if !self.users.user_exists(uid).await? {
            debug!(uid = %uid, emoji, "skipping emoji for unknown user");
            return Ok(true);
        }

        let record = EmojiRecord {
            uid: uid.to_string(),
            emoji,
            time: self.clock.now_ms().div_euclid(1000),
        };
        self.emojis.insert(record).await?;
        Ok(true)
    }

    /// Emoji history, oldest first
    ///
    /// With a uid, entries carry only `emoji` and `time`; the full listing
    /// also names the owner.
    pub async fn query_emojis(&self, uid: Option<&str>) -> Result<Vec<EmojiEntry>, DomainError> {
        let entries = match uid {
            Some(uid) => self
                .emojis
                .list_by_uid(uid)
                .await?
                .into_iter()
                .map(EmojiEntry::for_user)
                .collect(),
            None => self
                .emojis
                .list_all()
                .await?
                .into_iter()
                .map(EmojiEntry::with_owner)
                .collect(),
        };
        Ok(entries)
    }
}
