//! User entity and the change set applied by `user.mod`.

use serde::{Deserialize, Serialize};

/// User record as held by the credential store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub uid: String,

    /// Password hash, produced by the client
    pub password_hash: String,

    /// Display name
    pub display_name: String,

    /// Phone number
    pub phone: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Time of the last credential mutation, ms since epoch
    pub pwd_update_time: i64,

    /// Superuser flag
    pub is_superuser: bool,
}

/// Fields supplied by a `user.mod` request
///
/// `None` for `password_hash` or `display_name` means "keep the stored value";
/// `phone`, `email` and `is_superuser` are always overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub uid: String,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_superuser: bool,
}

impl User {
    /// Build a brand new user from a change set
    ///
    /// Returns `None` when the password hash or name is missing.
    pub fn from_changes(changes: UserChanges, now_ms: i64) -> Option<Self> {
        let password_hash = changes.password_hash?;
        let display_name = changes.display_name?;
        Some(Self {
            uid: changes.uid,
            password_hash,
            display_name,
            phone: changes.phone,
            email: changes.email,
            pwd_update_time: now_ms,
            is_superuser: changes.is_superuser,
        })
    }

    /// Apply a change set to an existing user
    ///
    /// Returns `true` if the password hash changed, in which case
    /// `pwd_update_time` moves forward to `now_ms` (never backwards).
    /// Edits to name, phone, email or the superuser flag leave existing
    /// sessions valid, unlike the legacy `user.mod` handler, which reset the
    /// timestamp on every update.
    pub fn apply(&mut self, changes: UserChanges, now_ms: i64) -> bool {
        let credentials_changed = match changes.password_hash {
            Some(hash) if hash != self.password_hash => {
                self.password_hash = hash;
                true
            }
            _ => false,
        };
        if let Some(name) = changes.display_name {
            self.display_name = name;
        }
        self.phone = changes.phone;
        self.email = changes.email;
        self.is_superuser = changes.is_superuser;

        if credentials_changed {
            self.pwd_update_time = self.pwd_update_time.max(now_ms);
        }
        credentials_changed
    }
}

/// Public projection of a user returned by `user.query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub uid: String,
    pub pwh: String,
    pub name: String,
    pub tel: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "super")]
    pub is_superuser: bool,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            pwh: user.password_hash,
            name: user.display_name,
            tel: user.phone,
            email: user.email,
            is_superuser: user.is_superuser,
        }
    }
}
