//! Session authority implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{token_fingerprint, Claims};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::clock::Clock;
use crate::services::token::TokenCodec;

/// Composes the codec, the revocation store and the credential store
pub struct SessionAuthority<U: UserRepository, R: RevocationStore> {
    users: Arc<U>,
    revocations: Arc<R>,
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl<U: UserRepository, R: RevocationStore> SessionAuthority<U, R> {
    /// Creates a new session authority
    ///
    /// # Arguments
    ///
    /// * `users` - Credential store, read for `pwd_update_time`
    /// * `revocations` - Store of explicitly revoked tokens
    /// * `codec` - Token codec
    /// * `clock` - Time source for expiry and revocation TTLs
    pub fn new(
        users: Arc<U>,
        revocations: Arc<R>,
        codec: Arc<TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            revocations,
            codec,
            clock,
        }
    }

    /// Issues a token for `uid`
    ///
    /// The user is not looked up; a token for an unknown uid simply never validates.
    pub fn issue(&self, uid: &str) -> Result<String, DomainError> {
        let token = self.codec.encode(uid)?;
        info!(uid = %uid, token = token_fingerprint(&token), "issued session token");
        Ok(token)
    }

    /// Runs every validity check and reports which one failed
    ///
    /// Local checks (signature, expiry) run before the two store lookups.
    /// A store failure is reported as [`TokenError::StoreUnavailable`].
    pub async fn check(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(self.clock.now_ms()) {
            return Err(TokenError::Expired);
        }

        let revoked = self.revocations.is_revoked(token).await.map_err(|e| {
            warn!(token = token_fingerprint(token), error = %e, "revocation lookup failed");
            TokenError::StoreUnavailable
        })?;
        if revoked {
            return Err(TokenError::Revoked);
        }

        let pwd_update_time = self
            .users
            .get_password_update_time(&claims.uid)
            .await
            .map_err(|e| {
                warn!(uid = %claims.uid, error = %e, "credential lookup failed");
                TokenError::StoreUnavailable
            })?
            .ok_or(TokenError::UnknownUser)?;

        if claims.is_stale_against(pwd_update_time) {
            return Err(TokenError::Stale);
        }

        Ok(claims)
    }

    /// Returns the claims of a valid token, `None` for any invalid one
    ///
    /// The reason is logged, never returned.
    pub async fn validate(&self, token: &str) -> Option<Claims> {
        match self.check(token).await {
            Ok(claims) => Some(claims),
            Err(TokenError::StoreUnavailable) => {
                warn!(
                    token = token_fingerprint(token),
                    reason = TokenError::StoreUnavailable.as_str(),
                    "rejecting token: validity could not be confirmed"
                );
                None
            }
            Err(reason) => {
                debug!(
                    token = token_fingerprint(token),
                    reason = reason.as_str(),
                    "token rejected"
                );
                None
            }
        }
    }

    /// Whether `token` is valid and bound to `uid`
    ///
    /// Empty `uid` or `token` is always `false`.
    pub async fn validate_for(&self, uid: &str, token: &str) -> bool {
        if uid.is_empty() || token.is_empty() {
            return false;
        }
        match self.validate(token).await {
            Some(claims) if claims.uid == uid => true,
            Some(claims) => {
                debug!(uid = %uid, owner = %claims.uid, "token belongs to another user");
                false
            }
            None => false,
        }
    }

    /// Revokes `token` until it would have expired anyway
    ///
    /// Undecodable and already-expired tokens are ignored. The stored TTL is
    /// the remaining lifetime rounded up to whole seconds.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Token revoked or nothing to revoke
    /// * `Err(DomainError::StoreUnavailable)` - Revocation store unreachable
    pub async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(_) => {
                debug!(token = token_fingerprint(token), "ignoring revocation of malformed token");
                return Ok(());
            }
        };

        let remaining_ms = claims.remaining_ms(self.clock.now_ms());
        if remaining_ms <= 0 {
            debug!(uid = %claims.uid, "ignoring revocation of expired token");
            return Ok(());
        }

        let ttl_seconds = remaining_ms / 1000 + i64::from(remaining_ms % 1000 != 0);
        self.revocations.mark_revoked(token, ttl_seconds).await?;

        info!(
            uid = %claims.uid,
            token = token_fingerprint(token),
            ttl_seconds,
            "revoked session token"
        );
        Ok(())
    }
}
