use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::caching::redis::RedisClient;
use crate::core::errors::AppResult;

/// 사용자별 리프레시 세션
///
/// 토큰 원문은 저장하지 않고 SHA-256 다이제스트만 저장합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSession {
    pub user_id: String,
    pub token_digest: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistedTokenInfo {
    pub jti: String,
    pub user_id: String,
    pub blacklisted_at: i64,
    pub original_exp: i64,
    pub reason: BlacklistReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BlacklistReason {
    Logout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetTicket {
    pub user_id: String,
    pub email: String,
    pub requested_at: i64,
}

pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

impl TokenRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    fn refresh_key(user_id: &str) -> String {
        format!("refresh_token:{}", user_id)
    }

    fn blacklist_key(jti: &str) -> String {
        format!("blacklist_token:{}", jti)
    }

    fn oauth_state_key(state: &str) -> String {
        format!("oauth_state:{}", state)
    }

    fn password_reset_key(digest: &str) -> String {
        format!("password_reset:{}", digest)
    }

    /// 리프레시 세션을 저장합니다. 기존 세션은 덮어써져 무효가 됩니다.
    pub async fn store_refresh_session(
        &self,
        user_id: &str,
        token_digest: &str,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let now = Utc::now().timestamp();
        let session = RefreshSession {
            user_id: user_id.to_string(),
            token_digest: token_digest.to_string(),
            issued_at: now,
            expires_at: now + ttl_seconds as i64,
        };

        self.redis
            .set_with_expiry(&Self::refresh_key(user_id), &session, ttl_seconds.max(1))
            .await?;

        log::debug!("리프레시 세션 저장 - user_id: {}, ttl: {}초", user_id, ttl_seconds);
        Ok(())
    }

    pub async fn get_refresh_session(&self, user_id: &str) -> AppResult<Option<RefreshSession>> {
        Ok(self.redis.get(&Self::refresh_key(user_id)).await?)
    }

    pub async fn delete_refresh_session(&self, user_id: &str) -> AppResult<()> {
        self.redis.del(&Self::refresh_key(user_id)).await?;
        Ok(())
    }

    /// 액세스 토큰을 원래 만료 시각까지 블랙리스트에 올립니다.
    ///
    /// 이미 만료된 토큰은 저장할 필요가 없으므로 건너뜁니다.
    pub async fn blacklist(
        &self,
        jti: &str,
        user_id: &str,
        original_exp: i64,
        reason: BlacklistReason,
    ) -> AppResult<()> {
        let now = Utc::now().timestamp();
        let remaining = original_exp - now;

        if remaining <= 0 {
            return Ok(());
        }

        let info = BlacklistedTokenInfo {
            jti: jti.to_string(),
            user_id: user_id.to_string(),
            blacklisted_at: now,
            original_exp,
            reason,
        };

        self.redis
            .set_with_expiry(&Self::blacklist_key(jti), &info, remaining as u64)
            .await?;

        log::info!("토큰 블랙리스트 추가 - JTI: {}, 사용자: {}, 이유: {:?}, TTL: {}초",
                   jti, user_id, info.reason, remaining);
        Ok(())
    }

    pub async fn is_blacklisted(&self, jti: &str) -> AppResult<bool> {
        Ok(self.redis.exists(&Self::blacklist_key(jti)).await?)
    }

    pub async fn store_oauth_state(&self, state: &str, ttl_seconds: u64) -> AppResult<()> {
        self.redis
            .set_with_expiry(&Self::oauth_state_key(state), &Utc::now().timestamp(), ttl_seconds.max(1))
            .await?;
        Ok(())
    }

    /// state를 소비합니다. 저장된 적 없거나 만료되었거나 이미 쓰였으면 `false`입니다.
    pub async fn consume_oauth_state(&self, state: &str) -> AppResult<bool> {
        let stored: Option<i64> = self.redis.take(&Self::oauth_state_key(state)).await?;
        Ok(stored.is_some())
    }

    pub async fn store_password_reset(
        &self,
        token_digest: &str,
        ticket: &PasswordResetTicket,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        self.redis
            .set_with_expiry(&Self::password_reset_key(token_digest), ticket, ttl_seconds.max(1))
            .await?;
        Ok(())
    }

    /// 재설정 티켓을 소비합니다. 한 번 꺼내면 다시 쓸 수 없습니다.
    pub async fn consume_password_reset(&self, token_digest: &str) -> AppResult<Option<PasswordResetTicket>> {
        Ok(self.redis.take(&Self::password_reset_key(token_digest)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(TokenRepository::refresh_key("u1"), "refresh_token:u1");
        assert_eq!(TokenRepository::blacklist_key("j1"), "blacklist_token:j1");
        assert_eq!(TokenRepository::oauth_state_key("s1"), "oauth_state:s1");
        assert_eq!(TokenRepository::password_reset_key("d1"), "password_reset:d1");
    }

    #[test]
    fn test_blacklist_entry_serializes_reason() {
        let info = BlacklistedTokenInfo {
            jti: "j1".to_string(),
            user_id: "u1".to_string(),
            blacklisted_at: 100,
            original_exp: 200,
            reason: BlacklistReason::Logout,
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["reason"], "Logout");
    }
}
