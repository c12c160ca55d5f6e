//! # JWT 토큰 서비스
//!
//! HS256으로 서명한 액세스/리프레시 토큰을 발급하고 검증합니다.
//!
//! ## 토큰 수명
//!
//! ```text
//! login ──► access (JWT_EXPIRATION_HOURS) + refresh (JWT_REFRESH_EXPIRATION_DAYS)
//!                                             │
//!                      Redis refresh_token:{user_id} = sha256(refresh)
//!
//! refresh ──► 다이제스트 일치 확인 ──► 새 토큰 쌍 발급, 세션 교체 (회전)
//! logout  ──► 세션 삭제 + 액세스 토큰 jti 블랙리스트 (exp까지)
//! ```
//!
//! 서명/검증은 [`JwtCodec`]이 담당하며 외부 상태가 없어 단독으로 테스트할 수 있습니다.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use uuid::Uuid;

use crate::{
    config::JwtSettings,
    core::errors::{AppError, AppResult},
    domain::{
        entities::users::user::User,
        models::{
            auth::authenticated_user::AuthenticatedUser,
            token::token::{TokenClaims, TokenPair, TokenType},
        },
    },
    repositories::{
        tokens::token_repository::{BlacklistReason, TokenRepository},
        users::user_repo::UserRepository,
    },
    utils::token_utils::sha256_hex,
};

/// JWT 서명/검증기
#[derive(Clone)]
pub struct JwtCodec {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtCodec {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        Self { settings, encoding_key, decoding_key }
    }

    pub fn settings(&self) -> &JwtSettings {
        &self.settings
    }

    /// 사용자에 대한 토큰을 발급하고 토큰 문자열과 클레임을 돌려줍니다.
    pub fn issue(&self, user: &User, token_type: TokenType) -> AppResult<(String, TokenClaims)> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => Duration::hours(self.settings.access_ttl_hours),
            TokenType::Refresh => Duration::days(self.settings.refresh_ttl_days),
        };

        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            jti: Uuid::new_v4().to_string(),
            username: user.username.clone(),
            auth_provider: user.auth_provider.clone(),
            roles: user.roles.clone(),
            token_type,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok((token, claims))
    }

    /// 서명, 만료, 용도를 검증하고 클레임을 돌려줍니다.
    pub fn decode(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired".to_string())
                }
                _ => AppError::AuthenticationError("Invalid token".to_string()),
            })?;

        if claims.token_type != expected {
            return Err(AppError::AuthenticationError("Invalid token type".to_string()));
        }

        Ok(claims)
    }
}

/// `Authorization` 헤더 값에서 Bearer 토큰을 꺼냅니다.
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::AuthenticationError("Invalid authorization header".to_string())),
    }
}

pub struct TokenService {
    codec: JwtCodec,
    token_repo: Arc<TokenRepository>,
    user_repo: Arc<UserRepository>,
}

impl TokenService {
    pub fn new(codec: JwtCodec, token_repo: Arc<TokenRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self { codec, token_repo, user_repo }
    }

    /// 토큰 쌍을 발급하고 리프레시 세션을 저장합니다.
    ///
    /// 이전 리프레시 세션은 덮어써져 더 이상 쓸 수 없습니다.
    pub async fn issue_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        let (access_token, access_claims) = self.codec.issue(user, TokenType::Access)?;
        let (refresh_token, _) = self.codec.issue(user, TokenType::Refresh)?;

        self.token_repo
            .store_refresh_session(
                &access_claims.sub,
                &sha256_hex(&refresh_token),
                self.codec.settings().refresh_ttl_seconds() as u64,
            )
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.codec.settings().access_ttl_seconds(),
        })
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다 (회전).
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.codec.decode(refresh_token, TokenType::Refresh)?;

        let session = self
            .token_repo
            .get_refresh_session(&claims.sub)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Refresh session not found".to_string()))?;

        if session.token_digest != sha256_hex(refresh_token) {
            log::warn!("리프레시 토큰 불일치 - user_id: {}", claims.sub);
            return Err(AppError::AuthenticationError("Invalid refresh token".to_string()));
        }

        let user_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthenticationError("Invalid token".to_string()))?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("User no longer exists".to_string()))?;

        if !user.is_active {
            return Err(AppError::AuthorizationError("This account has been disabled".to_string()));
        }

        log::debug!("토큰 회전 - user_id: {}", claims.sub);
        self.issue_token_pair(&user).await
    }

    /// 액세스 토큰을 검증하고 블랙리스트 여부를 확인합니다.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<AuthenticatedUser> {
        let claims = self.codec.decode(access_token, TokenType::Access)?;

        if self.token_repo.is_blacklisted(&claims.jti).await? {
            return Err(AppError::AuthenticationError("Token has been revoked".to_string()));
        }

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            username: claims.username,
            auth_provider: claims.auth_provider,
            roles: claims.roles,
            token_id: claims.jti,
            token_expires_at: claims.exp,
        })
    }

    /// 리프레시 세션을 지우고 현재 액세스 토큰을 블랙리스트에 올립니다.
    pub async fn logout(&self, user: &AuthenticatedUser) -> AppResult<()> {
        self.token_repo.delete_refresh_session(&user.user_id).await?;
        self.token_repo
            .blacklist(&user.token_id, &user.user_id, user.token_expires_at, BlacklistReason::Logout)
            .await?;

        log::info!("로그아웃 완료 - user_id: {}", user.user_id);
        Ok(())
    }

    /// 사용자의 리프레시 세션을 제거합니다 (비밀번호 변경 시).
    pub async fn revoke_sessions(&self, user_id: &str) -> AppResult<()> {
        self.token_repo.delete_refresh_session(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    fn codec() -> JwtCodec {
        JwtCodec::new(JwtSettings {
            secret: "test-secret".to_string(),
            access_ttl_hours: 1,
            refresh_ttl_days: 7,
        })
    }

    fn user() -> User {
        let mut user = User::new_local(
            "alice@example.com".to_string(),
            "alice".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_and_decode_access_token() {
        let codec = codec();
        let user = user();

        let (token, issued) = codec.issue(&user, TokenType::Access).unwrap();
        let decoded = codec.decode(&token, TokenType::Access).unwrap();

        assert_eq!(decoded.sub, user.id_string().unwrap());
        assert_eq!(decoded.jti, issued.jti);
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.auth_provider, AuthProvider::Local);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn test_token_type_is_enforced() {
        let codec = codec();
        let (refresh, _) = codec.issue(&user(), TokenType::Refresh).unwrap();

        assert!(codec.decode(&refresh, TokenType::Access).is_err());
        assert!(codec.decode(&refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let codec = codec();
        let user = user();

        let (_, first) = codec.issue(&user, TokenType::Access).unwrap();
        let (_, second) = codec.issue(&user, TokenType::Access).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = codec().issue(&user(), TokenType::Access).unwrap();
        let other = JwtCodec::new(JwtSettings {
            secret: "another-secret".to_string(),
            access_ttl_hours: 1,
            refresh_ttl_days: 7,
        });

        assert!(matches!(
            other.decode(&token, TokenType::Access),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let expired = JwtCodec::new(JwtSettings {
            secret: "test-secret".to_string(),
            access_ttl_hours: -1,
            refresh_ttl_days: 7,
        });
        let (token, _) = expired.issue(&user(), TokenType::Access).unwrap();

        match expired.decode(&token, TokenType::Access) {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Token has expired"),
            other => panic!("expected expiry error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_user_without_id_cannot_get_token() {
        let mut user = user();
        user.id = None;

        assert!(codec().issue(&user, TokenType::Access).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }
}
