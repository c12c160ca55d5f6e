//! JWT 클레임과 토큰 쌍
//!
//! RFC 7519 표준 클레임에 사용자명, 프로바이더, 역할, 토큰 용도를 더해 담습니다.
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 사용자 ID
/// - `jti`: 토큰 고유 ID (블랙리스트 키)
/// - `token_type`: 액세스/리프레시 구분, 다른 용도의 토큰은 거부됩니다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub jti: String,
    pub username: String,
    pub auth_provider: AuthProvider,
    pub roles: Vec<String>,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

/// 클라이언트에게 전달되는 토큰 집합
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
