//! Google OAuth 응답 DTO 모듈

use serde::{Deserialize, Serialize};

/// Google 토큰 엔드포인트의 Authorization Code 교환 응답
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub id_token: Option<String>,
}

/// OAuth 로그인 시작 응답
///
/// 클라이언트는 `login_url`로 이동하고, 콜백의 `state`는 서버가 검증합니다.
#[derive(Debug, Serialize)]
pub struct OAuthLoginUrlResponse {
    pub login_url: String,
    pub state: String,
}
