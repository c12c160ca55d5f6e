//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, JWT 토큰, 비밀번호 재설정 등 인증 관련 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # Google OAuth (미설정 시 Google 로그인 비활성화)
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/api/v1/auth/google/callback"
//!
//! # JWT
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//!
//! # OAuth state 유효 시간
//! export OAUTH_SESSION_TIMEOUT_MINUTES="10"
//!
//! # 비밀번호 재설정
//! export PASSWORD_RESET_TTL_MINUTES="30"
//! export PASSWORD_RESET_URL="http://localhost:5173/auth/reset-password"
//! ```

use std::env;

/// Google OAuth 클라이언트 설정 값
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// 필수 값(`GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URI`)이
    /// 모두 있을 때만 설정을 반환합니다.
    pub fn load() -> Option<GoogleOAuthSettings> {
        let client_id = env::var("GOOGLE_CLIENT_ID").ok()?;
        let client_secret = env::var("GOOGLE_CLIENT_SECRET").ok()?;
        let redirect_uri = env::var("GOOGLE_REDIRECT_URI").ok()?;

        Some(GoogleOAuthSettings {
            client_id,
            client_secret,
            redirect_uri,
            auth_uri: Self::auth_uri(),
            token_uri: Self::token_uri(),
            userinfo_uri: Self::userinfo_uri(),
        })
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// JWT 서명 및 만료 설정 값
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_ttl_hours: i64,
    pub refresh_ttl_days: i64,
}

impl JwtSettings {
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_hours * 3600
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_days * 86_400
    }
}

pub struct JwtConfig;

impl JwtConfig {
    pub fn load() -> JwtSettings {
        JwtSettings {
            secret: Self::secret(),
            access_ttl_hours: Self::expiration_hours(),
            refresh_ttl_days: Self::refresh_expiration_days(),
        }
    }

    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth state 값의 유효 시간 (분)
    pub fn session_timeout_minutes() -> i64 {
        env::var("OAUTH_SESSION_TIMEOUT_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

pub struct PasswordResetConfig;

impl PasswordResetConfig {
    pub fn ttl_minutes() -> i64 {
        env::var("PASSWORD_RESET_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30)
    }

    /// 프론트엔드의 비밀번호 재설정 페이지 주소
    pub fn reset_url() -> String {
        env::var("PASSWORD_RESET_URL")
            .unwrap_or_else(|_| "http://localhost:5173/auth/reset-password".to_string())
    }
}

/// 계정의 인증 프로바이더
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AuthProvider {
    /// 이메일/비밀번호
    Local,

    /// Google OAuth 2.0
    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert!(AuthProvider::from_str("github").is_err());
    }

    #[test]
    fn test_auth_provider_as_string() {
        assert_eq!(AuthProvider::Local.as_str(), "local");
        assert_eq!(AuthProvider::Google.as_str(), "google");
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, AuthProvider::Google);
    }

    #[test]
    fn test_jwt_settings_ttl_in_seconds() {
        let settings = JwtSettings {
            secret: "s".to_string(),
            access_ttl_hours: 2,
            refresh_ttl_days: 7,
        };

        assert_eq!(settings.access_ttl_seconds(), 7200);
        assert_eq!(settings.refresh_ttl_seconds(), 604_800);
    }
}
