use serde::Serialize;

use crate::config::AuthProvider;
use crate::domain::dto::format_datetime;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::TokenPair;

/// 본인에게 보여주는 사용자 정보
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub auth_provider: AuthProvider,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub roles: Vec<String>,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            last_login_at: user.last_login_at.as_ref().map(format_datetime),
            created_at: format_datetime(&user.created_at),
            updated_at: format_datetime(&user.updated_at),
            email: user.email,
            username: user.username,
            display_name: user.display_name,
            auth_provider: user.auth_provider,
            avatar_url: user.avatar_url,
            bio: user.bio,
            roles: user.roles,
        }
    }
}

/// 누구나 볼 수 있는 공개 프로필 (이메일 제외)
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: String,
}

impl From<User> for PublicProfileResponse {
    fn from(user: User) -> Self {
        Self {
            created_at: format_datetime(&user.created_at),
            username: user.username,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            bio: user.bio,
        }
    }
}

/// 로그인/회원가입/OAuth 콜백 응답 (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl LoginResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameAvailabilityResponse {
    pub username: String,
    pub available: bool,
}
