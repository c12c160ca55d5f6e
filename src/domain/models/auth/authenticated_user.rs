use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult};

/// JWT 액세스 토큰에서 추출된 사용자 정보
///
/// 인증 미들웨어가 요청 extensions에 넣고, 핸들러는 추출자로 꺼내 씁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub auth_provider: AuthProvider,
    pub roles: Vec<String>,

    /// 액세스 토큰의 `jti` (로그아웃 시 블랙리스트 키)
    pub token_id: String,

    /// 액세스 토큰의 `exp` (Unix timestamp)
    pub token_expires_at: i64,
}

impl AuthenticatedUser {
    /// 사용자 ID를 ObjectId로 변환합니다.
    pub fn object_id(&self) -> AppResult<ObjectId> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| AppError::AuthenticationError("Invalid user id in token".to_string()))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication required".to_string(),
            )
            .into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
///
/// `AuthMiddleware::optional()` 아래에서 익명 요청이면 `None`입니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
