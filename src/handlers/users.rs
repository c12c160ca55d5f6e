//! # User Profile HTTP Handlers
//!
//! 로그인한 사용자가 자신의 프로필을 수정합니다. `/me` 스코프의
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware) 아래에서만 등록됩니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `PATCH` | `/me/profile` | 표시 이름, 아바타, 소개 수정 | 200 OK |

use actix_web::{patch, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::request::UpdateProfileRequest;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::users::UserService;

/// 보낸 필드만 갱신합니다. 빈 요청은 현재 프로필을 그대로 돌려줍니다.
#[patch("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = user_service
        .update_profile(&user.object_id()?, payload.into_inner())
        .await?;

    log::debug!("프로필 수정 - {}", updated.username);
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
