//! # Category HTTP Handlers
//!
//! 로그인한 사용자의 카테고리 생성/수정/삭제 (`/me/categories`).
//! 공개 조회는 [`stash`](crate::handlers::stash) 핸들러가 담당합니다.

use actix_web::{delete, patch, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::categories::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::categories::CategoryService;

#[post("/categories")]
pub async fn create_category(
    user: AuthenticatedUser,
    payload: web::Json<CreateCategoryRequest>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = category_service.create_category(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

#[patch("/categories/{id}")]
pub async fn update_category(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = category_service
        .update_category(&user, &path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// 카테고리와 그 안의 상품을 함께 삭제합니다.
#[delete("/categories/{id}")]
pub async fn delete_category(
    user: AuthenticatedUser,
    path: web::Path<String>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    category_service.delete_category(&user, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
