//! # Public Stash HTTP Handlers
//!
//! 인증 없이 누구나 볼 수 있는 사용자의 스태시입니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/stash/{username}` | 공개 프로필 + 카테고리 |
//! | `GET` | `/stash/{username}/categories` | 카테고리 목록 (order 오름차순) |
//! | `GET` | `/stash/{username}/products` | 전체 상품 (최신순) |
//! | `GET` | `/stash/{username}/categories/{category_id}/products` | 카테고리의 상품 |
//!
//! 사용자명은 대소문자를 구분하지 않습니다. 스코프는 선택적 인증으로 감싸져 있어
//! 토큰을 보낸 주인에게는 `is_owner`가 참으로 내려갑니다.

use actix_web::{get, web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::categories::{CategoryResponse, StashResponse};
use crate::domain::dto::products::ProductResponse;
use crate::domain::models::auth::authenticated_user::OptionalUser;
use crate::services::categories::CategoryService;
use crate::services::products::ProductService;

#[get("/{username}")]
pub async fn get_stash(
    path: web::Path<String>,
    viewer: OptionalUser,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let (user, categories) = category_service.get_stash(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(StashResponse::new(user, categories, viewer.0.as_ref())))
}

#[get("/{username}/categories")]
pub async fn list_categories(
    path: web::Path<String>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let categories = category_service.list_categories(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(
        categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[get("/{username}/products")]
pub async fn list_user_products(
    path: web::Path<String>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let products = product_service.list_user_products(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(
        products
            .into_iter()
            .map(ProductResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[get("/{username}/categories/{category_id}/products")]
pub async fn list_category_products(
    path: web::Path<(String, String)>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let (username, category_id) = path.into_inner();
    let products = category_service
        .list_category_products(&username, &category_id)
        .await?;

    Ok(HttpResponse::Ok().json(
        products
            .into_iter()
            .map(ProductResponse::from)
            .collect::<Vec<_>>(),
    ))
}
