//! # Product HTTP Handlers
//!
//! 로그인한 사용자의 상품 생성/수정/삭제 (`/me/products`).

use actix_web::{delete, patch, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::services::products::ProductService;

#[post("/products")]
pub async fn create_product(
    user: AuthenticatedUser,
    payload: web::Json<CreateProductRequest>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = product_service.create_product(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// 보낸 필드만 갱신합니다. `category_id`를 보내면 해당 카테고리로 옮깁니다.
#[patch("/products/{id}")]
pub async fn update_product(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = product_service
        .update_product(&user, &path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[delete("/products/{id}")]
pub async fn delete_product(
    user: AuthenticatedUser,
    path: web::Path<String>,
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    product_service.delete_product(&user, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
