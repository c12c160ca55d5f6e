//! # 상품 서비스
//!
//! 카테고리에 담긴 상품을 관리합니다. 상품은 항상 소유자의 카테고리 안에 있어야 하며,
//! 다른 카테고리로 옮길 때도 대상 카테고리의 소유권을 확인합니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Bson, DateTime, Document};

use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::products::{CreateProductRequest, UpdateProductRequest},
        entities::{categories::category::Category, products::product::Product},
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{
        categories::category_repo::CategoryRepository, products::product_repo::ProductRepository,
        users::user_repo::UserRepository,
    },
    services::categories::category_service::{ensure_owner, next_order},
    utils::string_utils::{clean_optional_string, parse_object_id, validate_required_string},
};

pub struct ProductService {
    product_repo: Arc<ProductRepository>,
    category_repo: Arc<CategoryRepository>,
    user_repo: Arc<UserRepository>,
}

impl ProductService {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        category_repo: Arc<CategoryRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self { product_repo, category_repo, user_repo }
    }

    async fn owned_category(&self, owner_id: &ObjectId, category_id: &str) -> AppResult<Category> {
        let id = parse_object_id(category_id, "Category")?;

        let category = self
            .category_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        ensure_owner(&category, owner_id)?;
        Ok(category)
    }

    async fn owned_product(&self, owner_id: &ObjectId, product_id: &str) -> AppResult<Product> {
        let id = parse_object_id(product_id, "Product")?;

        let product = self
            .product_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if !product.is_owned_by(owner_id) {
            return Err(AppError::AuthorizationError(
                "You do not have permission to modify this product".to_string(),
            ));
        }

        Ok(product)
    }

    /// 사용자의 모든 상품 (최신순)
    pub async fn list_user_products(&self, username: &str) -> AppResult<Vec<Product>> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.product_repo.find_by_username(&user.username).await
    }

    pub async fn create_product(&self, owner: &AuthenticatedUser, request: CreateProductRequest) -> AppResult<Product> {
        let owner_id = owner.object_id()?;
        let category = self.owned_category(&owner_id, &request.category_id).await?;
        let category_id = category
            .id
            .ok_or_else(|| AppError::InternalError("카테고리 ID가 없습니다".to_string()))?;

        let order = match request.order {
            Some(order) => order,
            None => next_order(self.product_repo.max_order(&category_id).await?),
        };

        let now = DateTime::now();
        let product = Product {
            id: None,
            user_id: owner_id,
            username: owner.username.clone(),
            category_id,
            name: validate_required_string(&request.name, "Product name")?,
            brand: validate_required_string(&request.brand, "Brand")?,
            image_url: validate_required_string(&request.image_url, "Image URL")?,
            affiliate_link: clean_optional_string(request.affiliate_link),
            description: clean_optional_string(request.description),
            order,
            created_at: now,
            updated_at: now,
        };

        let created = self.product_repo.create(product).await?;
        log::info!("상품 생성 - {}/{}: {}", owner.username, category.slug, created.name);

        Ok(created)
    }

    pub async fn update_product(
        &self,
        owner: &AuthenticatedUser,
        product_id: &str,
        request: UpdateProductRequest,
    ) -> AppResult<Product> {
        let owner_id = owner.object_id()?;
        let product = self.owned_product(&owner_id, product_id).await?;
        let id = product
            .id
            .ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;

        let mut set_doc = Document::new();

        if let Some(category_id) = request.category_id.as_deref() {
            let target = self.owned_category(&owner_id, category_id).await?;
            if let Some(target_id) = target.id.filter(|target_id| *target_id != product.category_id) {
                set_doc.insert("category_id", target_id);
            }
        }

        apply_product_patch(&mut set_doc, request)?;

        if set_doc.is_empty() {
            return Ok(product);
        }

        self.product_repo
            .update(&id, set_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn delete_product(&self, owner: &AuthenticatedUser, product_id: &str) -> AppResult<()> {
        let owner_id = owner.object_id()?;
        let product = self.owned_product(&owner_id, product_id).await?;
        let id = product
            .id
            .ok_or_else(|| AppError::InternalError("상품 ID가 없습니다".to_string()))?;

        if !self.product_repo.delete(&id).await? {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        log::info!("상품 삭제 - {}: {}", owner.username, product.name);
        Ok(())
    }
}

/// 카테고리 이동을 제외한 수정 필드를 `$set` 문서에 담습니다.
///
/// 필수 필드의 빈 값은 거절하고, 선택 필드의 빈 값은 지웁니다.
fn apply_product_patch(set_doc: &mut Document, request: UpdateProductRequest) -> AppResult<()> {
    if let Some(name) = request.name {
        set_doc.insert("name", validate_required_string(&name, "Product name")?);
    }
    if let Some(brand) = request.brand {
        set_doc.insert("brand", validate_required_string(&brand, "Brand")?);
    }
    if let Some(image_url) = request.image_url {
        set_doc.insert("image_url", validate_required_string(&image_url, "Image URL")?);
    }
    if request.affiliate_link.is_some() {
        set_doc.insert(
            "affiliate_link",
            clean_optional_string(request.affiliate_link).map_or(Bson::Null, Bson::String),
        );
    }
    if request.description.is_some() {
        set_doc.insert(
            "description",
            clean_optional_string(request.description).map_or(Bson::Null, Bson::String),
        );
    }
    if let Some(order) = request.order {
        set_doc.insert("order", order);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_patch_contains_only_sent_fields() {
        let mut set_doc = Document::new();
        apply_product_patch(
            &mut set_doc,
            UpdateProductRequest {
                name: Some(" Keychron Q1 ".to_string()),
                order: Some(3),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(set_doc, doc! { "name": "Keychron Q1", "order": 3 });
    }

    #[test]
    fn test_patch_clears_blank_optional_fields() {
        let mut set_doc = Document::new();
        apply_product_patch(
            &mut set_doc,
            UpdateProductRequest {
                description: Some("".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(set_doc.get("description"), Some(&Bson::Null));
    }

    #[test]
    fn test_patch_rejects_blank_required_field() {
        let mut set_doc = Document::new();
        let result = apply_product_patch(
            &mut set_doc,
            UpdateProductRequest {
                brand: Some("   ".to_string()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
