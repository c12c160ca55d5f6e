//! # 카테고리 서비스
//!
//! 사용자의 스태시를 구성하는 카테고리를 관리합니다.
//!
//! - 조회는 공개입니다 (`/stash/{username}/...`).
//! - 생성/수정/삭제는 소유자만 가능하며, 삭제 시 카테고리의 상품도 함께 지워집니다.
//! - 슬러그는 이름에서 파생되며 같은 소유자 안에서 유일합니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Document};

use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::categories::{CreateCategoryRequest, UpdateCategoryRequest},
        entities::{categories::category::Category, products::product::Product, users::user::User},
        models::auth::authenticated_user::AuthenticatedUser,
    },
    repositories::{
        categories::category_repo::CategoryRepository, products::product_repo::ProductRepository,
        users::user_repo::UserRepository,
    },
    utils::string_utils::{parse_object_id, slugify, validate_required_string},
};

pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    product_repo: Arc<ProductRepository>,
    user_repo: Arc<UserRepository>,
}

impl CategoryService {
    pub fn new(
        category_repo: Arc<CategoryRepository>,
        product_repo: Arc<ProductRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self { category_repo, product_repo, user_repo }
    }

    async fn find_user(&self, username: &str) -> AppResult<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 소유자 확인 후 카테고리를 돌려줍니다.
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

    pub async fn list_categories(&self, username: &str) -> AppResult<Vec<Category>> {
        let user = self.find_user(username).await?;
        self.category_repo.find_by_username(&user.username).await
    }

    /// 공개 프로필과 카테고리 목록
    pub async fn get_stash(&self, username: &str) -> AppResult<(User, Vec<Category>)> {
        let user = self.find_user(username).await?;
        let categories = self.category_repo.find_by_username(&user.username).await?;

        Ok((user, categories))
    }

    pub async fn list_category_products(&self, username: &str, category_id: &str) -> AppResult<Vec<Product>> {
        let user = self.find_user(username).await?;
        let id = parse_object_id(category_id, "Category")?;

        let category = self
            .category_repo
            .find_by_id(&id)
            .await?
            .filter(|category| category.username == user.username)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        self.product_repo.find_by_category(&user.username, &id).await.map(|products| {
            log::debug!("카테고리 상품 조회 - {}/{}: {}개", user.username, category.slug, products.len());
            products
        })
    }

    pub async fn create_category(&self, owner: &AuthenticatedUser, request: CreateCategoryRequest) -> AppResult<Category> {
        let owner_id = owner.object_id()?;
        let name = validate_required_string(&request.name, "Category name")?;
        let slug = category_slug(&name)?;

        if self.category_repo.find_by_owner_and_slug(&owner_id, &slug).await?.is_some() {
            return Err(AppError::ConflictError(format!(
                "A category with the slug '{}' already exists",
                slug
            )));
        }

        let order = match request.order {
            Some(order) => order,
            None => next_order(self.category_repo.max_order(&owner_id).await?),
        };

        let category = Category::new(owner_id, owner.username.clone(), name, slug, order);
        let created = self.category_repo.create(category).await?;

        log::info!("카테고리 생성 - {}: {}", owner.username, created.slug);
        Ok(created)
    }

    pub async fn update_category(
        &self,
        owner: &AuthenticatedUser,
        category_id: &str,
        request: UpdateCategoryRequest,
    ) -> AppResult<Category> {
        let owner_id = owner.object_id()?;
        let category = self.owned_category(&owner_id, category_id).await?;
        let id = category
            .id
            .ok_or_else(|| AppError::InternalError("카테고리 ID가 없습니다".to_string()))?;

        let mut set_doc = Document::new();

        if let Some(name) = request.name {
            let name = validate_required_string(&name, "Category name")?;
            let slug = category_slug(&name)?;

            if slug != category.slug
                && self.category_repo.find_by_owner_and_slug(&owner_id, &slug).await?.is_some()
            {
                return Err(AppError::ConflictError(format!(
                    "A category with the slug '{}' already exists",
                    slug
                )));
            }

            set_doc.insert("name", name);
            set_doc.insert("slug", slug);
        }

        if let Some(order) = request.order {
            set_doc.insert("order", order);
        }

        if set_doc.is_empty() {
            return Ok(category);
        }

        self.category_repo
            .update(&id, set_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// 카테고리와 그 안의 상품을 삭제합니다.
    pub async fn delete_category(&self, owner: &AuthenticatedUser, category_id: &str) -> AppResult<()> {
        let owner_id = owner.object_id()?;
        let category = self.owned_category(&owner_id, category_id).await?;
        let id = category
            .id
            .ok_or_else(|| AppError::InternalError("카테고리 ID가 없습니다".to_string()))?;

        let removed_products = self.product_repo.delete_by_category(&id).await?;

        if !self.category_repo.delete(&id).await? {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        log::info!(
            "카테고리 삭제 - {}: {} (상품 {}개)",
            owner.username,
            category.slug,
            removed_products
        );
        Ok(())
    }
}

/// 현재 최대값 다음 순서. 비어 있으면 0부터 시작합니다.
pub(crate) fn next_order(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}

pub(crate) fn ensure_owner(category: &Category, owner_id: &ObjectId) -> AppResult<()> {
    if !category.is_owned_by(owner_id) {
        return Err(AppError::AuthorizationError(
            "You do not have permission to modify this category".to_string(),
        ));
    }
    Ok(())
}

fn category_slug(name: &str) -> AppResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::ValidationError(
            "Category name must contain letters or numbers".to_string(),
        ));
    }
    Ok(slug)
}
