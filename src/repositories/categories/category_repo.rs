//! # 카테고리 리포지토리
//!
//! `categories` 컬렉션의 데이터 액세스 계층입니다.
//! 같은 소유자 안에서 슬러그는 `(user_id, slug)` 유니크 인덱스로 보장됩니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::categories::category::Category,
    repositories::users::user_repo::is_duplicate_key,
};

const COLLECTION: &str = "categories";

pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Category> {
        self.db.get_database().collection::<Category>(COLLECTION)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Category>> {
        Ok(self.collection().find_one(doc! { "_id": *id }).await?)
    }

    /// 사용자의 카테고리를 `order` 오름차순으로 조회합니다.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Vec<Category>> {
        let cursor = self
            .collection()
            .find(doc! { "username": username.to_lowercase() })
            .sort(doc! { "order": 1, "created_at": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_owner_and_slug(&self, user_id: &ObjectId, slug: &str) -> AppResult<Option<Category>> {
        Ok(self
            .collection()
            .find_one(doc! { "user_id": *user_id, "slug": slug })
            .await?)
    }

    /// 소유자의 가장 큰 `order` 값. 카테고리가 없으면 `None`입니다.
    pub async fn max_order(&self, user_id: &ObjectId) -> AppResult<Option<i32>> {
        let last = self
            .collection()
            .find_one(doc! { "user_id": *user_id })
            .sort(doc! { "order": -1 })
            .await?;

        Ok(last.map(|category| category.order))
    }

    pub async fn create(&self, mut category: Category) -> AppResult<Category> {
        let result = self.collection().insert_one(&category).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError(format!("A category with the slug '{}' already exists", category.slug))
            } else {
                AppError::from(e)
            }
        })?;

        category.id = Some(
            result
                .inserted_id
                .as_object_id()
                .ok_or_else(|| AppError::InternalError("삽입된 카테고리 ID가 ObjectId가 아닙니다".to_string()))?,
        );

        Ok(category)
    }

    /// `$set` 문서를 적용하고 갱신된 카테고리를 돌려줍니다.
    pub async fn update(&self, id: &ObjectId, mut set_doc: Document) -> AppResult<Option<Category>> {
        set_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_doc })
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("A category with this name already exists".to_string())
                } else {
                    AppError::from(e)
                }
            })
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let listing_index = IndexModel::builder()
            .keys(doc! { "username": 1, "order": 1 })
            .options(IndexOptions::builder()
                .name("username_order".to_string())
                .build())
            .build();

        let slug_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_slug_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([listing_index, slug_index])
            .await?;

        Ok(())
    }
}
