//! # 상품 리포지토리
//!
//! `products` 컬렉션의 데이터 액세스 계층입니다.

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
    domain::entities::products::product::Product,
};

const COLLECTION: &str = "products";

pub struct ProductRepository {
    db: Arc<Database>,
}

impl ProductRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Product> {
        self.db.get_database().collection::<Product>(COLLECTION)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Product>> {
        Ok(self.collection().find_one(doc! { "_id": *id }).await?)
    }

    /// 카테고리의 상품을 `order` 오름차순으로 조회합니다.
    pub async fn find_by_category(&self, username: &str, category_id: &ObjectId) -> AppResult<Vec<Product>> {
        let cursor = self
            .collection()
            .find(doc! { "username": username.to_lowercase(), "category_id": *category_id })
            .sort(doc! { "order": 1, "created_at": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 사용자의 모든 상품을 최신순으로 조회합니다.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Vec<Product>> {
        let cursor = self
            .collection()
            .find(doc! { "username": username.to_lowercase() })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 카테고리 안에서 가장 큰 `order` 값
    pub async fn max_order(&self, category_id: &ObjectId) -> AppResult<Option<i32>> {
        let last = self
            .collection()
            .find_one(doc! { "category_id": *category_id })
            .sort(doc! { "order": -1 })
            .await?;

        Ok(last.map(|product| product.order))
    }

    pub async fn create(&self, mut product: Product) -> AppResult<Product> {
        let result = self.collection().insert_one(&product).await?;

        product.id = Some(
            result
                .inserted_id
                .as_object_id()
                .ok_or_else(|| AppError::InternalError("삽입된 상품 ID가 ObjectId가 아닙니다".to_string()))?,
        );

        Ok(product)
    }

    pub async fn update(&self, id: &ObjectId, mut set_doc: Document) -> AppResult<Option<Product>> {
        set_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_doc })
            .with_options(options)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// 카테고리에 속한 상품을 모두 삭제하고 삭제된 개수를 돌려줍니다.
    pub async fn delete_by_category(&self, category_id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection()
            .delete_many(doc! { "category_id": *category_id })
            .await?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let listing_index = IndexModel::builder()
            .keys(doc! { "username": 1, "category_id": 1, "order": 1 })
            .options(IndexOptions::builder()
                .name("username_category_order".to_string())
                .build())
            .build();

        let recent_index = IndexModel::builder()
            .keys(doc! { "username": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("username_created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([listing_index, recent_index])
            .await?;

        Ok(())
    }
}
