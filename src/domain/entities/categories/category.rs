//! Category Entity
//!
//! 사용자의 스태시를 구성하는 카테고리입니다.
//! 소유자 식별을 위해 `user_id`를, 공개 조회를 위해 `username`을 함께 저장합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub username: String,
    pub name: String,
    /// 이름에서 파생된 URL 식별자, 소유자 안에서 유일
    pub slug: String,
    pub order: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Category {
    pub fn new(user_id: ObjectId, username: String, name: String, slug: String, order: i32) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            user_id,
            username,
            name,
            slug,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.user_id == user_id
    }
}
