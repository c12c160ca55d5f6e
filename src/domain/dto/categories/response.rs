use serde::Serialize;

use crate::domain::dto::format_datetime;
use crate::domain::dto::users::response::PublicProfileResponse;
use crate::domain::entities::categories::category::Category;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub username: String,
    pub name: String,
    pub slug: String,
    pub order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id_string().unwrap_or_default(),
            created_at: format_datetime(&category.created_at),
            updated_at: format_datetime(&category.updated_at),
            username: category.username,
            name: category.name,
            slug: category.slug,
            order: category.order,
        }
    }
}

/// 공개 스태시: 프로필과 카테고리 목록
///
/// `is_owner`는 요청자가 스태시 주인일 때만 참이며, 클라이언트는 편집 UI 표시에 씁니다.
#[derive(Debug, Clone, Serialize)]
pub struct StashResponse {
    pub profile: PublicProfileResponse,
    pub categories: Vec<CategoryResponse>,
    pub is_owner: bool,
}

impl StashResponse {
    pub fn new(user: User, categories: Vec<Category>, viewer: Option<&AuthenticatedUser>) -> Self {
        let is_owner = match (viewer, user.id_string()) {
            (Some(viewer), Some(owner_id)) => viewer.user_id == owner_id,
            _ => false,
        };

        Self {
            profile: PublicProfileResponse::from(user),
            categories: categories.into_iter().map(CategoryResponse::from).collect(),
            is_owner,
        }
    }
}
