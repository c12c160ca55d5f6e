use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Category name must be 1-50 characters"))]
    pub name: String,

    /// 생략하면 마지막 카테고리 다음 순서가 됩니다.
    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Category name must be 1-50 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: Option<i32>,
}
