//! 카테고리 및 스태시 DTO

pub mod request;
pub mod response;

pub use request::{CreateCategoryRequest, UpdateCategoryRequest};
pub use response::{CategoryResponse, StashResponse};
