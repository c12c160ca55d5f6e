//! 상품 DTO

pub mod request;
pub mod response;

pub use request::{CreateProductRequest, UpdateProductRequest};
pub use response::ProductResponse;
