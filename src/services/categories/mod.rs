//! 카테고리 서비스 모듈

pub mod category_service;

pub use category_service::*;
