//! # Domain Layer Module
//!
//! 스태시 서비스의 도메인 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/   - MongoDB 문서와 1:1로 매핑되는 엔티티 (User, Category, Product)
//! ├── dto/        - HTTP 요청/응답 데이터 계약
//! └── models/     - 인증 컨텍스트, JWT 클레임, OAuth 외부 모델
//! ```
//!
//! 엔티티는 저장 형태를, DTO는 API 형태를 담당합니다.
//! 비밀번호 해시나 이메일처럼 공개되면 안 되는 필드는 응답 DTO로 옮겨지지 않습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
