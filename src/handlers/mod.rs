//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 서비스를 `web::Data<T>`로 주입받고, 요청 DTO를 `validate()?`로 검증한 뒤
//! 서비스 결과를 응답 DTO로 변환합니다. 모든 에러는 [`AppError`](crate::core::errors::AppError)의
//! `ResponseError` 구현을 통해 `{ "error": "..." }` JSON으로 나갑니다.
//!
//! ```text
//! handlers/
//! ├── auth.rs        ← 가입, 로그인, OAuth, 토큰, 비밀번호 재설정
//! ├── users.rs       ← 내 프로필 수정
//! ├── categories.rs  ← 내 카테고리 관리
//! ├── products.rs    ← 내 상품 관리
//! └── stash.rs       ← 공개 스태시 조회
//! ```

pub mod auth;
pub mod categories;
pub mod products;
pub mod stash;
pub mod users;
