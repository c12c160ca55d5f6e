//! # Data Transfer Objects (DTO) Module
//!
//! API 경계의 요청/응답 데이터 계약을 정의합니다.
//! 요청 DTO는 `validator`로 검증되고, 응답 DTO는 엔티티에서 `From`으로 변환됩니다.
//!
//! ```text
//! dto/
//! ├── users/        # 회원가입, 로그인, 프로필, 비밀번호 재설정
//! ├── tokens/       # 토큰 갱신
//! ├── categories/   # 카테고리와 스태시 응답
//! └── products/     # 상품
//! ```
//!
//! 시간 필드는 응답에서 RFC 3339 문자열로 내려갑니다.

use mongodb::bson::DateTime;
use serde::Serialize;

pub mod users;
pub mod tokens;
pub mod categories;
pub mod products;

pub use users::*;

/// 단순 메시지 응답
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// BSON 시간을 RFC 3339 문자열로 변환합니다.
pub(crate) fn format_datetime(value: &DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}
