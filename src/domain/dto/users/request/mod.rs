//! # 사용자 관련 요청 DTO 모듈
//!
//! 필드 단위 검증은 `#[validate(...)]` 속성으로, 필드 간 검증(비밀번호 확인 등)은
//! `schema` 함수로 처리합니다. 핸들러는 `request.validate()?`로 한 번에 검증합니다.

pub mod auth_request;
pub mod create_user_request;
pub mod profile_request;

pub use auth_request::*;
pub use create_user_request::CreateUserRequest;
pub use profile_request::UpdateProfileRequest;
