//! # 사용자 DTO 모듈
//!
//! - [`request`] - 회원가입, 로그인, OAuth 콜백, 프로필 수정, 비밀번호 재설정 요청
//! - [`response`] - 사용자 정보, 공개 프로필, 로그인 결과, OAuth 응답

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
