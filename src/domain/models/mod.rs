//! # Domain Models Module
//!
//! 저장되지 않는 도메인 모델을 모읍니다.
//!
//! - [`auth`] - 미들웨어가 요청에 주입하는 인증 컨텍스트와 인증 모드
//! - [`token`] - JWT 클레임과 토큰 쌍
//! - [`oauth`] - Google OAuth 사용자 정보와 계정 연결 데이터

pub mod auth;
pub mod token;
pub mod oauth;
