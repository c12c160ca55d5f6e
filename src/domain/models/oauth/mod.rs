//! OAuth 외부 모델
//!
//! Google OAuth 2.0 Authorization Code 플로우에서 주고받는 데이터를 정의합니다.

pub mod google_oauth_model;
