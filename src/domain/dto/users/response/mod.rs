//! # 사용자 관련 응답 DTO 모듈
//!
//! 비밀번호 해시, OAuth 내부 데이터는 어떤 응답에도 포함되지 않습니다.
//! 공개 프로필([`PublicProfileResponse`])은 이메일도 제외합니다.

pub mod user_response;
pub mod google_oauth_response;

pub use user_response::{LoginResponse, PublicProfileResponse, UserResponse, UsernameAvailabilityResponse};
pub use google_oauth_response::{GoogleTokenResponse, OAuthLoginUrlResponse};
