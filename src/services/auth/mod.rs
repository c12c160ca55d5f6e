//! 인증 및 보안 서비스 모듈
//!
//! - [`TokenService`]: HS256 액세스/리프레시 토큰 발급, 회전, 로그아웃
//! - [`GoogleAuthService`]: Google OAuth 2.0 로그인과 신규 계정 생성
//! - [`PasswordResetService`]: 재설정 링크 발급과 비밀번호 변경
//!
//! OAuth state와 재설정 토큰은 모두 Redis에 TTL과 함께 저장되며 한 번만 사용할 수 있습니다.

pub mod google_auth_service;
pub mod password_reset_service;
pub mod token_service;

pub use google_auth_service::*;
pub use password_reset_service::*;
pub use token_service::*;
