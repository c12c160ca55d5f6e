//! 토큰 저장소 모듈
//!
//! Redis에 TTL과 함께 저장되는 인증 관련 상태를 관리합니다.
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `refresh_token:{user_id}` | 리프레시 토큰 SHA-256 다이제스트와 세션 정보 | 리프레시 토큰 만료까지 |
//! | `blacklist_token:{jti}` | 로그아웃된 액세스 토큰 정보 | 액세스 토큰 만료까지 |
//! | `oauth_state:{state}` | OAuth 로그인 시작 시각 | `OAUTH_SESSION_TIMEOUT_MINUTES` |
//! | `password_reset:{digest}` | 재설정 대상 사용자 | `PASSWORD_RESET_TTL_MINUTES` |

pub mod token_repository;

pub use token_repository::*;
