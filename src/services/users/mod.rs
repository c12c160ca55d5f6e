//! 사용자 관리 서비스 모듈
//!
//! 로컬 계정의 가입/로그인/프로필 관리와, 외부 계정의 표시 이름에서
//! 유일한 사용자명을 만들어내는 사용자명 조정기를 제공합니다.

pub mod user_service;
pub mod username_resolver;

pub use user_service::*;
pub use username_resolver::*;
