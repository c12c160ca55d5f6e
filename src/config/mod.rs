//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙에서 관리합니다.
//! 설정 구조체는 값을 읽기만 하며, 실제 값은 조립 루트
//! ([`AppContainer`](crate::core::container::AppContainer))가 시작 시 한 번 읽어
//! 각 서비스 생성자에 넘깁니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, MongoDB, Redis, Rate Limit, CORS, 사용자명 조정 설정
//! - [`auth_config`] - Google OAuth, JWT, 비밀번호 재설정 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="stash_dev"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 사용자명 조정
//! export USERNAME_MAX_ATTEMPTS="1000"
//! export USERNAME_PERSIST_RETRIES="2"
//!
//! # 보안
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
