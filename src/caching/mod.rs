//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 키-값 저장소 래퍼를 제공합니다.
//! 리프레시 세션, 액세스 토큰 블랙리스트, OAuth state, 비밀번호 재설정 토큰이
//! 모두 이 클라이언트를 통해 TTL과 함께 저장됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::connect("redis://localhost:6379").await?;
//! cache.set_with_expiry("oauth_state:abc", &"1", 600).await?;
//! let state: Option<String> = cache.get("oauth_state:abc").await?;
//! ```

pub mod redis;
