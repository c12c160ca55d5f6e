//! 미들웨어 모듈
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 검증 (서명, 만료, 블랙리스트)
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드와 역할 검사 지원
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(token_service.clone())
//!     .service(
//!         web::scope("/api/v1/me")
//!             .wrap(AuthMiddleware::required())
//!             .route("/profile", web::patch().to(update_profile)),
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
