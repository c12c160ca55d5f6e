//! # Core Module
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 일관된 JSON 에러 응답
//! - **자동 변환**: MongoDB, Redis, validator, 사용자명 조정 에러의 `From` 구현
//!
//! ### [`container`] - 조립 루트
//! - **AppContainer**: 리포지토리와 서비스를 생성자 주입으로 연결
//! - 서비스 핸들을 `web::Data`로 actix 앱에 등록
//!
//! ```rust,ignore
//! let container = AppContainer::build(database, redis).await?;
//!
//! HttpServer::new(move || {
//!     let container = container.clone();
//!     App::new()
//!         .configure(|cfg| container.configure(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod container;
pub mod errors;

pub use container::AppContainer;
pub use errors::*;
