//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트는 `/api/v1` 아래에 있으며, 인증 수준별로 스코프가 나뉩니다.
//!
//! | 스코프 | 인증 | 내용 |
//! |--------|------|------|
//! | `/api/v1/auth` | 대부분 없음 (`/me`, `/logout`은 필수) | 가입, 로그인, OAuth, 토큰, 비밀번호 재설정 |
//! | `/api/v1/me` | 필수 | 내 프로필, 카테고리, 상품 관리 |
//! | `/api/v1/stash` | 선택 | 공개 스태시 조회 (주인이면 `is_owner`) |
//!
//! 헬스체크는 `/health`와 `/api/v1/health` 둘 다에서 응답합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(container.token_service.clone())
//!     .configure(configure_all_routes)
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .service(health_check)
            .configure(configure_auth_routes)
            .configure(configure_me_routes)
            .configure(configure_stash_routes),
    );
}

/// 인증 라우트
///
/// ```bash
/// # 로컬 로그인
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"Password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            // 로컬 인증
            .service(handlers::auth::register)
            .service(handlers::auth::local_login)
            .service(handlers::auth::refresh_tokens)
            .service(handlers::auth::username_availability)
            // 비밀번호 재설정
            .service(handlers::auth::request_password_reset)
            .service(handlers::auth::update_password)
            // Google OAuth
            .service(handlers::auth::google_login_url)
            .service(handlers::auth::google_oauth_callback)
            // 인증 필요 (핸들러에 미들웨어 부착)
            .service(handlers::auth::get_current_user)
            .service(handlers::auth::logout),
    );
}

/// 로그인한 사용자의 리소스 관리
fn configure_me_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/me")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::update_profile)
            .service(handlers::categories::create_category)
            .service(handlers::categories::update_category)
            .service(handlers::categories::delete_category)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product),
    );
}

fn configure_stash_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stash")
            .wrap(AuthMiddleware::optional())
            .service(handlers::stash::get_stash)
            .service(handlers::stash::list_categories)
            .service(handlers::stash::list_user_products)
            .service(handlers::stash::list_category_products),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_health_on_both_paths() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for uri in ["/health", "/api/v1/health"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_me_scope_requires_authentication() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::patch()
            .uri("/api/v1/me/profile")
            .set_json(json!({ "bio": "hello" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
