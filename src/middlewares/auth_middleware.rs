//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고
//! [`AuthenticatedUser`](crate::domain::models::auth::authenticated_user::AuthenticatedUser)를
//! request extension에 넣습니다.
//!
//! 토큰 검증에 필요한 [`TokenService`](crate::services::auth::TokenService)는
//! `web::Data`로 등록된 인스턴스를 요청마다 꺼내 씁니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::authentication_request::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 필수 인증
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 (토큰이 없거나 잘못되어도 익명으로 진행)
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use crate::domain::models::auth::authenticated_user::OptionalUser;

    async fn whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.username),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_missing_header() {
        let app = test::init_service(
            App::new().service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_non_bearer_header() {
        let app = test::init_service(
            App::new().service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_optional_mode_allows_anonymous() {
        let app = test::init_service(
            App::new().service(
                web::scope("/stash")
                    .wrap(AuthMiddleware::optional())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/stash").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), b"anonymous");
    }

    #[actix_web::test]
    async fn test_optional_mode_ignores_invalid_header() {
        let app = test::init_service(
            App::new().service(
                web::scope("/stash")
                    .wrap(AuthMiddleware::optional())
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/stash")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), b"anonymous");
    }
}
