//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::authentication_request::AuthMode;
use crate::services::auth::token_service::{extract_bearer_token, TokenService};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let auth_result = authenticate_request(&req).await;

            match (mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {} {} - {}", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
                (AuthMode::Required, Ok(None)) => {
                    log::debug!("인증 헤더 없음: {} {}", req.method(), req.path());
                    return Ok(reject(
                        req,
                        AppError::AuthenticationError("Authentication required".to_string()),
                    ));
                }
                (AuthMode::Required, Ok(Some(user))) => {
                    log::debug!("인증 성공: {}", user.username);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(Some(user))) => {
                    log::debug!("선택적 인증 성공: {}", user.username);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(None)) => {}
                (AuthMode::Optional, Err(err)) => {
                    log::debug!("선택적 인증: 토큰 무시 ({}), 익명으로 진행", err);
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청의 Bearer 토큰을 검증합니다.
///
/// `Authorization` 헤더가 없으면 `Ok(None)`입니다.
async fn authenticate_request(req: &ServiceRequest) -> AppResult<Option<AuthenticatedUser>> {
    let Some(header) = req.headers().get("Authorization") else {
        return Ok(None);
    };

    let auth_header = header
        .to_str()
        .map_err(|_| AppError::AuthenticationError("Invalid authorization header".to_string()))?;

    let token = extract_bearer_token(auth_header)?;

    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;

    token_service.authenticate(token).await.map(Some)
}
