//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, Google OAuth, 토큰 갱신/로그아웃, 비밀번호 재설정을 처리합니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 이메일/패스워드 방식 (`POST /auth/register`, `POST /auth/login`)
//! - **OAuth 2.0**: Google OAuth 인증 (`GET /auth/google/login`, `/callback`)
//!
//! 로그인에 성공한 모든 경로는 같은 [`LoginResponse`] 형태로 토큰 쌍과 사용자 정보를 돌려줍니다.
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::tokens::request::RefreshRequest;
use crate::domain::dto::users::request::{
    CreateUserRequest, LocalLoginRequest, OAuthCallbackQuery, PasswordResetRequest, PasswordUpdateRequest,
};
use crate::domain::dto::users::response::{LoginResponse, UserResponse, UsernameAvailabilityResponse};
use crate::domain::dto::MessageResponse;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::{GoogleAuthService, PasswordResetService, TokenService};
use crate::services::users::UserService;

/// 로컬 회원가입 후 바로 로그인 상태로 토큰을 발급합니다.
///
/// # Endpoint
/// `POST /auth/register`
#[post("/register")]
pub async fn register(
    payload: web::Json<CreateUserRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = user_service.register(payload.into_inner()).await?;
    let tokens = token_service.issue_token_pair(&user).await?;

    Ok(HttpResponse::Created().json(LoginResponse::new(user, tokens)))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn local_login(
    payload: web::Json<LocalLoginRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = user_service.login(&payload.email, &payload.password).await?;
    log::info!("로컬 로그인 - 사용자: {}", user.username);

    let tokens = token_service.issue_token_pair(&user).await?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(user, tokens)))
}

/// Google OAuth 로그인 URL 생성 핸들러
///
/// # Endpoint
/// `GET /auth/google/login`
#[get("/google/login")]
pub async fn google_login_url(
    google_service: web::Data<GoogleAuthService>,
) -> Result<HttpResponse, AppError> {
    let url_response = google_service.get_login_url().await?;

    Ok(HttpResponse::Ok().json(url_response))
}

/// Google OAuth 콜백 처리 핸들러
///
/// # Endpoint
/// `GET /auth/google/callback?code={code}&state={state}`
#[get("/google/callback")]
pub async fn google_oauth_callback(
    query: web::Query<OAuthCallbackQuery>,
    google_service: web::Data<GoogleAuthService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    // 사용자가 동의를 거부한 경우
    if let Some(error) = &query.error {
        let error_msg = query
            .error_description
            .as_deref()
            .unwrap_or("Google sign-in was cancelled or failed");
        log::warn!("Google OAuth 에러: {} - {}", error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    let code = query
        .code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::ValidationError("Authorization code is required".to_string()))?;
    let state = query
        .state
        .as_deref()
        .filter(|state| !state.is_empty())
        .ok_or_else(|| AppError::ValidationError("OAuth state is required".to_string()))?;

    let user = google_service.authenticate_with_code(code, state).await?;
    let tokens = token_service.issue_token_pair(&user).await?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(user, tokens)))
}

/// 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("/refresh")]
pub async fn refresh_tokens(
    payload: web::Json<RefreshRequest>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = token_service.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// 재설정 링크 요청. 계정 존재 여부와 관계없이 같은 응답을 돌려줍니다.
///
/// # Endpoint
/// `POST /auth/password/reset`
#[post("/password/reset")]
pub async fn request_password_reset(
    payload: web::Json<PasswordResetRequest>,
    reset_service: web::Data<PasswordResetService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    reset_service.request_reset(&payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "If an account exists for this email, a password reset link has been sent",
    )))
}

/// # Endpoint
/// `POST /auth/password/update`
#[post("/password/update")]
pub async fn update_password(
    payload: web::Json<PasswordUpdateRequest>,
    reset_service: web::Data<PasswordResetService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    reset_service
        .update_password(&payload.token, &payload.password, &payload.confirm_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password has been updated")))
}

/// # Endpoint
/// `GET /auth/username/{username}/availability`
#[get("/username/{username}/availability")]
pub async fn username_availability(
    path: web::Path<String>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    let available = user_service.is_username_available(&username).await?;

    Ok(HttpResponse::Ok().json(UsernameAvailabilityResponse {
        username: username.trim().to_lowercase(),
        available,
    }))
}

/// 현재 로그인한 사용자 정보
///
/// # Endpoint
/// `GET /auth/me`
#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn get_current_user(
    user: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let current = user_service.get_user(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(current)))
}

/// 리프레시 세션을 지우고 현재 액세스 토큰을 폐기합니다.
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    user: AuthenticatedUser,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    token_service.logout(&user).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_me_requires_token() {
        let app = test::init_service(App::new().service(web::scope("/auth").service(get_current_user))).await;

        let req = test::TestRequest::get().uri("/auth/me").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_logout_requires_token() {
        let app = test::init_service(App::new().service(web::scope("/auth").service(logout))).await;

        let req = test::TestRequest::post().uri("/auth/logout").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
