//! # Application Error Handling System
//!
//! 스태시 백엔드 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! `thiserror`로 에러 타입을 정의하고 `actix_web::ResponseError`를 구현하여
//! 모든 에러가 일관된 JSON 응답으로 변환되도록 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `AuthenticationError` | 401 Unauthorized | 인증 실패 |
//! | `AuthorizationError` | 403 Forbidden | 다른 사용자의 리소스 수정 시도 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 중복 이메일, 중복 슬러그 |
//! | `UsernameConflict` | 409 Conflict | 저장 시점의 사용자명 유니크 인덱스 위반 |
//! | `UsernameResolution` | 400 / 409 / 502 | 사용자명 조정 실패 (아래 참고) |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | Redis 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | Google API 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! `UsernameResolution`은 내부 원인에 따라 상태 코드가 달라집니다.
//! 빈 후보 이름은 400, 시도 횟수 소진은 409, 존재 확인 조회 실패는 502입니다.
//!
//! 5xx 응답 본문에는 원인을 싣지 않습니다. 원인은 서버 로그에만 남습니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn find_category(&self, id: &str) -> Result<Category, AppError> {
//!     self.category_repo
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

use crate::services::users::username_resolver::UsernameResolutionError;

/// 애플리케이션 전역 에러 타입
///
/// 각 변형은 하나의 HTTP 상태 코드로 매핑됩니다.
/// 인프라 계층 에러(`DatabaseError`, `RedisError`)는 메시지를 그대로 로그에 남기고
/// 클라이언트에는 같은 형식의 JSON에 일반 메시지만 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 사용자명 유니크 인덱스 위반 (409)
    ///
    /// 사용자명 조정 결과가 저장 직전에 다른 요청에 의해 선점된 경우입니다.
    /// 조정(읽기)과 저장(쓰기)은 원자적이지 않으므로 저장소의 유니크 인덱스가
    /// 최종 판정을 내리고, 그 위반은 일반 충돌과 구분해서 전달됩니다.
    #[error("Username conflict: {0}")]
    UsernameConflict(String),

    /// 인증 실패 에러 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (500)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 사용자명 조정 실패
    #[error(transparent)]
    UsernameResolution(#[from] UsernameResolutionError),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) | AppError::UsernameConflict(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::UsernameResolution(err) => match err {
                UsernameResolutionError::EmptyCandidate => StatusCode::BAD_REQUEST,
                UsernameResolutionError::ResolutionExhausted { .. } => StatusCode::CONFLICT,
                UsernameResolutionError::ExternalLookupFailure(_) => StatusCode::BAD_GATEWAY,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러 응답은 `{ "error": "..." }` 형식을 따릅니다.
    /// 5xx 에러는 서버 로그에 원인을 남기고 본문에는 일반 메시지만 씁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{} 응답: {}", status.as_u16(), self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.public_message()
            }))
    }
}

impl AppError {
    /// 클라이언트에 보여줄 메시지
    pub fn public_message(&self) -> String {
        match actix_web::ResponseError::status_code(self) {
            StatusCode::BAD_GATEWAY => "Upstream service is unavailable".to_string(),
            status if status.is_server_error() => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let claims = serde_json::from_str::<Session>(&raw)
///     .context("세션 역직렬화 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Category not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Not the owner".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_username_conflict_is_distinct_but_409() {
        let error = AppError::UsernameConflict("alice".to_string());

        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert!(error.to_string().starts_with("Username conflict"));
    }

    #[test]
    fn test_username_resolution_status_codes() {
        let empty = AppError::from(UsernameResolutionError::EmptyCandidate);
        let exhausted = AppError::from(UsernameResolutionError::ResolutionExhausted {
            candidate: "alice".to_string(),
            attempts: 3,
        });
        let lookup = AppError::from(UsernameResolutionError::ExternalLookupFailure(
            "connection reset".to_string(),
        ));

        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(exhausted.status_code(), StatusCode::CONFLICT);
        assert_eq!(lookup.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn test_server_error_body_hides_cause() {
        let lookup = AppError::from(UsernameResolutionError::ExternalLookupFailure(
            "connection reset by mongo-0:27017".to_string(),
        ));
        let database = AppError::DatabaseError("E11000 at stash.users".to_string());

        for (error, expected) in [
            (lookup, "Upstream service is unavailable"),
            (database, "Internal server error"),
        ] {
            let response = error.error_response();
            let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

            assert_eq!(json["error"], expected);
        }
    }

    #[test]
    fn test_client_error_keeps_message() {
        let error = AppError::ConflictError("This email is already registered".to_string());

        assert_eq!(error.public_message(), "This email is already registered");
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
