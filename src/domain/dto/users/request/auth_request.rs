//! 인증 요청관련 DTO
//!
//! 로그인, OAuth 콜백, 비밀번호 재설정 요청을 매핑합니다.
use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::create_user_request::validate_password_strength;

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 Google은 `code` 없이 `error`만 보냅니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 비밀번호 재설정 메일 요청
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

/// 재설정 토큰으로 비밀번호 변경
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct PasswordUpdateRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub confirm_password: String,
}

fn validate_passwords_match(req: &PasswordUpdateRequest) -> Result<(), ValidationError> {
    if req.password != req.confirm_password {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("Passwords do not match".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_update_requires_matching_confirmation() {
        let req = PasswordUpdateRequest {
            token: "t".to_string(),
            password: "NewSecret1".to_string(),
            confirm_password: "NewSecret2".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_password_update_valid() {
        let req = PasswordUpdateRequest {
            token: "t".to_string(),
            password: "NewSecret1".to_string(),
            confirm_password: "NewSecret1".to_string(),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_oauth_callback_with_error_only() {
        let query: OAuthCallbackQuery =
            serde_json::from_str(r#"{"error":"access_denied"}"#).unwrap();

        assert!(query.code.is_none());
        assert_eq!(query.error.as_deref(), Some("access_denied"));
    }
}
