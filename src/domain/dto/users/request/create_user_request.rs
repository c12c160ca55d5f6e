//! 회원가입 요청 DTO
//!
//! 이메일, 비밀번호, 사용자명을 받아 로컬 계정을 만듭니다.
//! 비밀번호/사용자명 규칙은 비밀번호 변경 요청과 공유합니다.
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 새로운 로컬 계정 생성을 위한 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    /// 사용자명 (3-20자, 영문/숫자/언더스코어/하이픈)
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 계정 비밀번호 (최소 8자, 대소문자+숫자 포함)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    /// 표시 이름. 생략하면 사용자명을 사용합니다.
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: Option<String>,
}

/// 사용자명 형식 검증 (ASCII 영문, 숫자, `_`, `-`만 허용)
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new("invalid_username").with_message(
            "Username can only contain letters, numbers, underscores and hyphens".into(),
        ));
    }
    Ok(())
}

/// 비밀번호 보안 강도 검증 (대문자, 소문자, 숫자 필수 포함)
pub(crate) fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password").with_message(
            "Password must contain an uppercase letter, a lowercase letter and a number".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, username: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("alice@example.com", "alice-01_x", "Secret123").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let errors = request("not-an-email", "alice", "Secret123").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_username_rules() {
        assert!(request("a@b.co", "al", "Secret123").validate().is_err());
        assert!(request("a@b.co", "a".repeat(21).as_str(), "Secret123").validate().is_err());
        assert!(request("a@b.co", "alice smith", "Secret123").validate().is_err());
        assert!(request("a@b.co", "앨리스앨리스", "Secret123").validate().is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(request("a@b.co", "alice", "short1A").validate().is_err());
        assert!(request("a@b.co", "alice", "alllowercase1").validate().is_err());
        assert!(request("a@b.co", "alice", "ALLUPPERCASE1").validate().is_err());
        assert!(request("a@b.co", "alice", "NoDigitsHere").validate().is_err());
    }

    #[test]
    fn test_empty_display_name_rejected() {
        let mut req = request("a@b.co", "alice", "Secret123");
        req.display_name = Some(String::new());

        assert!(req.validate().is_err());
    }
}
