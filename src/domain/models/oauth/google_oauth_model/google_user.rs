//! Google 사용자 정보 모델
//!
//! `https://www.googleapis.com/oauth2/v2/userinfo` 응답을 매핑합니다.

use serde::Deserialize;

/// Google UserInfo API 응답
///
/// ```json
/// {
///   "id": "123456789012345678901",
///   "email": "user@gmail.com",
///   "verified_email": true,
///   "name": "홍길동",
///   "picture": "https://lh3.googleusercontent.com/a/..."
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 식별자 (불변)
    pub id: String,

    pub email: String,

    #[serde(default)]
    pub verified_email: bool,

    /// 표시 이름. 프로필에 이름이 없는 계정은 빈 값으로 옵니다.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub given_name: Option<String>,

    #[serde(default)]
    pub family_name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// 사용자명 후보
    ///
    /// 표시 이름이 있으면 표시 이름을, 없으면 이메일의 `@` 앞부분을 사용합니다.
    /// 둘 다 비어 있으면 빈 문자열을 돌려주며, 판정은 조정기가 내립니다.
    pub fn username_candidate(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }

    /// 표시 이름. 비어 있으면 사용자명을 사용합니다.
    pub fn display_name_or(&self, fallback: &str) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: Option<&str>, email: &str) -> GoogleUserInfo {
        GoogleUserInfo {
            id: "1".to_string(),
            email: email.to_string(),
            verified_email: true,
            name: name.map(str::to_string),
            given_name: None,
            family_name: None,
            picture: None,
        }
    }

    #[test]
    fn test_candidate_prefers_display_name() {
        assert_eq!(info(Some("Jane Doe"), "jd@gmail.com").username_candidate(), "Jane Doe");
    }

    #[test]
    fn test_candidate_falls_back_to_email_local_part() {
        assert_eq!(info(None, "jd@gmail.com").username_candidate(), "jd");
        assert_eq!(info(Some("   "), "jd@gmail.com").username_candidate(), "jd");
    }

    #[test]
    fn test_candidate_empty_when_nothing_usable() {
        assert_eq!(info(None, "@gmail.com").username_candidate(), "");
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"id":"42","email":"x@gmail.com"}"#;
        let parsed: GoogleUserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.id, "42");
        assert!(parsed.name.is_none());
        assert!(!parsed.verified_email);
    }
}
