//! # 문자열 유틸리티
//!
//! 입력 정리, 슬러그 생성 등 문자열 처리 공통 함수입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::core::errors::AppError;

/// 필수 문자열 검증: 앞뒤 공백을 제거하고 비어 있으면 검증 에러를 돌려줍니다.
///
/// ```rust,ignore
/// let name = validate_required_string("  Desk Setup ", "name")?; // "Desk Setup"
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 정리: 공백만 있는 값은 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 이름에서 URL 슬러그를 만듭니다.
///
/// 소문자로 바꾸고, 영숫자가 아닌 문자 구간은 하나의 `-`로 접으며,
/// 앞뒤의 `-`는 제거합니다. 영숫자가 하나도 없으면 빈 문자열입니다.
///
/// ```rust,ignore
/// assert_eq!(slugify("Desk Setup 2024!"), "desk-setup-2024");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// 경로의 ID 문자열을 ObjectId로 변환합니다.
///
/// 형식이 잘못된 ID는 존재할 수 없는 리소스이므로 `NotFound`로 처리합니다.
pub fn parse_object_id(id: &str, resource: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::NotFound(format!("{} not found", resource)))
}
