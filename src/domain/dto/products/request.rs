use serde::Deserialize;
use validator::{Validate, ValidateUrl, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,

    #[validate(length(min = 1, max = 100, message = "Product name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Brand must be 1-50 characters"))]
    pub brand: String,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,

    /// 빈 문자열은 링크 없음으로 처리됩니다.
    #[validate(custom(function = "validate_affiliate_link"))]
    pub affiliate_link: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: Option<i32>,
}

/// 상품 수정 요청. 보낸 필드만 갱신됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Product name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Brand must be 1-50 characters"))]
    pub brand: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    /// 빈 문자열은 링크 없음으로 처리됩니다.
    #[validate(custom(function = "validate_affiliate_link"))]
    pub affiliate_link: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order: Option<i32>,
}

/// 제휴 링크는 비어 있거나 올바른 URL이어야 합니다.
fn validate_affiliate_link(link: &str) -> Result<(), ValidationError> {
    if link.trim().is_empty() || link.trim().validate_url() {
        return Ok(());
    }

    Err(ValidationError::new("url").with_message("Affiliate link must be a valid URL".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateProductRequest {
        CreateProductRequest {
            category_id: "665f1c2e8b3e4a0012345678".to_string(),
            name: "MX Master 3S".to_string(),
            brand: "Logitech".to_string(),
            image_url: "https://cdn.example.com/mx.png".to_string(),
            affiliate_link: Some("https://amzn.to/abc".to_string()),
            description: None,
            order: None,
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_urls_are_validated() {
        let bad_image = CreateProductRequest { image_url: "mx.png".to_string(), ..valid() };
        let bad_link = CreateProductRequest { affiliate_link: Some("amzn".to_string()), ..valid() };

        assert!(bad_image.validate().is_err());
        assert!(bad_link.validate().is_err());
    }

    #[test]
    fn test_blank_affiliate_link_passes_validation() {
        let update: UpdateProductRequest = serde_json::from_str(r#"{"affiliate_link":""}"#).unwrap();
        let create = CreateProductRequest { affiliate_link: Some("  ".to_string()), ..valid() };

        assert!(update.validate().is_ok());
        assert!(create.validate().is_ok());
        assert_eq!(update.affiliate_link.as_deref(), Some(""));
    }

    #[test]
    fn test_invalid_affiliate_link_on_update() {
        let update: UpdateProductRequest = serde_json::from_str(r#"{"affiliate_link":"amzn"}"#).unwrap();

        assert!(update.validate().is_err());
    }
}
