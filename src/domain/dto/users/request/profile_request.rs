use serde::Deserialize;
use validator::Validate;

/// 프로필 수정 요청. 보낸 필드만 갱신됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 300, message = "Bio must be at most 300 characters"))]
    pub bio: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.avatar_url.is_none() && self.bio.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_must_be_url() {
        let req = UpdateProfileRequest {
            avatar_url: Some("not a url".to_string()),
            ..Default::default()
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_request_detected() {
        assert!(UpdateProfileRequest::default().is_empty());
    }
}
