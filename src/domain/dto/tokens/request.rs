use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}
