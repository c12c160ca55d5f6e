//! User Entity Implementation
//!
//! 로컬 인증과 Google OAuth 인증을 함께 지원하는 사용자 엔티티입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::models::oauth::google_oauth_model::oauth_provider::OAuthData;

/// 사용자 엔티티
///
/// `username`은 항상 소문자로 저장되며 스태시 공개 주소(`/stash/{username}`)로 쓰입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 사용자명 (unique, 소문자)
    pub username: String,
    pub display_name: String,
    /// 해시된 비밀번호 (OAuth 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    /// OAuth 관련 추가 데이터 (로컬 인증 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_data: Option<OAuthData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_active: bool,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    pub fn new_local(email: String, username: String, display_name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            username: username.to_lowercase(),
            display_name,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            oauth_data: None,
            avatar_url: None,
            bio: None,
            is_active: true,
            roles: vec!["user".to_string()],
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 OAuth 사용자 생성
    ///
    /// 프로바이더의 프로필 이미지가 있으면 아바타로 사용합니다.
    pub fn new_oauth(
        email: String,
        username: String,
        display_name: String,
        auth_provider: AuthProvider,
        provider_user_id: String,
        provider_profile_image: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        let oauth_data = OAuthData {
            provider_user_id,
            provider_profile_image: provider_profile_image.clone(),
        };

        Self {
            id: None,
            email,
            username: username.to_lowercase(),
            display_name,
            password_hash: None,
            auth_provider,
            oauth_data: Some(oauth_data),
            avatar_url: provider_profile_image,
            bio: None,
            is_active: true,
            roles: vec!["user".to_string()],
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_local_auth(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Local)
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_local_auth() && self.password_hash.is_some()
    }

    pub fn oauth_provider_id(&self) -> Option<&str> {
        self.oauth_data.as_ref().map(|data| data.provider_user_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user_lowercases_username() {
        let user = User::new_local(
            "alice@example.com".to_string(),
            "Alice_01".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
        );

        assert_eq!(user.username, "alice_01");
        assert!(user.can_authenticate_with_password());
        assert_eq!(user.roles, vec!["user".to_string()]);
    }

    #[test]
    fn test_new_oauth_user_uses_provider_image_as_avatar() {
        let user = User::new_oauth(
            "bob@gmail.com".to_string(),
            "bob".to_string(),
            "Bob".to_string(),
            AuthProvider::Google,
            "google-123".to_string(),
            Some("https://lh3.googleusercontent.com/a/bob".to_string()),
        );

        assert!(!user.can_authenticate_with_password());
        assert_eq!(user.oauth_provider_id(), Some("google-123"));
        assert_eq!(user.avatar_url.as_deref(), Some("https://lh3.googleusercontent.com/a/bob"));
    }
}
