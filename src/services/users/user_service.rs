//! # 사용자 관리 서비스 구현
//!
//! 로컬 계정의 가입, 로그인, 프로필 관리, 사용자명 사용 가능 여부 확인을 담당합니다.
//!
//! ## 중복 처리
//!
//! 가입 시 사용자명/이메일을 먼저 조회해 사람이 읽을 수 있는 메시지로 거절합니다.
//! 조회와 저장 사이의 경쟁은 저장소의 유니크 인덱스가 잡아내며,
//! 그 경우 사용자명은 `UsernameConflict`, 이메일은 `ConflictError`로 전달됩니다.
//!
//! ## 비밀번호
//!
//! bcrypt로 해싱하며 cost는 조립 루트가 [`PasswordConfig`](crate::config::PasswordConfig)에서
//! 읽어 넘겨줍니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::request::{create_user_request::validate_username, CreateUserRequest, UpdateProfileRequest},
        entities::users::user::User,
    },
    repositories::users::user_repo::UserRepository,
    utils::string_utils::clean_optional_string,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct UserService {
    user_repo: Arc<UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>, bcrypt_cost: u32) -> Self {
        Self { user_repo, bcrypt_cost }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    /// 로컬 계정을 만듭니다. 요청은 핸들러에서 검증된 상태여야 합니다.
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<User> {
        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_lowercase();

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::ConflictError("Username is already taken".to_string()));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("This email is already registered".to_string()));
        }

        let start_time = std::time::Instant::now();
        let password_hash = self.hash_password(&request.password)?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        let user = local_user(request, password_hash);

        let created = self.user_repo.create(user).await?;
        log::info!("새 로컬 사용자 등록: {}", created.username);

        Ok(created)
    }

    /// 이메일/비밀번호로 로그인합니다.
    ///
    /// 없는 이메일과 틀린 비밀번호는 같은 메시지로 거절합니다.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if !user.can_authenticate_with_password() {
            return Err(AppError::AuthenticationError(format!(
                "This account uses {} sign-in",
                user.auth_provider.as_str()
            )));
        }

        let password_hash = user
            .password_hash
            .as_ref()
            .ok_or_else(|| AppError::InternalError("비밀번호 해시가 없습니다".to_string()))?;

        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            log::debug!("로그인 실패 (비밀번호 불일치): {}", user.username);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            return Err(AppError::AuthorizationError("This account has been disabled".to_string()));
        }

        if let Some(id) = user.id.as_ref() {
            self.user_repo.touch_last_login(id).await?;
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: &ObjectId) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 공개 프로필 조회 (대소문자 무시)
    pub async fn get_public_profile(&self, username: &str) -> AppResult<User> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update_profile(&self, user_id: &ObjectId, request: UpdateProfileRequest) -> AppResult<User> {
        let set_doc = profile_update_document(request)?;

        if set_doc.is_empty() {
            return self.get_user(user_id).await;
        }

        self.user_repo
            .update(user_id, set_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 사용자명 사용 가능 여부. 형식이 잘못된 이름은 검증 에러입니다.
    pub async fn is_username_available(&self, username: &str) -> AppResult<bool> {
        let username = username.trim().to_lowercase();

        if !(3..=20).contains(&username.chars().count()) {
            return Err(AppError::ValidationError("Username must be 3-20 characters".to_string()));
        }
        validate_username(&username).map_err(|e| {
            AppError::ValidationError(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid username".to_string()),
            )
        })?;

        Ok(self.user_repo.find_by_username(&username).await?.is_none())
    }

    /// 비밀번호 재설정으로 새 비밀번호를 저장합니다.
    pub async fn set_password(&self, user_id: &ObjectId, password: &str) -> AppResult<()> {
        let password_hash = self.hash_password(password)?;

        if !self.user_repo.update_password(user_id, &password_hash).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}

/// 프로필 수정 요청을 `$set` 문서로 바꿉니다.
///
/// 빈 표시 이름은 거절하고, 빈 아바타/소개는 값을 지웁니다.
fn profile_update_document(request: UpdateProfileRequest) -> AppResult<Document> {
    let mut set_doc = Document::new();

    if let Some(display_name) = request.display_name {
        let display_name = display_name.trim().to_string();
        if display_name.is_empty() {
            return Err(AppError::ValidationError("Display name cannot be empty".to_string()));
        }
        set_doc.insert("display_name", display_name);
    }

    if request.avatar_url.is_some() {
        set_doc.insert(
            "avatar_url",
            clean_optional_string(request.avatar_url).map_or(Bson::Null, Bson::String),
        );
    }

    if request.bio.is_some() {
        set_doc.insert(
            "bio",
            clean_optional_string(request.bio).map_or(Bson::Null, Bson::String),
        );
    }

    Ok(set_doc)
}

/// 가입 요청으로 저장할 로컬 사용자를 만듭니다.
///
/// 이메일과 사용자명은 소문자로 저장하며 표시 이름이 비어 있으면 사용자명을 씁니다.
fn local_user(request: CreateUserRequest, password_hash: String) -> User {
    let email = request.email.trim().to_lowercase();
    let username = request.username.trim().to_lowercase();
    let display_name = clean_optional_string(request.display_name).unwrap_or_else(|| username.clone());

    User::new_local(email, username, display_name, password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn registration(email: &str, username: &str, display_name: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: "Secret123".to_string(),
            display_name: display_name.map(str::to_string),
        }
    }

    #[test]
    fn test_local_user_lowercases_identity() {
        let user = local_user(registration(" Alice@Example.COM ", "Alice_01", None), "hash".to_string());

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.username, "alice_01");
        assert_eq!(user.display_name, "alice_01");
        assert_eq!(user.password_hash.as_deref(), Some("hash"));
    }

    #[test]
    fn test_local_user_keeps_display_name() {
        let user = local_user(registration("bob@example.com", "Bob", Some("  Bob Ross ")), "hash".to_string());

        assert_eq!(user.username, "bob");
        assert_eq!(user.display_name, "Bob Ross");
    }

    #[test]
    fn test_profile_document_only_contains_sent_fields() {
        let set_doc = profile_update_document(UpdateProfileRequest {
            display_name: Some("  Alice  ".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(set_doc, doc! { "display_name": "Alice" });
    }

    #[test]
    fn test_profile_document_clears_blank_bio() {
        let set_doc = profile_update_document(UpdateProfileRequest {
            bio: Some("   ".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(set_doc.get("bio"), Some(&Bson::Null));
    }

    #[test]
    fn test_profile_document_rejects_blank_display_name() {
        let result = profile_update_document(UpdateProfileRequest {
            display_name: Some("  ".to_string()),
            ..Default::default()
        });

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_empty_request_produces_empty_document() {
        assert!(profile_update_document(UpdateProfileRequest::default()).unwrap().is_empty());
    }

    #[test]
    fn test_bcrypt_round_trip_with_low_cost() {
        let hash = bcrypt::hash("Secret123", 4).unwrap();

        assert!(bcrypt::verify("Secret123", &hash).unwrap());
        assert!(!bcrypt::verify("secret123", &hash).unwrap());
    }
}
