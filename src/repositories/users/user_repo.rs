//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션의 데이터 액세스 계층입니다.
//!
//! 사용자명과 이메일의 유일성은 유니크 인덱스가 최종 판정합니다.
//! 서비스 계층의 사전 조회는 친절한 에러 메시지를 위한 것이고,
//! 조회와 삽입 사이의 경쟁은 [`UserRepository::create`]가 중복 키 에러로 구분해 돌려줍니다.
//!
//! 이 리포지토리는 사용자명 조정기의 [`UsernameLookup`] 구현체이기도 합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::users::user::User,
    services::users::username_resolver::{ExistenceCheck, UsernameLookup},
};

const COLLECTION: &str = "users";

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

const EMAIL_INDEX: &str = "email_unique";
const USERNAME_INDEX: &str = "username_unique";

pub struct UserRepository {
    db: Arc<Database>,
}

/// 유니크 인덱스 위반의 종류
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DuplicateKey {
    Username,
    Email,
    Other,
}

/// 중복 키 에러라면 서버가 보낸 메시지와 상세 정보로 위반한 인덱스를 판정합니다.
pub(crate) fn duplicate_key_kind(err: &mongodb::error::Error) -> Option<DuplicateKey> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            Some(classify_duplicate_key(&write_error.message, write_error.details.as_ref()))
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            Some(classify_duplicate_key(&command_error.message, None))
        }
        _ => None,
    }
}

/// 유니크 인덱스 위반 여부. `find_one_and_update`는 명령 에러로 돌려줍니다.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    duplicate_key_kind(err).is_some()
}

/// `keyPattern`이 있으면 그 필드로, 없으면 메시지의 `index: <name>` 부분으로 판정합니다.
///
/// 메시지 뒤쪽의 `dup key: { ... }`에는 중복된 값이 그대로 들어 있으므로 보지 않습니다.
pub(crate) fn classify_duplicate_key(message: &str, details: Option<&Document>) -> DuplicateKey {
    if let Some(key_pattern) = details.and_then(|d| d.get_document("keyPattern").ok()) {
        if key_pattern.contains_key("username") {
            return DuplicateKey::Username;
        }
        if key_pattern.contains_key("email") {
            return DuplicateKey::Email;
        }
    }

    let index_name = message
        .split("index: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next());

    match index_name {
        Some(USERNAME_INDEX) => DuplicateKey::Username,
        Some(EMAIL_INDEX) => DuplicateKey::Email,
        _ => DuplicateKey::Other,
    }
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection()
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?)
    }

    /// 사용자명으로 조회합니다. 대소문자를 구분하지 않습니다.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection()
            .find_one(doc! { "username": username.trim().to_lowercase() })
            .await?)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.collection().find_one(doc! { "_id": *id }).await?)
    }

    /// Google 계정 ID로 연결된 사용자를 조회합니다.
    pub async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection()
            .find_one(doc! {
                "auth_provider": "Google",
                "oauth_data.provider_user_id": google_id,
            })
            .await?)
    }

    /// 사용자를 저장합니다.
    ///
    /// 사용자명 유니크 인덱스 위반은 [`AppError::UsernameConflict`]로,
    /// 이메일 위반은 [`AppError::ConflictError`]로 돌려줍니다.
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        let result = match self.collection().insert_one(&user).await {
            Ok(result) => result,
            Err(e) => {
                return Err(match duplicate_key_kind(&e) {
                    Some(DuplicateKey::Username) => {
                        log::warn!("사용자명 유니크 인덱스 위반: {}", user.username);
                        AppError::UsernameConflict(user.username.clone())
                    }
                    Some(DuplicateKey::Email) => {
                        AppError::ConflictError("This email is already registered".to_string())
                    }
                    Some(DuplicateKey::Other) => {
                        log::warn!("알 수 없는 유니크 인덱스 위반: {}", e);
                        AppError::ConflictError("Account already exists".to_string())
                    }
                    None => AppError::from(e),
                });
            }
        };

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("삽입된 사용자 ID가 ObjectId가 아닙니다".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    /// `$set` 문서를 적용하고 갱신된 사용자를 돌려줍니다. `updated_at`은 자동으로 갱신됩니다.
    pub async fn update(&self, id: &ObjectId, mut set_doc: Document) -> AppResult<Option<User>> {
        set_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_doc })
            .with_options(options)
            .await?)
    }

    pub async fn update_password(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "password_hash": password_hash, "updated_at": DateTime::now() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    pub async fn touch_last_login(&self, id: &ObjectId) -> AppResult<()> {
        self.collection()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "last_login_at": DateTime::now() } },
            )
            .await?;

        Ok(())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(EMAIL_INDEX.to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(USERNAME_INDEX.to_string())
                .build())
            .build();

        let google_id_index = IndexModel::builder()
            .keys(doc! { "oauth_data.provider_user_id": 1 })
            .options(IndexOptions::builder()
                .sparse(true)
                .name("oauth_provider_user_id".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, username_index, google_id_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UsernameLookup for UserRepository {
    async fn exists(&self, username: &str) -> ExistenceCheck {
        let collection = self.db.get_database().collection::<Document>(COLLECTION);

        match collection
            .find_one(doc! { "username": username.to_lowercase() })
            .projection(doc! { "_id": 1 })
            .await
        {
            Ok(Some(_)) => ExistenceCheck::Found,
            Ok(None) => ExistenceCheck::NotFound,
            Err(e) => {
                log::error!("사용자명 존재 확인 실패 ({}): {}", username, e);
                ExistenceCheck::Error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_index_violation() {
        let message = r#"E11000 duplicate key error collection: stash.users index: username_unique dup key: { username: "jane" }"#;

        assert_eq!(classify_duplicate_key(message, None), DuplicateKey::Username);
    }

    #[test]
    fn test_email_violation_with_username_in_value() {
        let message = r#"E11000 duplicate key error collection: stash.users index: email_unique dup key: { email: "username@example.com" }"#;

        assert_eq!(classify_duplicate_key(message, None), DuplicateKey::Email);
    }

    #[test]
    fn test_key_pattern_takes_precedence() {
        let details = doc! { "keyPattern": { "email": 1 }, "keyValue": { "email": "username_unique@x.io" } };

        assert_eq!(
            classify_duplicate_key("E11000 duplicate key error", Some(&details)),
            DuplicateKey::Email
        );
    }

    #[test]
    fn test_unknown_index() {
        let message = "E11000 duplicate key error collection: stash.users index: _id_ dup key: { _id: 1 }";

        assert_eq!(classify_duplicate_key(message, None), DuplicateKey::Other);
    }
}
