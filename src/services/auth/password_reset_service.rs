//! # 비밀번호 재설정 서비스
//!
//! ```text
//! request_reset(email) ──► 로컬 계정이면 랜덤 토큰 발급
//!                          Redis password_reset:{sha256(token)} (TTL)
//!                          ResetLinkSender로 링크 전달
//!
//! update_password(token) ──► 다이제스트로 티켓 소비 (1회용)
//!                            비밀번호 해시 갱신, 리프레시 세션 제거
//! ```
//!
//! 재설정 요청은 계정 존재 여부와 관계없이 항상 성공으로 응답합니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{
    core::errors::{AppError, AppResult},
    domain::dto::users::request::create_user_request::validate_password_strength,
    repositories::{
        tokens::token_repository::{PasswordResetTicket, TokenRepository},
        users::user_repo::UserRepository,
    },
    services::{auth::token_service::TokenService, users::user_service::UserService},
    utils::token_utils::{random_url_token, sha256_hex},
};

/// 재설정 링크 전달 수단
#[async_trait]
pub trait ResetLinkSender: Send + Sync {
    async fn send_reset_link(&self, email: &str, link: &str) -> AppResult<()>;
}

/// 링크를 로그로만 남기는 기본 전달자
pub struct LogResetLinkSender;

#[async_trait]
impl ResetLinkSender for LogResetLinkSender {
    async fn send_reset_link(&self, email: &str, link: &str) -> AppResult<()> {
        log::info!("비밀번호 재설정 링크 발급 - email: {}, link: {}", email, link);
        Ok(())
    }
}

pub struct PasswordResetService {
    user_repo: Arc<UserRepository>,
    user_service: Arc<UserService>,
    token_repo: Arc<TokenRepository>,
    token_service: Arc<TokenService>,
    sender: Arc<dyn ResetLinkSender>,
    ttl_seconds: u64,
    reset_url: String,
}

impl PasswordResetService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<UserRepository>,
        user_service: Arc<UserService>,
        token_repo: Arc<TokenRepository>,
        token_service: Arc<TokenService>,
        sender: Arc<dyn ResetLinkSender>,
        ttl_seconds: u64,
        reset_url: String,
    ) -> Self {
        Self {
            user_repo,
            user_service,
            token_repo,
            token_service,
            sender,
            ttl_seconds,
            reset_url,
        }
    }

    /// 재설정 링크를 요청합니다.
    ///
    /// 활성 로컬 계정에만 링크를 보내며, 호출자에게는 결과를 알리지 않습니다.
    pub async fn request_reset(&self, email: &str) -> AppResult<()> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            log::debug!("재설정 요청 - 등록되지 않은 이메일");
            return Ok(());
        };

        if !user.is_local_auth() || !user.is_active {
            log::debug!("재설정 요청 무시 - user: {}", user.username);
            return Ok(());
        }

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let token = random_url_token();
        let ticket = PasswordResetTicket {
            user_id,
            email: user.email.clone(),
            requested_at: Utc::now().timestamp(),
        };

        self.token_repo
            .store_password_reset(&sha256_hex(&token), &ticket, self.ttl_seconds)
            .await?;

        self.sender
            .send_reset_link(&user.email, &build_reset_link(&self.reset_url, &token))
            .await
    }

    /// 재설정 토큰으로 비밀번호를 바꿉니다.
    pub async fn update_password(&self, token: &str, password: &str, confirm_password: &str) -> AppResult<()> {
        if password != confirm_password {
            return Err(AppError::ValidationError("Passwords do not match".to_string()));
        }
        if password.chars().count() < 8 {
            return Err(AppError::ValidationError("Password must be at least 8 characters".to_string()));
        }
        validate_password_strength(password).map_err(|e| {
            AppError::ValidationError(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Password is too weak".to_string()),
            )
        })?;

        let ticket = self
            .token_repo
            .consume_password_reset(&sha256_hex(token.trim()))
            .await?
            .ok_or_else(|| AppError::ValidationError("Invalid or expired reset token".to_string()))?;

        let user_id = ObjectId::parse_str(&ticket.user_id)
            .map_err(|e| AppError::InternalError(format!("재설정 티켓의 사용자 ID 오류: {}", e)))?;

        self.user_service.set_password(&user_id, password).await?;
        self.token_service.revoke_sessions(&ticket.user_id).await?;

        log::info!("비밀번호 재설정 완료 - user_id: {}", ticket.user_id);
        Ok(())
    }
}

/// 재설정 페이지 URL에 토큰을 붙입니다.
fn build_reset_link(reset_url: &str, token: &str) -> String {
    let separator = if reset_url.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", reset_url, separator, urlencoding::encode(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_reset_link_appends_token() {
        assert_eq!(
            build_reset_link("https://stash.example.com/reset", "abc-123"),
            "https://stash.example.com/reset?token=abc-123"
        );
        assert_eq!(
            build_reset_link("https://stash.example.com/reset?lang=ko", "abc"),
            "https://stash.example.com/reset?lang=ko&token=abc"
        );
    }

    struct RecordingSender {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ResetLinkSender for RecordingSender {
        async fn send_reset_link(&self, email: &str, link: &str) -> AppResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((email.to_string(), link.to_string()));
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_sender_trait_object_receives_link() {
        let recorder = Arc::new(RecordingSender { sent: Mutex::new(Vec::new()) });
        let sender: Arc<dyn ResetLinkSender> = recorder.clone();

        sender
            .send_reset_link("alice@example.com", "https://stash.example.com/reset?token=t")
            .await
            .unwrap();

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "alice@example.com");
    }

    #[actix_web::test]
    async fn test_log_sender_succeeds() {
        assert!(LogResetLinkSender
            .send_reset_link("alice@example.com", "https://stash.example.com/reset?token=t")
            .await
            .is_ok());
    }
}
