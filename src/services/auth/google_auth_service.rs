//! # Google OAuth 2.0 인증 서비스
//!
//! Authorization Code 플로우로 Google 계정 로그인/가입을 처리합니다.
//!
//! ```text
//! GET /auth/google/login
//!   └─ state = random(32B, base64url) ──► Redis oauth_state:{state} (TTL)
//!   └─ 200 { login_url, state }
//!
//! GET /auth/google/callback?code=..&state=..
//!   1. state 소비 (한 번만 유효)
//!   2. code ──► access_token (token_uri)
//!   3. access_token ──► GoogleUserInfo (userinfo_uri)
//!   4. 계정 결정
//!      ├─ Google ID로 연결된 계정      → 로그인
//!      ├─ 같은 이메일의 Google 계정    → 로그인
//!      ├─ 같은 이메일의 로컬 계정      → 409
//!      └─ 없음 → 사용자명 조정 → 저장 (유니크 위반 시 재조정)
//! ```
//!
//! Google 클라이언트 설정이 없으면 서버는 정상 기동하고
//! 이 서비스의 모든 호출만 `ExternalServiceError`로 실패합니다.

use std::future::Future;
use std::sync::Arc;

use crate::{
    config::{AuthProvider, GoogleOAuthSettings},
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::response::{GoogleTokenResponse, OAuthLoginUrlResponse},
        entities::users::user::User,
        models::oauth::google_oauth_model::google_user::GoogleUserInfo,
    },
    repositories::{tokens::token_repository::TokenRepository, users::user_repo::UserRepository},
    services::users::username_resolver::UsernameResolver,
    utils::token_utils::random_url_token,
};

pub struct GoogleAuthService {
    settings: Option<GoogleOAuthSettings>,
    http: reqwest::Client,
    user_repo: Arc<UserRepository>,
    token_repo: Arc<TokenRepository>,
    resolver: UsernameResolver,
    persist_retries: u32,
    state_ttl_seconds: u64,
}

impl GoogleAuthService {
    pub fn new(
        settings: Option<GoogleOAuthSettings>,
        user_repo: Arc<UserRepository>,
        token_repo: Arc<TokenRepository>,
        resolver: UsernameResolver,
        persist_retries: u32,
        state_ttl_seconds: u64,
    ) -> Self {
        if settings.is_none() {
            log::warn!("Google OAuth 설정이 없습니다. Google 로그인이 비활성화됩니다.");
        }

        Self {
            settings,
            http: reqwest::Client::new(),
            user_repo,
            token_repo,
            resolver,
            persist_retries,
            state_ttl_seconds,
        }
    }

    fn settings(&self) -> AppResult<&GoogleOAuthSettings> {
        self.settings
            .as_ref()
            .ok_or_else(|| AppError::ExternalServiceError("Google login is not configured".to_string()))
    }

    /// Google 인증 페이지 URL을 만들고 state를 저장합니다.
    pub async fn get_login_url(&self) -> AppResult<OAuthLoginUrlResponse> {
        let settings = self.settings()?;
        let state = random_url_token();

        self.token_repo
            .store_oauth_state(&state, self.state_ttl_seconds)
            .await?;

        Ok(OAuthLoginUrlResponse {
            login_url: build_login_url(settings, &state),
            state,
        })
    }

    /// Authorization Code로 사용자를 인증하고 로그인할 계정을 돌려줍니다.
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> AppResult<User> {
        let settings = self.settings()?;

        if !self.token_repo.consume_oauth_state(state).await? {
            return Err(AppError::AuthenticationError("Invalid or expired OAuth state".to_string()));
        }

        let token_response = self.exchange_code_for_token(settings, auth_code).await?;
        let google_user = self.get_user_info(settings, &token_response.access_token).await?;

        let by_google_id = self.user_repo.find_by_google_id(&google_user.id).await?;
        let by_email = match by_google_id {
            Some(_) => None,
            None => self.user_repo.find_by_email(&google_user.email).await?,
        };

        match decide_google_account(by_google_id, by_email, &google_user)? {
            GoogleAccount::Existing(user) => {
                if let Some(id) = user.id.as_ref() {
                    self.user_repo.touch_last_login(id).await?;
                }

                log::info!("Google 사용자 로그인: {}", user.username);
                Ok(user)
            }
            GoogleAccount::New(candidate) => {
                log::info!("새 Google 사용자 등록: {}", google_user.email);
                self.create_google_user(google_user, &candidate).await
            }
        }
    }

    async fn exchange_code_for_token(
        &self,
        settings: &GoogleOAuthSettings,
        auth_code: &str,
    ) -> AppResult<GoogleTokenResponse> {
        let params = [
            ("code", auth_code),
            ("client_id", settings.client_id.as_str()),
            ("client_secret", settings.client_secret.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Google 토큰 교환 실패: {}", error_text);
            return Err(AppError::AuthenticationError(
                "Google rejected the authorization code".to_string(),
            ));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn get_user_info(&self, settings: &GoogleOAuthSettings, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .http
            .get(&settings.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패: {}",
                error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }

    async fn create_google_user(&self, google_user: GoogleUserInfo, candidate: &str) -> AppResult<User> {
        let user_repo = Arc::clone(&self.user_repo);

        persist_with_unique_username(&self.resolver, candidate, self.persist_retries, |username| {
            let user = User::new_oauth(
                google_user.email.trim().to_lowercase(),
                username.clone(),
                google_user.display_name_or(&username),
                AuthProvider::Google,
                google_user.id.clone(),
                google_user.picture.clone(),
            );
            let user_repo = Arc::clone(&user_repo);

            async move { user_repo.create(user).await }
        })
        .await
    }
}

/// Google 로그인으로 진행할 계정
#[derive(Debug)]
pub(crate) enum GoogleAccount {
    /// 이미 연결된 계정으로 로그인
    Existing(User),
    /// 사용자명 후보로 새 계정 생성
    New(String),
}

/// Google 사용자 정보와 기존 계정 조회 결과로 로그인할 계정을 결정합니다.
///
/// `by_google_id`가 우선하며, `by_email`은 Google ID로 찾지 못했을 때의 조회 결과입니다.
pub(crate) fn decide_google_account(
    by_google_id: Option<User>,
    by_email: Option<User>,
    google_user: &GoogleUserInfo,
) -> AppResult<GoogleAccount> {
    if !google_user.verified_email {
        return Err(AppError::AuthenticationError(
            "Google account email is not verified".to_string(),
        ));
    }

    let existing = match (by_google_id, by_email) {
        (Some(user), _) => user,
        (None, Some(user)) if user.auth_provider == AuthProvider::Google => user,
        (None, Some(_)) => {
            return Err(AppError::ConflictError(
                "This email is already registered with a password. Please sign in with email and password."
                    .to_string(),
            ));
        }
        (None, None) => {
            let candidate = google_user.username_candidate();
            if candidate.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Could not generate username from Google account".to_string(),
                ));
            }
            return Ok(GoogleAccount::New(candidate));
        }
    };

    if !existing.is_active {
        return Err(AppError::AuthorizationError("This account has been disabled".to_string()));
    }

    Ok(GoogleAccount::Existing(existing))
}

/// Google 인증 페이지 URL
fn build_login_url(settings: &GoogleOAuthSettings, state: &str) -> String {
    let params = [
        ("client_id", settings.client_id.as_str()),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("scope", "openid email profile"),
        ("response_type", "code"),
        ("access_type", "online"),
        ("prompt", "select_account"),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", settings.auth_uri, query_string)
}

/// 조정된 사용자명으로 저장을 시도합니다.
///
/// 조정과 저장 사이에 다른 요청이 같은 이름을 가져가면 저장소가
/// `UsernameConflict`를 돌려주고, 이때 조정부터 다시 수행합니다.
/// 재시도는 `retries`번까지이며 그 뒤의 충돌은 그대로 전달됩니다.
pub(crate) async fn persist_with_unique_username<F, Fut>(
    resolver: &UsernameResolver,
    candidate: &str,
    retries: u32,
    mut insert: F,
) -> AppResult<User>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = AppResult<User>>,
{
    let mut attempt = 0;

    loop {
        let username = resolver.resolve(candidate).await?;

        match insert(username).await {
            Err(AppError::UsernameConflict(taken)) if attempt < retries => {
                attempt += 1;
                log::warn!("저장 중 사용자명 '{}' 선점됨, 재조정 {}/{}", taken, attempt, retries);
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::users::username_resolver::{ExistenceCheck, UsernameLookup};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// 저장된 이름을 공유하는 메모리 저장소
    #[derive(Default)]
    struct SharedNames {
        names: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl UsernameLookup for SharedNames {
        async fn exists(&self, username: &str) -> ExistenceCheck {
            if self.names.lock().unwrap().contains(username) {
                ExistenceCheck::Found
            } else {
                ExistenceCheck::NotFound
            }
        }
    }

    fn settings() -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: "client-id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/api/v1/auth/google/callback".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
        }
    }

    fn oauth_user(username: &str) -> User {
        User::new_oauth(
            "jane@gmail.com".to_string(),
            username.to_string(),
            "Jane".to_string(),
            AuthProvider::Google,
            "g-1".to_string(),
            None,
        )
    }

    fn google_info(name: Option<&str>, email: &str, verified: bool) -> GoogleUserInfo {
        GoogleUserInfo {
            id: "g-1".to_string(),
            email: email.to_string(),
            verified_email: verified,
            name: name.map(str::to_string),
            given_name: None,
            family_name: None,
            picture: None,
        }
    }

    fn local_user(email: &str) -> User {
        User::new_local(email.to_string(), "jane".to_string(), "Jane".to_string(), "hash".to_string())
    }

    #[test]
    fn test_google_id_match_signs_in() {
        let info = google_info(Some("Jane"), "jane@gmail.com", true);

        let account = decide_google_account(Some(oauth_user("jane")), None, &info).unwrap();

        assert!(matches!(account, GoogleAccount::Existing(user) if user.username == "jane"));
    }

    #[test]
    fn test_google_account_with_same_email_signs_in() {
        let info = google_info(Some("Jane"), "jane@gmail.com", true);

        let account = decide_google_account(None, Some(oauth_user("jane_g")), &info).unwrap();

        assert!(matches!(account, GoogleAccount::Existing(user) if user.username == "jane_g"));
    }

    #[test]
    fn test_local_account_with_same_email_conflicts() {
        let info = google_info(Some("Jane"), "jane@gmail.com", true);

        let result = decide_google_account(None, Some(local_user("jane@gmail.com")), &info);

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[test]
    fn test_unverified_email_is_rejected() {
        let info = google_info(Some("Jane"), "jane@gmail.com", false);

        let result = decide_google_account(Some(oauth_user("jane")), None, &info);

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_disabled_account_is_rejected() {
        let info = google_info(Some("Jane"), "jane@gmail.com", true);
        let mut user = oauth_user("jane");
        user.is_active = false;

        let result = decide_google_account(Some(user), None, &info);

        assert!(matches!(result, Err(AppError::AuthorizationError(_))));
    }

    #[test]
    fn test_new_account_uses_username_candidate() {
        let info = google_info(Some("Jane Doe"), "jane@gmail.com", true);

        let account = decide_google_account(None, None, &info).unwrap();

        assert!(matches!(account, GoogleAccount::New(candidate) if candidate == "Jane Doe"));
    }

    #[test]
    fn test_empty_candidate_is_validation_error() {
        let info = google_info(Some("  "), "@gmail.com", true);

        let result = decide_google_account(None, None, &info);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_login_url_contains_encoded_parameters() {
        let url = build_login_url(&settings(), "abc_-123");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fv1%2Fauth%2Fgoogle%2Fcallback"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("state=abc_-123"));
    }

    #[actix_web::test]
    async fn test_persist_succeeds_without_conflict() {
        let names = Arc::new(SharedNames::default());
        let resolver = UsernameResolver::new(names.clone());

        let user = persist_with_unique_username(&resolver, "Jane Doe", 2, |username| async move {
            Ok(oauth_user(&username))
        })
        .await
        .unwrap();

        assert_eq!(user.username, "janedoe");
    }

    #[actix_web::test]
    async fn test_persist_re_resolves_after_race() {
        let names = Arc::new(SharedNames::default());
        let resolver = UsernameResolver::new(names.clone());
        let attempts = Mutex::new(Vec::new());

        let user = persist_with_unique_username(&resolver, "Jane", 2, |username| {
            attempts.lock().unwrap().push(username.clone());
            let first = attempts.lock().unwrap().len() == 1;
            let names = names.clone();

            async move {
                if first {
                    // 다른 요청이 먼저 저장한 상황
                    names.names.lock().unwrap().insert(username.clone());
                    Err(AppError::UsernameConflict(username))
                } else {
                    Ok(oauth_user(&username))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(user.username, "jane1");
        assert_eq!(*attempts.lock().unwrap(), vec!["jane".to_string(), "jane1".to_string()]);
    }

    #[actix_web::test]
    async fn test_persist_gives_up_after_retries() {
        let names = Arc::new(SharedNames::default());
        let resolver = UsernameResolver::new(names.clone());
        let calls = Mutex::new(0u32);

        let result = persist_with_unique_username(&resolver, "jane", 1, |username| {
            *calls.lock().unwrap() += 1;
            let names = names.clone();

            async move {
                names.names.lock().unwrap().insert(username.clone());
                Err(AppError::UsernameConflict(username))
            }
        })
        .await;

        assert!(matches!(result, Err(AppError::UsernameConflict(_))));
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_persist_propagates_resolution_error() {
        let names = Arc::new(SharedNames::default());
        let resolver = UsernameResolver::new(names);

        let result = persist_with_unique_username(&resolver, "   ", 2, |username| async move {
            Ok(oauth_user(&username))
        })
        .await;

        assert!(matches!(result, Err(AppError::UsernameResolution(_))));
    }

    #[actix_web::test]
    async fn test_other_errors_are_not_retried() {
        let names = Arc::new(SharedNames::default());
        let resolver = UsernameResolver::new(names);
        let calls = Mutex::new(0u32);

        let result = persist_with_unique_username(&resolver, "jane", 3, |_username| {
            *calls.lock().unwrap() += 1;
            async move { Err(AppError::ConflictError("This email is already registered".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
