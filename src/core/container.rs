//! # 애플리케이션 조립 루트
//!
//! 모든 리포지토리와 서비스를 한 곳에서 생성자 주입으로 연결합니다.
//! 설정은 여기서 한 번만 읽어 값으로 넘기며, 서비스는 전역 상태를 참조하지 않습니다.
//!
//! ```text
//! Database ─┬─► UserRepository ─┬─► UserService
//!           ├─► CategoryRepo    ├─► UsernameResolver ─► GoogleAuthService
//!           └─► ProductRepo     ├─► CategoryService / ProductService
//! Redis ────► TokenRepository ──┴─► TokenService ─► PasswordResetService
//! ```
//!
//! 완성된 컨테이너는 `web::Data` 핸들을 들고 있으며 [`AppContainer::configure`]로
//! actix 앱에 등록됩니다. 워커마다 `App`이 만들어져도 같은 인스턴스를 공유합니다.

use std::sync::Arc;

use actix_web::web;

use crate::{
    caching::redis::RedisClient,
    config::{
        GoogleOAuthConfig, JwtConfig, OAuthConfig, PasswordConfig, PasswordResetConfig, UsernameConfig,
    },
    core::errors::AppResult,
    db::Database,
    repositories::{
        categories::category_repo::CategoryRepository, products::product_repo::ProductRepository,
        tokens::token_repository::TokenRepository, users::user_repo::UserRepository,
    },
    services::{
        auth::{GoogleAuthService, JwtCodec, LogResetLinkSender, PasswordResetService, TokenService},
        categories::CategoryService,
        products::ProductService,
        users::{UserService, UsernameLookup, UsernameResolver},
    },
    utils::display_terminal::{
        print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
    },
};

#[derive(Clone)]
pub struct AppContainer {
    pub user_service: web::Data<UserService>,
    pub token_service: web::Data<TokenService>,
    pub google_auth_service: web::Data<GoogleAuthService>,
    pub password_reset_service: web::Data<PasswordResetService>,
    pub category_service: web::Data<CategoryService>,
    pub product_service: web::Data<ProductService>,
}

impl AppContainer {
    /// 저장소 연결을 받아 전체 컴포넌트를 조립하고 인덱스를 준비합니다.
    pub async fn build(database: Arc<Database>, redis: Arc<RedisClient>) -> AppResult<Self> {
        print_boxed_title("Stash Backend Container");

        print_step_start(1, "Repositories");
        let user_repo = Arc::new(UserRepository::new(database.clone()));
        print_sub_task("UserRepository", "ready");
        let category_repo = Arc::new(CategoryRepository::new(database.clone()));
        print_sub_task("CategoryRepository", "ready");
        let product_repo = Arc::new(ProductRepository::new(database));
        print_sub_task("ProductRepository", "ready");
        let token_repo = Arc::new(TokenRepository::new(redis));
        print_sub_task("TokenRepository", "ready");
        print_step_complete(1, "Repositories", 4);

        print_step_start(2, "Indexes");
        user_repo.create_indexes().await?;
        print_sub_task("users", "email_unique, username_unique");
        category_repo.create_indexes().await?;
        print_sub_task("categories", "username_order, user_slug_unique");
        product_repo.create_indexes().await?;
        print_sub_task("products", "username_category_order, username_created_at_desc");
        print_step_complete(2, "Indexes", 3);

        print_step_start(3, "Services");
        let user_service = Arc::new(UserService::new(user_repo.clone(), PasswordConfig::bcrypt_cost()));
        print_sub_task("UserService", "ready");

        let token_service = Arc::new(TokenService::new(
            JwtCodec::new(JwtConfig::load()),
            token_repo.clone(),
            user_repo.clone(),
        ));
        print_sub_task("TokenService", "ready");

        let lookup: Arc<dyn UsernameLookup> = user_repo.clone();
        let resolver = UsernameResolver::with_max_attempts(lookup, UsernameConfig::max_attempts());
        let google_auth_service = Arc::new(GoogleAuthService::new(
            GoogleOAuthConfig::load(),
            user_repo.clone(),
            token_repo.clone(),
            resolver,
            UsernameConfig::persist_retries(),
            minutes_to_seconds(OAuthConfig::session_timeout_minutes()),
        ));
        print_sub_task("GoogleAuthService", "ready");

        let password_reset_service = Arc::new(PasswordResetService::new(
            user_repo.clone(),
            user_service.clone(),
            token_repo,
            token_service.clone(),
            Arc::new(LogResetLinkSender),
            minutes_to_seconds(PasswordResetConfig::ttl_minutes()),
            PasswordResetConfig::reset_url(),
        ));
        print_sub_task("PasswordResetService", "ready");

        let category_service = Arc::new(CategoryService::new(
            category_repo.clone(),
            product_repo.clone(),
            user_repo.clone(),
        ));
        print_sub_task("CategoryService", "ready");

        let product_service = Arc::new(ProductService::new(product_repo, category_repo, user_repo));
        print_sub_task("ProductService", "ready");
        print_step_complete(3, "Services", 6);

        print_final_summary(4, 6);

        Ok(Self {
            user_service: web::Data::from(user_service),
            token_service: web::Data::from(token_service),
            google_auth_service: web::Data::from(google_auth_service),
            password_reset_service: web::Data::from(password_reset_service),
            category_service: web::Data::from(category_service),
            product_service: web::Data::from(product_service),
        })
    }

    /// 서비스 핸들을 actix 앱 데이터로 등록합니다.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.user_service.clone())
            .app_data(self.token_service.clone())
            .app_data(self.google_auth_service.clone())
            .app_data(self.password_reset_service.clone())
            .app_data(self.category_service.clone())
            .app_data(self.product_service.clone());
    }
}

/// 분 단위 설정을 Redis TTL 초로 바꿉니다. 최소 1분입니다.
fn minutes_to_seconds(minutes: i64) -> u64 {
    (minutes.max(1) as u64) * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_seconds() {
        assert_eq!(minutes_to_seconds(10), 600);
        assert_eq!(minutes_to_seconds(0), 60);
        assert_eq!(minutes_to_seconds(-5), 60);
    }
}
