//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! MongoDB 컬렉션별 리포지토리와 Redis 기반 토큰 저장소를 제공합니다.
//! 모든 리포지토리는 조립 루트에서 한 번 생성되어 `Arc`로 서비스에 공유됩니다.
//!
//! | 리포지토리 | 저장소 | 내용 |
//! |------------|--------|------|
//! | [`UserRepository`](users::user_repo::UserRepository) | MongoDB `users` | 계정, 사용자명 존재 확인 |
//! | [`CategoryRepository`](categories::category_repo::CategoryRepository) | MongoDB `categories` | 스태시 카테고리 |
//! | [`ProductRepository`](products::product_repo::ProductRepository) | MongoDB `products` | 상품 |
//! | [`TokenRepository`](tokens::token_repository::TokenRepository) | Redis | 리프레시 세션, 블랙리스트, OAuth state, 재설정 토큰 |

pub mod users;
pub mod categories;
pub mod products;
pub mod tokens;
