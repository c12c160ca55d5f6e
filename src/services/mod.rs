//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리와 설정 값을 생성자로 받으며, 조립은
//! [`AppContainer`](crate::core::container::AppContainer)가 한 곳에서 담당합니다.
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | `users` | 로컬 계정, 프로필, 사용자명 조정 |
//! | `auth` | JWT 토큰, Google OAuth, 비밀번호 재설정 |
//! | `categories` | 스태시 카테고리 |
//! | `products` | 카테고리 안의 상품 |

pub mod auth;
pub mod categories;
pub mod products;
pub mod users;
