//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 직접 매핑되는 엔티티를 정의합니다.
//!
//! | 엔티티 | 컬렉션 | 인덱스 |
//! |--------|--------|--------|
//! | [`User`](users::user::User) | `users` | `email` (unique), `username` (unique) |
//! | [`Category`](categories::category::Category) | `categories` | `(username, order)`, `(user_id, slug)` (unique) |
//! | [`Product`](products::product::Product) | `products` | `(username, category_id, order)` |
//!
//! 모든 엔티티는 `_id`를 `Option<ObjectId>`로 가지며 삽입 전에는 `None`입니다.
//! 시간 필드는 BSON `DateTime`으로 저장됩니다.

pub mod users;
pub mod categories;
pub mod products;
