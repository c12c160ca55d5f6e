//! 스태시 백엔드
//!
//! 사용자가 카테고리별로 정리한 상품(제휴 링크 포함)을 공개 "스태시"로 보여주는 서비스입니다.
//!
//! # Features
//!
//! - **계정**: 로컬 가입/로그인, Google OAuth 2.0 로그인, 비밀번호 재설정
//! - **사용자명 조정**: 외부 계정의 표시 이름에서 유일한 사용자명 생성 (시도 횟수 제한)
//! - **JWT 인증**: 액세스/리프레시 토큰, 리프레시 회전, 로그아웃 블랙리스트
//! - **스태시**: 카테고리와 상품 CRUD, 공개 조회
//! - **MongoDB**: 사용자/카테고리/상품 영구 저장 (유니크 인덱스)
//! - **Redis**: 리프레시 세션, 토큰 블랙리스트, OAuth state, 재설정 토큰
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api/v1)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AppContainer가 조립)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
