//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 검증, 정리, 슬러그 생성
//! - [`token_utils`] - 랜덤 토큰과 SHA-256 다이제스트
//! - [`display_terminal`] - 시작 시 터미널 출력 포맷팅

pub mod string_utils;
pub mod token_utils;
pub mod display_terminal;
