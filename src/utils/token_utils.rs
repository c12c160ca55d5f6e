//! 토큰 생성 및 다이제스트 유틸리티

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// SHA-256 다이제스트를 소문자 16진수 문자열로 돌려줍니다.
pub fn sha256_hex(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

/// URL에 그대로 실을 수 있는 불투명 랜덤 토큰 (32바이트, base64url)
///
/// 두 개의 v4 UUID에서 무작위 바이트를 얻습니다.
pub fn random_url_token() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());

    URL_SAFE_NO_PAD.encode(bytes)
}
