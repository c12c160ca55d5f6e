//! # 고유 사용자명 조정 (Username Reconciliation)
//!
//! 외부 ID 프로바이더(Google 등)가 넘겨준 표시 이름이나 이메일 로컬 파트로부터
//! 기존 계정과 겹치지 않는 사용자명을 만들어 냅니다.
//!
//! ## 알고리즘
//!
//! ```text
//! "  Jane Doe "  ──normalize──►  "janedoe"
//!
//! exists("janedoe")   → Found
//! exists("janedoe1")  → Found
//! exists("janedoe2")  → NotFound   ⇒ "janedoe2"
//! ```
//!
//! 1. 후보 이름을 소문자로 바꾸고 모든 공백을 제거합니다.
//! 2. 정규화된 이름부터 존재 여부를 확인합니다.
//! 3. 충돌하면 `정규화 이름 + 카운터`(1, 2, ..., 10, ...)로 다시 확인합니다.
//! 4. 조회 자체가 실패하면 재시도 없이 즉시 실패합니다.
//!
//! 후보 열 `name, name1, name2, ...`은 서로 겹치지 않으므로 저장소 스냅샷이
//! 고정되어 있으면 반드시 끝납니다. 다만 저장소가 모든 접미사를 점유하는
//! 병적인 경우를 막기 위해 `max_attempts`로 조회 횟수를 제한합니다.
//!
//! ## 동시성
//!
//! 각 조회는 직전 결과에 의존하므로 한 번에 하나씩 순차적으로 `await`합니다.
//! 조정 결과는 저장과 원자적으로 묶이지 않으므로 두 요청이 같은 이름을 동시에
//! 고를 수 있습니다. 최종 판정은 `users.username` 유니크 인덱스가 내리며,
//! 호출자는 저장 시 [`AppError::UsernameConflict`](crate::core::errors::AppError)를
//! 받으면 조정을 다시 수행합니다.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// 기본 최대 조회 횟수
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// 사용자명 존재 확인 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistenceCheck {
    /// 해당 이름을 쓰는 사용자가 있음
    Found,
    /// 해당 이름을 쓰는 사용자가 없음
    NotFound,
    /// 부재가 아닌 이유로 조회가 실패함
    Error(String),
}

/// 사용자명 존재 확인 협력자
///
/// 대소문자를 구분하지 않는 동등 비교여야 합니다.
/// MongoDB 구현은 [`UserRepository`](crate::repositories::users::user_repo::UserRepository)에 있습니다.
#[async_trait]
pub trait UsernameLookup: Send + Sync {
    async fn exists(&self, username: &str) -> ExistenceCheck;
}

/// 사용자명 조정 실패
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameResolutionError {
    /// 정규화 후 후보 이름이 비어 있음
    #[error("Could not derive a username from an empty candidate")]
    EmptyCandidate,

    /// 존재 확인 조회 자체가 실패함
    #[error("Username lookup failed: {0}")]
    ExternalLookupFailure(String),

    /// 최대 조회 횟수 안에 사용 가능한 이름을 찾지 못함
    #[error("No free username for '{candidate}' after {attempts} attempts")]
    ResolutionExhausted { candidate: String, attempts: u32 },
}

/// 후보 이름 정규화: 소문자화 + 모든 공백 제거
pub fn normalize_candidate(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `counter`번째 후보 이름. 0이면 접미사가 없습니다.
fn attempt_name(normalized: &str, counter: u32) -> String {
    if counter == 0 {
        normalized.to_string()
    } else {
        format!("{}{}", normalized, counter)
    }
}

/// 고유 사용자명 조정기
///
/// 상태를 갖지 않으며 호출 간 캐시도 없습니다.
/// 같은 저장소 상태에 대해 같은 후보는 항상 같은 결과를 돌려줍니다.
#[derive(Clone)]
pub struct UsernameResolver {
    lookup: Arc<dyn UsernameLookup>,
    max_attempts: u32,
}

impl UsernameResolver {
    pub fn new(lookup: Arc<dyn UsernameLookup>) -> Self {
        Self::with_max_attempts(lookup, DEFAULT_MAX_ATTEMPTS)
    }

    /// `max_attempts`는 최소 1로 보정됩니다.
    pub fn with_max_attempts(lookup: Arc<dyn UsernameLookup>, max_attempts: u32) -> Self {
        Self {
            lookup,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 후보 이름에서 기존 사용자와 겹치지 않는 사용자명을 찾습니다.
    ///
    /// # Errors
    ///
    /// * `EmptyCandidate` - 정규화 결과가 빈 문자열
    /// * `ExternalLookupFailure` - 존재 확인 조회 실패 (추가 조회 없이 즉시 반환)
    /// * `ResolutionExhausted` - `max_attempts`번 조회했지만 모두 충돌
    pub async fn resolve(&self, candidate: &str) -> Result<String, UsernameResolutionError> {
        let normalized = normalize_candidate(candidate);
        if normalized.is_empty() {
            return Err(UsernameResolutionError::EmptyCandidate);
        }

        for counter in 0..self.max_attempts {
            let attempt = attempt_name(&normalized, counter);

            match self.lookup.exists(&attempt).await {
                ExistenceCheck::NotFound => {
                    if counter > 0 {
                        log::info!("사용자명 '{}' 충돌, '{}'로 조정됨", normalized, attempt);
                    }
                    return Ok(attempt);
                }
                ExistenceCheck::Found => {
                    log::debug!("사용자명 충돌: {}", attempt);
                }
                ExistenceCheck::Error(reason) => {
                    log::error!("사용자명 존재 확인 실패 ({}): {}", attempt, reason);
                    return Err(UsernameResolutionError::ExternalLookupFailure(reason));
                }
            }
        }

        log::warn!(
            "사용자명 조정 실패: '{}' 후보 {}개 모두 사용 중",
            normalized,
            self.max_attempts
        );

        Err(UsernameResolutionError::ResolutionExhausted {
            candidate: normalized,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// 메모리 기반 조회기. 호출된 이름을 순서대로 기록합니다.
    struct InMemoryLookup {
        taken: HashSet<String>,
        failing: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl InMemoryLookup {
        fn with_taken(names: &[&str]) -> Self {
            Self {
                taken: names.iter().map(|n| n.to_string()).collect(),
                failing: HashSet::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, name: &str) -> Self {
            self.failing.insert(name.to_string());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UsernameLookup for InMemoryLookup {
        async fn exists(&self, username: &str) -> ExistenceCheck {
            self.calls.lock().unwrap().push(username.to_string());

            if self.failing.contains(username) {
                ExistenceCheck::Error("connection reset".to_string())
            } else if self.taken.contains(&username.to_lowercase()) {
                ExistenceCheck::Found
            } else {
                ExistenceCheck::NotFound
            }
        }
    }

    fn resolver(lookup: &Arc<InMemoryLookup>) -> UsernameResolver {
        UsernameResolver::new(lookup.clone())
    }

    #[test]
    fn test_normalize_candidate() {
        assert_eq!(normalize_candidate("  Jane Doe "), "janedoe");
        assert_eq!(normalize_candidate("ALICE"), "alice");
        assert_eq!(normalize_candidate("a\tb\nc"), "abc");
        assert_eq!(normalize_candidate("   "), "");
    }

    #[actix_web::test]
    async fn test_free_candidate_is_returned_unchanged() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&[]));

        let username = resolver(&lookup).resolve("alice").await.unwrap();

        assert_eq!(username, "alice");
        assert_eq!(lookup.calls(), vec!["alice"]);
    }

    #[actix_web::test]
    async fn test_first_collision_appends_one() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&["alice"]));

        let username = resolver(&lookup).resolve("alice").await.unwrap();

        assert_eq!(username, "alice1");
        assert_eq!(lookup.calls(), vec!["alice", "alice1"]);
    }

    #[actix_web::test]
    async fn test_suffix_continues_past_single_digit() {
        let mut taken = vec!["bob".to_string()];
        taken.extend((1..=9).map(|i| format!("bob{}", i)));
        let taken_refs: Vec<&str> = taken.iter().map(String::as_str).collect();
        let lookup = Arc::new(InMemoryLookup::with_taken(&taken_refs));

        let username = resolver(&lookup).resolve("bob").await.unwrap();

        assert_eq!(username, "bob10");
        assert_eq!(lookup.calls().len(), 11);
    }

    #[actix_web::test]
    async fn test_lookup_error_on_first_call_stops_immediately() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&[]).failing_on("alice"));

        let err = resolver(&lookup).resolve("alice").await.unwrap_err();

        assert_eq!(
            err,
            UsernameResolutionError::ExternalLookupFailure("connection reset".to_string())
        );
        assert_eq!(lookup.calls(), vec!["alice"]);
    }

    #[actix_web::test]
    async fn test_lookup_error_mid_probe_is_not_retried() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&["alice"]).failing_on("alice1"));

        let err = resolver(&lookup).resolve("alice").await.unwrap_err();

        assert!(matches!(err, UsernameResolutionError::ExternalLookupFailure(_)));
        assert_eq!(lookup.calls(), vec!["alice", "alice1"]);
    }

    #[actix_web::test]
    async fn test_whitespace_and_case_are_normalized_before_lookup() {
        let messy = Arc::new(InMemoryLookup::with_taken(&["janedoe"]));
        let clean = Arc::new(InMemoryLookup::with_taken(&["janedoe"]));

        let from_messy = resolver(&messy).resolve("  Jane Doe ").await.unwrap();
        let from_clean = resolver(&clean).resolve("janedoe").await.unwrap();

        assert_eq!(from_messy, "janedoe1");
        assert_eq!(from_messy, from_clean);
        assert_eq!(messy.calls(), clean.calls());
    }

    #[actix_web::test]
    async fn test_repeated_calls_against_same_store_agree() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&["carol", "carol1"]));
        let resolver = resolver(&lookup);

        let first = resolver.resolve("Carol").await.unwrap();
        let second = resolver.resolve("Carol").await.unwrap();

        assert_eq!(first, "carol2");
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn test_empty_candidate_is_rejected_without_lookup() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&[]));

        let err = resolver(&lookup).resolve(" \t ").await.unwrap_err();

        assert_eq!(err, UsernameResolutionError::EmptyCandidate);
        assert!(lookup.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_attempt_limit_yields_exhausted() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&["dave", "dave1", "dave2"]));
        let resolver = UsernameResolver::with_max_attempts(lookup.clone(), 3);

        let err = resolver.resolve("dave").await.unwrap_err();

        assert_eq!(
            err,
            UsernameResolutionError::ResolutionExhausted {
                candidate: "dave".to_string(),
                attempts: 3,
            }
        );
        assert_eq!(lookup.calls(), vec!["dave", "dave1", "dave2"]);
    }

    #[test]
    fn test_zero_max_attempts_is_clamped() {
        let lookup = Arc::new(InMemoryLookup::with_taken(&[]));
        let resolver = UsernameResolver::with_max_attempts(lookup, 0);

        assert_eq!(resolver.max_attempts(), 1);
    }
}
