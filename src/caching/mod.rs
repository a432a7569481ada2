//! 캐싱 계층 모듈
//!
//! 웹 로그인 흐름에서 잠깐만 필요한 상태를 TTL과 함께 보관합니다.
//!
//! | 저장소 | 키 | TTL | 용도 |
//! |--------|----|-----|------|
//! | [`AuthorizationRequestRepository`] | `oauth2:auth_request:{state}` | 180초 | 인가 요청 + 돌아갈 주소 |
//! | [`OAuthCodeCache`] | `oauth2:code:{code}` | 30초 | 로그인 결과 토큰 쌍 (1회용) |
//!
//! 두 저장소 모두 [`EphemeralStore`] 위에서 동작하며,
//! 운영에서는 [`redis::RedisClient`], 로컬/테스트에서는 [`memory::MemoryEphemeralStore`]를 사용합니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
pub mod memory;
pub mod authorization_request_repository;
pub mod oauth_code_cache;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppResult;

pub use authorization_request_repository::*;
pub use memory::MemoryEphemeralStore;
pub use oauth_code_cache::*;

/// TTL이 있는 문자열 키-값 저장소
///
/// `take`는 읽기와 삭제를 한 번에 수행하여, 같은 값을 두 번 꺼낼 수 없습니다.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AppResult<()>;

    async fn take(&self, key: &str) -> AppResult<Option<String>>;

    async fn remove(&self, key: &str) -> AppResult<()>;
}
