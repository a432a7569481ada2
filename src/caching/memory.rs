//! 프로세스 메모리 기반 임시 저장소
//!
//! Redis 없이 서버를 띄울 때(`STORAGE_BACKEND=memory`)와 테스트에서 사용합니다.
//! 만료된 항목은 읽을 때 지워집니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::EphemeralStore;
use crate::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryEphemeralStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryEphemeralStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, (String, Instant)>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::InternalError("메모리 저장소 잠금 실패".to_string()))
    }
}

#[async_trait]
impl EphemeralStore for MemoryEphemeralStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AppResult<()> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key.to_string(), (value, now + ttl));
        Ok(())
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.lock()?;
        Ok(entries
            .remove(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value))
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_take_consumes_once() {
        let store = MemoryEphemeralStore::new();
        store.put("k", "v".to_string(), Duration::from_secs(30)).await.unwrap();

        assert_eq!(store.take("k").await.unwrap().as_deref(), Some("v"));
        assert!(store.take("k").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_expired_entry_is_not_returned() {
        let store = MemoryEphemeralStore::new();
        store.put("k", "v".to_string(), Duration::from_millis(0)).await.unwrap();

        assert!(store.take("k").await.unwrap().is_none());
    }
}
