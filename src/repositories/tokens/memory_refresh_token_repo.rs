use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::DateTime;

use super::RefreshTokenStore;
use crate::domain::entities::tokens::RefreshToken;
use crate::errors::{AppError, AppResult};

/// 메모리 리프레시 토큰 저장소
#[derive(Default)]
pub struct MemoryRefreshTokenStore {
    rows: Mutex<HashMap<i64, RefreshToken>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<i64, RefreshToken>>> {
        self.rows
            .lock()
            .map_err(|_| AppError::InternalError("메모리 저장소 잠금 실패".to_string()))
    }

    /// 사용자의 현재 행
    pub fn find_by_identity(&self, identity_id: i64) -> Option<RefreshToken> {
        self.lock().ok()?.get(&identity_id).cloned()
    }

    pub fn count(&self) -> usize {
        self.lock().map(|rows| rows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn save(&self, identity_id: i64, token: &str, expires_at: DateTime) -> AppResult<()> {
        let mut rows = self.lock()?;
        let row = match rows.remove(&identity_id) {
            Some(mut existing) => {
                existing.token = token.to_string();
                existing.expires_at = expires_at;
                existing.updated_at = DateTime::now();
                existing
            }
            None => RefreshToken::new(identity_id, token.to_string(), expires_at),
        };
        rows.insert(identity_id, row);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.lock()?.values().find(|row| row.token == token).cloned())
    }

    async fn delete_by_identity(&self, identity_id: i64) -> AppResult<()> {
        self.lock()?.remove(&identity_id);
        Ok(())
    }
}
