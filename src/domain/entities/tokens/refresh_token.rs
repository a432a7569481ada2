//! 리프레시 토큰 엔티티
//!
//! 사용자당 하나의 행만 존재합니다. 문서의 `_id`가 곧 사용자 ID이므로
//! 같은 사용자에 대한 두 번째 행은 저장소 수준에서 만들어질 수 없습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    #[serde(rename = "_id")]
    pub identity_id: i64,
    pub token: String,
    pub expires_at: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl RefreshToken {
    pub fn new(identity_id: i64, token: String, expires_at: DateTime) -> Self {
        let now = DateTime::now();
        Self {
            identity_id,
            token,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// 저장된 만료 시각이 지났는지 여부
    pub fn is_expired(&self) -> bool {
        self.expires_at.timestamp_millis() <= DateTime::now().timestamp_millis()
    }
}
