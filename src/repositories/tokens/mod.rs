//! 리프레시 토큰 리포지토리 모듈
//!
//! # Features
//!
//! - **사용자당 한 행**: 저장은 사용자 ID 기준 upsert
//! - **토큰 조회**: `token` 유니크 인덱스로 재발급 요청의 토큰을 바로 찾음
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::repositories::tokens::{MongoRefreshTokenStore, RefreshTokenStore};
//!
//! let store = MongoRefreshTokenStore::new(&database).await?;
//! store.save(identity.id, &refresh_token, expires_at).await?;
//! let row = store.find_by_token(&refresh_token).await?;
//! ```

pub mod refresh_token_repo;
pub mod memory_refresh_token_repo;

pub use refresh_token_repo::*;
pub use memory_refresh_token_repo::*;
