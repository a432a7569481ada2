//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스는 트레이트 객체(`Arc<dyn IdentityStore>`, `Arc<dyn RefreshTokenStore>`)에만 의존합니다.
//! `STORAGE_BACKEND` 설정에 따라 MongoDB 구현 또는 메모리 구현이 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::IdentityStore;
//!
//! let identity = identities.find_by_id(42).await?;
//! ```

pub mod users;
pub mod tokens;

pub use users::{IdentityStore, MemoryIdentityStore, MongoIdentityStore};
pub use tokens::{MemoryRefreshTokenStore, MongoRefreshTokenStore, RefreshTokenStore};
