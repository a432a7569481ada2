//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`IdentityStore`] 트레이트와 MongoDB/메모리 구현을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{IdentityStore, MongoIdentityStore};
//!
//! let identities: Arc<dyn IdentityStore> = Arc::new(MongoIdentityStore::new(&database).await?);
//! let found = identities.find_by_provider(ProviderType::Kakao, "42").await?;
//! ```

pub mod identity_repo;
pub mod memory_identity_repo;

pub use identity_repo::*;
pub use memory_identity_repo::*;
