//! Users Entity Module
//!
//! 소셜 로그인으로 생성되는 사용자(Identity) 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{Identity, NewIdentity};
//!
//! let identity = Identity::create(next_id, NewIdentity {
//!     provider_type: ProviderType::Kakao,
//!     provider_subject_id: "42".to_string(),
//!     nickname: "파란토끼#1234".to_string(),
//!     email: None,
//!     profile_image_url: Some(default_image),
//! });
//! ```

pub mod identity;

pub use identity::*;
