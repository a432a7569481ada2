//! # Entities Module
//!
//! MongoDB에 영속되는 도메인 엔티티를 정의합니다.
//!
//! ## 구성
//!
//! - [`users`] - 소셜 계정 하나에 대응하는 [`Identity`](users::Identity)
//! - [`tokens`] - 사용자당 하나만 존재하는 [`RefreshToken`](tokens::RefreshToken)
//!
//! ## 컬렉션 설계
//!
//! | 컬렉션 | `_id` | 인덱스 |
//! |--------|-------|--------|
//! | `identities` | 숫자 ID | `(provider_type, provider_subject_id)` 유니크 |
//! | `refresh_tokens` | 사용자 ID | `token` 유니크 |
//! | `counters` | 시퀀스 이름 | - |
//!
//! 리프레시 토큰 행의 `_id`를 사용자 ID로 두어 "사용자당 한 행" 불변식을
//! 저장소가 직접 보장하도록 했습니다. 로그인과 재발급은 행을 교체(upsert)할 뿐 추가하지 않습니다.
//!
//! ## 주의사항
//!
//! - **엔티티 간 참조**: 직접 포함하지 않고 ID로만 참조
//! - **시간 타입**: `bson::DateTime`을 사용하여 MongoDB 날짜 타입으로 저장

pub mod users;
pub mod tokens;

pub use users::*;
pub use tokens::*;
