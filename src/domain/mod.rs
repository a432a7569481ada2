//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - MongoDB에 저장되는 사용자, 리프레시 토큰
//! ├── DTOs          - API 요청/응답 계약
//! └── Models        - 인증 결과, 토큰 클레임, OAuth 요청/응답
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Caching, DB)
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Entity` | [`entities`] | 영속 객체 |
//! | `@RequestBody` / `@ResponseBody` | [`dto`] | API 계약 정의 |
//! | `SecurityContext` | [`models::auth::AuthContext`] | 요청 단위 인증 결과 |

pub mod entities;
pub mod dto;
pub mod models;
