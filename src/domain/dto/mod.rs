//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! Spring Framework의 `@RequestBody`, `@ResponseBody`와 동일한 역할을 수행합니다.
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@RequestBody` | `*Request` | HTTP 요청 본문 매핑 |
//! | `@ResponseBody` | `*Response` | HTTP 응답 본문 매핑 |
//! | `@Valid` | `validator` crate | 입력값 유효성 검증 |
//! | `@JsonProperty` | `serde` annotations | JSON 필드 매핑 |
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── tokens/     # 로그인, 재발급, 코드 교환 요청/응답 + ApiResponse 래퍼
//! └── users/      # 현재 사용자 응답
//! ```
//!
//! 모든 응답은 [`ApiResponse`]로 감싸며, 실패 시 본문은 항상
//! `{"success": false, "error": {"code", "message"}}` 형식입니다.

pub mod tokens;
pub mod users;

pub use tokens::*;
pub use users::*;
