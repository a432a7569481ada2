//! # Domain Models Module
//!
//! 영속되지 않는 도메인 값들을 정의합니다.
//!
//! - [`auth`] - 요청 단위 인증 결과(`AuthContext`), 현재 사용자 추출자, 접근 규칙
//! - [`token`] - 세션 토큰 클레임과 토큰 쌍
//! - [`oauth`] - 인가 요청과 토큰 교환 응답

pub mod auth;
pub mod oauth;
pub mod token;

pub use auth::*;
pub use oauth::*;
pub use token::*;
