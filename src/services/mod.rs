//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 도메인별로 나뉘어 있으며, 서비스는 생성자로 의존성을 받고
//! 애플리케이션 시작 시 [`AppState`](crate::state::AppState)에서 한 번만 조립됩니다.
//!
//! - [`oauth`] - 소셜 프로바이더와의 통신
//! - [`auth`] - 세션 토큰과 로그인 흐름
//! - [`users`] - 사용자 조회와 탈퇴

pub mod oauth;
pub mod auth;
pub mod users;
