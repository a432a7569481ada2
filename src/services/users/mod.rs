//! 사용자 서비스 모듈
//!
//! 인증된 사용자 본인의 정보 조회와 회원 탈퇴를 제공합니다.

pub mod user_service;

pub use user_service::*;
