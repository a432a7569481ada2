//! 소셜 프로바이더 연동 모듈
//!
//! 프로바이더와 통신하는 모든 코드가 모여 있습니다.
//! 이 모듈 밖의 코드는 프로바이더별 응답 모양을 알 필요가 없습니다.
//!
//! # 구성
//!
//! - [`user_info`] - 사용자 정보 어댑터와 팩토리
//! - [`resource_client`] - 액세스 토큰으로 사용자 정보 조회
//! - [`apple_credential`] - Apple client secret(ES256) 서명
//! - [`authorization_request`] - 인가 요청 생성, Apple 요청 보정
//! - [`token_exchange`] - 인가 코드 교환
//! - [`apple_id_token`] - Apple ID 토큰 검증
//! - [`social_unlink`] - 탈퇴 시 연결 해제

pub mod user_info;
pub mod resource_client;
pub mod apple_credential;
pub mod authorization_request;
pub mod token_exchange;
pub mod apple_id_token;
pub mod social_unlink;

pub use user_info::*;
pub use resource_client::*;
pub use apple_credential::*;
pub use authorization_request::*;
pub use token_exchange::*;
pub use apple_id_token::*;
pub use social_unlink::*;
