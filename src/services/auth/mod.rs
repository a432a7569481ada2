//! 인증 서비스 모듈
//!
//! 세션 토큰 발급/검증과 두 가지 로그인 경로를 담당합니다.
//!
//! # 구성
//!
//! - [`token_provider`] - HMAC-SHA256 액세스/리프레시 토큰
//! - [`registration`] - 프로바이더 사용자 → 우리 사용자 (신규 가입 포함)
//! - [`auth_service`] - 토큰 로그인, 재발급, 로그아웃, 일회용 코드 교환
//! - [`oauth_login_service`] - 웹 인가 코드 흐름 (authorize / callback)
//!
//! # Examples
//!
//! ```rust,ignore
//! let response = auth_service.login(ProviderType::Kakao, &request.access_token).await?;
//! let reissued = auth_service.reissue(&response.refresh_token).await?;
//! ```

pub mod token_provider;
pub mod registration;
pub mod auth_service;
pub mod oauth_login_service;

pub use token_provider::*;
pub use registration::*;
pub use auth_service::*;
pub use oauth_login_service::*;
