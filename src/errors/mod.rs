//! 에러 타입 모음
//!
//! - [`AuthError`]: 클라이언트에게 코드로 노출되는 인증 에러 분류
//! - [`AppError`]: 핸들러가 반환하는 전역 에러 (`ResponseError` 구현)
//! - [`AppleConfigurationError`]: 기동을 중단시키는 Apple 키 설정 오류

pub mod auth_error;
pub mod errors;

pub use auth_error::AuthError;
pub use errors::*;
