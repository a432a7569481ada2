//! # OAuth Domain Models Module
//!
//! 웹 인가 코드 흐름에서 오가는 값들을 정의합니다.
//!
//! ```text
//! GET /oauth2/authorize/{provider}
//!   └─ OAuth2AuthorizationRequest ──(302)──▶ 프로바이더 인가 화면
//!
//! GET|POST /api/auth/callback/{provider}?code=...&state=...
//!   └─ 토큰 교환 ──▶ OAuth2AccessTokenResponse
//! ```
//!
//! ## Spring Security OAuth2와의 비교
//!
//! | Spring Security | 이 모듈 |
//! |-----------------|---------|
//! | `OAuth2AuthorizationRequest` | [`OAuth2AuthorizationRequest`] |
//! | `OAuth2AccessTokenResponse` | [`OAuth2AccessTokenResponse`] |
//! | `OAuth2AuthorizationRequest.from(..)` | [`OAuth2AuthorizationRequest::from`] |

pub mod authorization_request;
pub mod token_response;

pub use authorization_request::*;
pub use token_response::*;
