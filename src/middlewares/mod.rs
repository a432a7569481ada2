//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 인증/인가를 담당합니다.
//!
//! ```text
//! 요청 ─▶ AuthenticationFilter ─▶ (스코프) RequireAuth ─▶ 핸들러(CurrentIdentity)
//!           │                        │
//!           └ AuthContext 기록        └ 주체 없음: AuthenticationFailureResponder
//!                                       역할 불일치: A002
//! ```
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(AuthenticationFilter::new(state.token_provider.clone()))
//!     .service(
//!         web::scope("/api/admin")
//!             .wrap(RequireAuth::role("ROLE_ADMIN"))
//!             .route("/ping", web::get().to(admin_ping)),
//!     )
//! ```

pub mod authentication_filter;
pub mod failure_responder;
pub mod require_auth;

pub use authentication_filter::AuthenticationFilter;
pub use failure_responder::AuthenticationFailureResponder;
pub use require_auth::RequireAuth;
