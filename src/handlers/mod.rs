//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청을 파싱/검증하고 서비스를 호출한 뒤 [`ApiResponse`](crate::domain::dto::ApiResponse)로 감싸 응답합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 서비스는 `web::Data<AppState>`로 주입되고, 현재 사용자는
//! [`CurrentIdentity`](crate::domain::models::auth::CurrentIdentity) 추출자로만 얻습니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인, 재발급, 로그아웃, 일회용 코드 교환
//! - **`oauth`**: 웹 로그인 시작과 프로바이더 콜백
//! - **`users`**: 현재 사용자 조회, 회원 탈퇴
//! - **`dev`**: 개발용 토큰 발급, 관리자 확인용 엔드포인트

pub mod auth;
pub mod oauth;
pub mod users;
pub mod dev;
