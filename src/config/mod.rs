//! # Configuration Module
//!
//! 인증 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소 백엔드 관련 설정
//! - [`auth_config`] - JWT, 소셜 프로바이더, Apple 키 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//! 개발용 토큰 발급 엔드포인트는 개발/테스트 환경에서만 응답합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - Apple 키처럼 잘못되면 요청마다 실패하는 설정은 기동 시점에 실패
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let host = ServerConfig::host();
//! let port = ServerConfig::port();
//!
//! let secret = JwtConfig::secret();
//! let access_validity = JwtConfig::access_token_validity();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # 저장소
//! export STORAGE_BACKEND="mongo"   # mongo, memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="federated_auth"
//! export REDIS_URL="redis://127.0.0.1:6379"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 웹 로그인 완료 후 프론트엔드 주소
//! export OAUTH2_REDIRECT_URI="https://app.example.com/oauth/callback"
//! export OAUTH2_ALLOWED_REDIRECT_URIS="https://app.example.com/oauth/callback,myapp://oauth"
//! ```
//!
//! ## Spring과의 비교
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Configuration` | `pub struct Config` |
//! | `@Value("${property}")` | `env::var("PROPERTY")` |
//! | `@Profile("dev")` | `Environment::Development` |
//! | `application.yml` | `.env` 파일 |
//! | `ClientRegistration` | [`ClientRegistration`] |

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
