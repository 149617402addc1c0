//! # Configuration Module
//!
//! 세션 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`app_config`] - 서버, 속도 제한, 저장소, 자격 증명 서비스 설정
//! - [`security_config`] - 보안 응답 헤더와 CSP 지시어 테이블
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="127.0.0.1"
//! export PORT="8080"
//!
//! # 속도 제한 (15분당 100회)
//! export RATE_LIMIT_MAX_REQUESTS="100"
//! export RATE_LIMIT_WINDOW_MS="900000"
//! export LOGIN_RATE_LIMIT_MAX_ATTEMPTS="5"
//!
//! # 세션 저장소
//! export STORE_BACKEND="file"              # memory, file, redis
//! export STORE_FILE_PATH="./data/session_store.json"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 자격 증명 서비스
//! export CREDENTIAL_BACKEND="http"         # mock, http
//! export CREDENTIAL_SERVICE_URL="https://auth.example.com/api/v1"
//! export CREDENTIAL_TIMEOUT_SECS="10"
//! ```

pub mod app_config;
pub mod security_config;

pub use app_config::*;
pub use security_config::*;
