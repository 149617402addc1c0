//! 인증 세션 서비스 모듈
//!
//! 세션 관리자와 그가 의존하는 자격 증명 서비스 계약을 제공합니다.
//!
//! # Features
//!
//! - [`AuthManager`] - 인증 상태의 단일 소유자
//! - [`CredentialService`] - 외부 인증 백엔드 계약
//! - [`HttpCredentialService`] - HTTP 인증 서버 연동
//! - [`MockCredentialService`] - 메모리 내 데모 계정
//!
//! # Security
//!
//! - 리프레시 실패 시 항상 로그아웃 상태로 수렴
//! - 로그아웃은 진행 중인 로그인/갱신 결과를 무효화
//! - 로그에는 마스킹된 이메일만 기록
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthManager, build_credential_service};
//!
//! let credentials = build_credential_service(&config.credentials, clock.clone())?;
//! let manager = AuthManager::new(store, credentials, clock)
//!     .with_request_timeout(config.credentials.request_timeout);
//! manager.check_auth_status().await;
//! ```

pub mod credential_service;
pub mod mock_credential_service;
pub mod session_manager;

pub use credential_service::*;
pub use mock_credential_service::*;
pub use session_manager::*;
