//! # Domain Layer Module
//!
//! 세션 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Models  - User, AuthToken, AuthState
//! └── DTOs    - HTTP 요청/응답, 자격 증명 서비스 계약
//!      │
//!      ▼
//! Services (AuthManager, RateLimiter)
//!      │
//!      ▼
//! Storage (StoreAdapter)
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
