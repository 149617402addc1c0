//! 에러 처리 모듈
//!
//! 세션 서비스 전역에서 사용하는 [`AppError`]와 관련 유틸리티를 제공합니다.

pub mod errors;

pub use errors::*;
