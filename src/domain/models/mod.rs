//! 도메인 모델
//!
//! 세션 관리자가 다루는 핵심 값 객체들입니다.
//!
//! - [`user`] - 사용자 신원 레코드와 역할
//! - [`token`] - 액세스/리프레시 토큰 쌍
//! - [`auth_state`] - 세션 관리자가 소유하는 인증 상태

pub mod auth_state;
pub mod token;
pub mod user;

pub use auth_state::*;
pub use token::*;
pub use user::*;
