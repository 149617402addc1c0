//! 데이터 전송 객체
//!
//! - [`request`] - HTTP 요청 DTO (validator 검증 포함)
//! - [`response`] - HTTP 응답 DTO
//! - [`credential`] - 자격 증명 서비스와의 요청/응답 계약

pub mod credential;
pub mod request;
pub mod response;

pub use credential::*;
pub use request::*;
pub use response::*;
