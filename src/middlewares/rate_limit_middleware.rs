//! 요청 속도 제한 미들웨어
//!
//! 클라이언트 IP별로 [`RateLimiter`]에 요청을 통과시키고, 한도를 넘으면
//! 핸들러를 호출하지 않고 `429 Too Many Requests`로 응답합니다.
//!
//! # 응답 헤더
//!
//! | 헤더 | 값 |
//! |------|----|
//! | `X-RateLimit-Limit` | 윈도우당 허용 요청 수 |
//! | `X-RateLimit-Remaining` | 현재 윈도우에서 남은 요청 수 |
//! | `X-RateLimit-Reset` | 윈도우 초기화 시각 (Unix 초) |
//! | `Retry-After` | 거부된 요청에만, 초기화까지 남은 초 |

use std::future::{Ready, ready};
use std::net::IpAddr;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::middlewares::rate_limit_inner::RateLimitMiddlewareService;
use crate::services::rate_limit::RateLimiter;

/// 속도 제한 미들웨어
///
/// 클라이언트 식별은 peer 주소 기준이며, 전달 헤더는
/// [`RateLimitMiddleware::with_trusted_proxies`]로 지정한 프록시에서 온 요청만 읽습니다.
///
/// ```rust,ignore
/// App::new().service(
///     web::scope("/api/v1")
///         .wrap(
///             RateLimitMiddleware::new(context.api_limiter.clone())
///                 .with_trusted_proxies(context.trusted_proxies.clone()),
///         )
///         .configure(configure_api_routes),
/// )
/// ```
pub struct RateLimitMiddleware {
    limiter: Arc<RateLimiter>,
    trusted_proxies: Arc<Vec<IpAddr>>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self {
            limiter,
            trusted_proxies: Arc::new(Vec::new()),
        }
    }

    pub fn with_trusted_proxies(mut self, proxies: Arc<Vec<IpAddr>>) -> Self {
        self.trusted_proxies = proxies;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            trusted_proxies: self.trusted_proxies.clone(),
        }))
    }
}
