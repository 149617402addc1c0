//! RateLimitMiddleware 요청 처리 로직
use std::net::IpAddr;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;
use crate::services::rate_limit::RateLimiter;
use crate::utils::request_utils::client_identifier;

const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const RESET_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-reset");

pub struct RateLimitMiddlewareService<S> {
    pub service: Rc<S>,
    pub limiter: Arc<RateLimiter>,
    pub trusted_proxies: Arc<Vec<IpAddr>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = self.limiter.clone();
        let identifier = client_identifier(req.request(), &self.trusted_proxies);

        Box::pin(async move {

            if !limiter.is_allowed(&identifier) {
                let retry_after_secs = limiter.retry_after_secs(&identifier);
                log::warn!(
                    "속도 제한 초과: {} {} ({}초 후 재시도)",
                    identifier,
                    req.path(),
                    retry_after_secs
                );

                let mut response = AppError::RateLimited { retry_after_secs }.error_response();
                insert_rate_headers(response.headers_mut(), &limiter, &identifier);
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let mut res = service.call(req).await?;
            insert_rate_headers(res.headers_mut(), &limiter, &identifier);
            Ok(res.map_into_left_body())
        })
    }
}

fn insert_rate_headers(headers: &mut HeaderMap, limiter: &RateLimiter, identifier: &str) {
    headers.insert(LIMIT_HEADER, HeaderValue::from(limiter.limit()));
    headers.insert(
        REMAINING_HEADER,
        HeaderValue::from(limiter.get_remaining_requests(identifier)),
    );
    headers.insert(
        RESET_HEADER,
        HeaderValue::from(limiter.get_reset_time(identifier).timestamp()),
    );
}
