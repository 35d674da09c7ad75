//! Request tracing middleware.
//!
//! Each request runs inside a [`TraceId`] scope. A well-formed UUID in the
//! incoming `trace-id` header is reused so callers can correlate their own
//! logs; anything else gets a fresh identifier. The identifier is echoed on
//! every response.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap the app with `Trace`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use portal::middleware::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let incoming = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let trace_id = TraceId::adopt_or_generate(incoming);
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = %req.path()
        );
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(
            trace_id,
            async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, %trace_id, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
            .instrument(span),
        ))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::{ApiResult, Error as DomainError};

    fn header_of(res: &ServiceResponse) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned()
    }

    async fn echo_current() -> HttpResponse {
        let id = TraceId::current().expect("trace id in scope");
        HttpResponse::Ok().body(id.to_string())
    }

    #[actix_web::test]
    async fn handler_sees_the_echoed_identifier() {
        let app = test::init_service(App::new().wrap(Trace).route("/", web::get().to(echo_current)))
            .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = header_of(&res);
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), header);
    }

    #[rstest]
    #[case(Some("6c1f0a0e-8f7a-4c39-9a55-0d9cf3c1b2aa"), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    #[actix_web::test]
    async fn incoming_identifier_is_adopted_when_valid(
        #[case] incoming: Option<&str>,
        #[case] adopted: bool,
    ) {
        let app = test::init_service(App::new().wrap(Trace).route("/", web::get().to(echo_current)))
            .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = incoming {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let header = header_of(&res);
        assert_eq!(Some(header.as_str()) == incoming, adopted);
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn errors_carry_the_request_identifier() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async { ApiResult::<HttpResponse>::Err(DomainError::internal("boom")) }),
        ))
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = header_of(&res);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(header.as_str()));
        assert_eq!(body.message(), "Internal server error");
    }
}
