//! Authentication middleware and extractors.
//!
//! Authentication is soft: [`AuthInterceptor`] never rejects a request. A
//! header that fails to verify is logged and the request continues with no
//! caller identity. Mutating routes only demand that an Authorization header
//! is present, via [`Credentials`].

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderValue},
    web,
};
use std::future::{Ready, ready};

use quill_core::domain::CallerIdentity;
use quill_core::ports::{AuthError, TokenService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Decode the caller behind an Authorization header value.
///
/// Returns `Ok(None)` when there is no header (or it is empty). The token is
/// the second space-separated segment, whatever the scheme.
pub fn identify(
    header: Option<&HeaderValue>,
    tokens: &dyn TokenService,
) -> Result<Option<CallerIdentity>, AuthError> {
    let Some(header) = header.filter(|h| !h.is_empty()) else {
        return Ok(None);
    };

    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = value
        .split(' ')
        .nth(1)
        .ok_or_else(|| AuthError::InvalidToken("Missing token".to_string()))?;

    tokens.verify(token).map(Some)
}

/// Like [`identify`], but downgrades any verification failure to "no caller".
fn resolve_caller(
    header: Option<&HeaderValue>,
    tokens: &dyn TokenService,
) -> Option<CallerIdentity> {
    match identify(header, tokens) {
        Ok(caller) => caller,
        Err(e) => {
            tracing::warn!(error = %e, "Authorization header did not verify, continuing without caller identity");
            None
        }
    }
}

/// Middleware that attaches a verified [`CallerIdentity`] to request extensions.
pub struct AuthInterceptor;

impl<S, B> Transform<S, ServiceRequest> for AuthInterceptor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthInterceptorService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthInterceptorService { service }))
    }
}

pub struct AuthInterceptorService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthInterceptorService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let caller = match req.app_data::<web::Data<AppState>>() {
            Some(state) => resolve_caller(
                req.headers().get(header::AUTHORIZATION),
                state.tokens.as_ref(),
            ),
            None => {
                tracing::error!("AppState not found in app data");
                None
            }
        };

        if let Some(caller) = caller {
            tracing::debug!(caller_id = %caller.id, "Caller identified");
            req.extensions_mut().insert(caller);
        }

        self.service.call(req)
    }
}

/// Extractor for mutating routes.
///
/// Rejects with 401 when no Authorization header is present. A present
/// header is enough: `caller` is `None` when the header did not verify.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub caller: Option<CallerIdentity>,
}

impl FromRequest for Credentials {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let has_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .is_some_and(|h| !h.is_empty());

        if !has_header {
            return ready(Err(AppError::Unauthorized));
        }

        ready(Ok(Credentials {
            caller: req.extensions().get::<CallerIdentity>().cloned(),
        }))
    }
}
