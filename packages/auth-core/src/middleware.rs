//! Bearer-token gate middleware.
//!
//! Intercepts every inbound request except an exact-match allow-list,
//! verifies the bearer token, and stores the verified claims in request
//! extensions before the handler runs. Rejected requests never reach a
//! handler. The client always receives the same generic unauthenticated
//! response; the specific failure kind only appears in logs.

use std::collections::HashSet;
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::error::AppError;
use crate::jwt::{verify_access_token, TokenError};
use crate::security::SecurityConfig;

pub struct TokenGate {
    inner: Rc<Inner>,
}

struct Inner {
    security: SecurityConfig,
    allowlist: HashSet<String>,
}

impl TokenGate {
    /// `allowlist` paths are matched exactly and skip verification entirely.
    pub fn new<I, S>(security: SecurityConfig, allowlist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Rc::new(Inner {
                security,
                allowlist: allowlist.into_iter().map(Into::into).collect(),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGateMiddleware {
            service,
            inner: Rc::clone(&self.inner),
        }))
    }
}

pub struct TokenGateMiddleware<S> {
    service: S,
    inner: Rc<Inner>,
}

impl<S, B> Service<ServiceRequest> for TokenGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Allow-listed paths proceed unverified; these are the only paths
        // usable without a token.
        if self.inner.allowlist.contains(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let token = match bearer_token(req.headers().get(header::AUTHORIZATION)) {
            Ok(token) => token,
            Err(reason) => {
                warn!(path = %req.path(), reason, "rejecting request without usable bearer token");
                return Box::pin(async { Err(AppError::unauthorized().into()) });
            }
        };

        match verify_access_token(&token, &self.inner.security) {
            Ok(claims) => {
                // Claims go into extensions before dispatch so the
                // companion accessor can retrieve them downstream.
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            Err(e) => {
                match e {
                    TokenError::InvalidSignature => {
                        warn!(path = %req.path(), "token signature rejected; possible forgery attempt");
                    }
                    TokenError::Expired => {
                        warn!(path = %req.path(), "rejecting expired token");
                    }
                    _ => {
                        warn!(path = %req.path(), "rejecting malformed token");
                    }
                }
                Box::pin(async { Err(AppError::unauthorized().into()) })
            }
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(header_value: Option<&header::HeaderValue>) -> Result<String, &'static str> {
    let auth_value = header_value.ok_or("missing Authorization header")?;

    let auth_str = auth_value
        .to_str()
        .map_err(|_| "Authorization header is not valid UTF-8")?;

    let parts: Vec<&str> = auth_str.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err("expected Bearer authorization scheme");
    }

    Ok(parts[1].to_string())
}
