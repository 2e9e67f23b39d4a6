//! Session authentication middleware for protected routes.
//!
//! The access token is read from the `Authorization: Bearer` header or, failing
//! that, the access token cookie. Verification is delegated to a
//! [`RequestAuthorizer`] registered as app data, which in production is the
//! core [`AuthGate`]. On success an [`AuthContext`] is injected into the
//! request extensions.

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use kg_core::{
    domain::entities::{identity::AuthenticatedIdentity, user::UserRecord},
    errors::DomainResult,
    repositories::UserDirectory,
    services::{
        auth::{extract_token, AuthGate},
        session::SessionStore,
    },
};
use uuid::Uuid;

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::handlers::ApiError;

/// Authenticated user attached to a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: UserRecord,
    pub session_id: Uuid,
}

impl From<AuthenticatedIdentity> for AuthContext {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            user: identity.user,
            session_id: identity.session_id,
        }
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or(ApiError::NotLoggedIn),
        )
    }
}

/// Object-safe view of the auth gate, stored as `web::Data<dyn RequestAuthorizer>`
#[async_trait]
pub trait RequestAuthorizer: Send + Sync {
    async fn authorize(
        &self,
        authorization: Option<&str>,
        cookie: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<AuthenticatedIdentity>;
}

#[async_trait]
impl<S, U> RequestAuthorizer for AuthGate<S, U>
where
    S: SessionStore + ?Sized + 'static,
    U: UserDirectory + ?Sized + 'static,
{
    async fn authorize(
        &self,
        authorization: Option<&str>,
        cookie: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<AuthenticatedIdentity> {
        AuthGate::authorize(self, authorization, cookie, now).await
    }
}

/// Session authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authorize_request(&req).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = HttpResponse::from_error(error).map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

async fn authorize_request(req: &ServiceRequest) -> Result<AuthContext, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let cookie = req
        .cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned());

    if extract_token(authorization.as_deref(), cookie.as_deref()).is_none() {
        return Err(ApiError::NotLoggedIn);
    }

    let authorizer = req
        .app_data::<web::Data<dyn RequestAuthorizer>>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("No request authorizer registered");
            ApiError::Internal
        })?;

    let identity = authorizer
        .authorize(authorization.as_deref(), cookie.as_deref(), Utc::now())
        .await?;

    tracing::debug!(
        user_id = %identity.user.id,
        session_id = %identity.session_id,
        "Request authenticated"
    );

    Ok(identity.into())
}
