pub mod contacts;
pub mod directory;
pub mod supervisor;
pub mod transfer;

use std::convert::Infallible;

use anyhow::Error;
use askama::Template;
use axum::{
    async_trait,
    extract::{FromRequest, RequestParts},
    http::{
        header::{ACCEPT, COOKIE},
        StatusCode,
    },
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum Accept {
    Unspecified,
    Html,
    Json,
}

impl Accept {
    pub fn into_repsonse<P>(self, page: P) -> Response
    where
        P: Template + Serialize,
    {
        match self {
            Accept::Unspecified | Accept::Html => Html(page.render().unwrap()).into_response(),
            Accept::Json => Json(page).into_response(),
        }
    }
}

#[async_trait]
impl<B> FromRequest<B> for Accept
where
    B: Send,
{
    type Rejection = Infallible;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        if let Some(accept) = req
            .headers()
            .get(ACCEPT)
            .and_then(|header| header.to_str().ok())
        {
            if accept.contains("text/html") {
                return Ok(Self::Html);
            } else if accept.contains("application/json") {
                return Ok(Self::Json);
            }
        }

        Ok(Self::Unspecified)
    }
}

/// Whether this browser unlocked the supervisor controls.
///
/// Deliberately just a plain cookie checked client- and server-side for UI
/// gating. This is not access control, anyone can set the flag by hand.
#[derive(Debug, Clone, Copy)]
pub struct Supervisor(pub bool);

#[async_trait]
impl<B> FromRequest<B> for Supervisor
where
    B: Send,
{
    type Rejection = Infallible;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        if let Some(cookies) = req
            .headers()
            .get(COOKIE)
            .and_then(|header| header.to_str().ok())
        {
            if cookies
                .split(';')
                .any(|cookie| cookie.trim() == "supervisor=1")
            {
                return Ok(Self(true));
            }
        }

        Ok(Self(false))
    }
}

pub fn require_supervisor(supervisor: Supervisor) -> Result<(), ServerError> {
    if supervisor.0 {
        Ok(())
    } else {
        Err(ServerError::Forbidden("Supervisor mode required"))
    }
}

pub enum ServerError {
    BadRequest(&'static str),
    Forbidden(&'static str),
    Internal(Error),
}

impl<E> From<E> for ServerError
where
    Error: From<E>,
{
    fn from(err: E) -> Self {
        Self::Internal(Error::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg).into_response(),
            Self::Internal(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
