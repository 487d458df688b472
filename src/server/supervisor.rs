use axum::{
    extract::{Extension, Form},
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::config::Config;

pub async fn unlock(
    Form(form): Form<UnlockForm>,
    Extension(config): Extension<&'static Config>,
) -> Response {
    if form.passcode == config.supervisor.passcode {
        tracing::info!("Supervisor mode unlocked");

        with_cookie(Redirect::to("/directory"), "supervisor=1; Path=/")
    } else {
        tracing::debug!("Supervisor unlock rejected");

        Redirect::to("/directory?denied=true").into_response()
    }
}

pub async fn logout() -> Response {
    with_cookie(
        Redirect::to("/directory"),
        "supervisor=0; Path=/; Max-Age=0",
    )
}

fn with_cookie(redirect: Redirect, cookie: &'static str) -> Response {
    let mut response = redirect.into_response();

    response
        .headers_mut()
        .insert(SET_COOKIE, HeaderValue::from_static(cookie));

    response
}

#[derive(Deserialize)]
pub struct UnlockForm {
    #[serde(default)]
    passcode: String,
}
