use std::sync::Mutex;

use axum::{
    extract::{ContentLengthLimit, Extension, Multipart},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
};
use cap_std::fs::Dir;
use tokio::task::spawn_blocking;

use crate::{
    csv,
    server::{require_supervisor, ServerError, Supervisor},
    store::{Mutation, Store},
};

/// Uploaded CSV files replace the entire list, matching the export below.
pub async fn import(
    supervisor: Supervisor,
    ContentLengthLimit(mut multipart): ContentLengthLimit<Multipart, { 10 << 20 }>,
    Extension(store): Extension<&'static Mutex<Store>>,
    Extension(dir): Extension<&'static Dir>,
) -> Result<Response, ServerError> {
    require_supervisor(supervisor)?;

    let field = multipart
        .next_field()
        .await?
        .ok_or(ServerError::BadRequest("Missing CSV file"))?;

    let text = field.text().await?;

    let count = spawn_blocking(move || {
        let contacts = csv::parse(&text);
        let count = contacts.len();

        let mut store = store.lock().unwrap();

        store.apply(Mutation::Replace(contacts));
        store.persist(dir);

        count
    })
    .await?;

    tracing::info!("Imported {} contacts", count);

    Ok(Redirect::to("/directory").into_response())
}

pub async fn export(
    Extension(store): Extension<&'static Mutex<Store>>,
) -> Result<Response, ServerError> {
    let text = spawn_blocking(move || csv::serialize(store.lock().unwrap().contacts())).await?;

    let mut response = text.into_response();

    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    response.headers_mut().insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"contacts.csv\""),
    );

    Ok(response)
}
