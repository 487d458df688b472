use std::sync::Mutex;

use askama::Template;
use axum::{
    extract::{Extension, Query},
    response::{Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;

use crate::{
    config::Config,
    contact::Contact,
    dial::tel_uri,
    server::{Accept, ServerError, Supervisor},
    store::Store,
};

pub async fn directory(
    Query(params): Query<DirectoryParams>,
    accept: Accept,
    supervisor: Supervisor,
    Extension(store): Extension<&'static Mutex<Store>>,
) -> Result<Response, ServerError> {
    fn inner(
        params: DirectoryParams,
        accept: Accept,
        supervisor: Supervisor,
        store: &Mutex<Store>,
    ) -> Result<Response, ServerError> {
        let contacts = store.lock().unwrap().search(&params.query);

        tracing::debug!("Found {} contacts", contacts.len());

        let page = DirectoryPage {
            count: contacts.len(),
            contacts,
            supervisor: supervisor.0,
            denied: params.denied,
            query: params.query,
        };

        Ok(accept.into_repsonse(page))
    }

    spawn_blocking(move || inner(params, accept, supervisor, store)).await?
}

#[derive(Deserialize, Serialize)]
pub struct DirectoryParams {
    #[serde(default)]
    query: String,
    #[serde(default)]
    denied: bool,
}

#[derive(Template, Serialize)]
#[template(path = "directory.html")]
struct DirectoryPage {
    query: String,
    denied: bool,
    supervisor: bool,
    count: usize,
    contacts: Vec<Contact>,
}

pub async fn dial(
    Query(params): Query<DialParams>,
    Extension(config): Extension<&'static Config>,
) -> Redirect {
    let uri = tel_uri(&params.number, params.internal, &config.dial);

    Redirect::to(&uri)
}

#[derive(Deserialize)]
pub struct DialParams {
    number: String,
    #[serde(default)]
    internal: bool,
}
