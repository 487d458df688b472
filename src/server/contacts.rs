use std::sync::Mutex;

use axum::{
    extract::{Extension, Form},
    response::{IntoResponse, Redirect, Response},
};
use cap_std::fs::Dir;
use serde::Deserialize;
use tokio::task::spawn_blocking;

use crate::{
    contact::Contact,
    server::{require_supervisor, ServerError, Supervisor},
    store::{Mutation, Store},
};

pub async fn add(
    supervisor: Supervisor,
    Form(form): Form<ContactForm>,
    Extension(store): Extension<&'static Mutex<Store>>,
    Extension(dir): Extension<&'static Dir>,
) -> Result<Response, ServerError> {
    require_supervisor(supervisor)?;

    let contact = Contact::from(form);

    if !contact.is_valid() {
        return Err(ServerError::BadRequest(
            "A contact needs a name and an internal number",
        ));
    }

    spawn_blocking(move || {
        let mut store = store.lock().unwrap();

        store.apply(Mutation::Add(contact));
        store.persist(dir);
    })
    .await?;

    Ok(Redirect::to("/directory").into_response())
}

pub async fn edit(
    supervisor: Supervisor,
    Form(form): Form<EditForm>,
    Extension(store): Extension<&'static Mutex<Store>>,
    Extension(dir): Extension<&'static Dir>,
) -> Result<Response, ServerError> {
    require_supervisor(supervisor)?;

    let contact = Contact {
        first_name: form.first_name,
        last_name: form.last_name,
        internal_number: form.internal_number,
        wireless_number: form.wireless_number,
        function: form.function,
        direct_line: form.direct_line,
        gsm_number: form.gsm_number,
        fax_number: form.fax_number,
    };

    if !contact.is_valid() {
        return Err(ServerError::BadRequest(
            "A contact needs a name and an internal number",
        ));
    }

    let found = spawn_blocking(move || {
        let mut store = store.lock().unwrap();

        let found = store.apply(Mutation::Update {
            internal_number: form.original_internal_number,
            contact,
        });

        if found {
            store.persist(dir);
        }

        found
    })
    .await?;

    if !found {
        return Err(ServerError::BadRequest(
            "No contact with this internal number",
        ));
    }

    Ok(Redirect::to("/directory").into_response())
}

pub async fn delete(
    supervisor: Supervisor,
    Form(form): Form<DeleteForm>,
    Extension(store): Extension<&'static Mutex<Store>>,
    Extension(dir): Extension<&'static Dir>,
) -> Result<Response, ServerError> {
    require_supervisor(supervisor)?;

    let found = spawn_blocking(move || {
        let mut store = store.lock().unwrap();

        let found = store.apply(Mutation::Delete {
            internal_number: form.internal_number,
        });

        if found {
            store.persist(dir);
        }

        found
    })
    .await?;

    if !found {
        return Err(ServerError::BadRequest(
            "No contact with this internal number",
        ));
    }

    Ok(Redirect::to("/directory").into_response())
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    first_name: String,
    last_name: String,
    internal_number: String,
    wireless_number: String,
    function: String,
    direct_line: String,
    gsm_number: String,
    fax_number: String,
}

impl From<ContactForm> for Contact {
    fn from(form: ContactForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            internal_number: form.internal_number,
            wireless_number: form.wireless_number,
            function: form.function,
            direct_line: form.direct_line,
            gsm_number: form.gsm_number,
            fax_number: form.fax_number,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct EditForm {
    original_internal_number: String,
    first_name: String,
    last_name: String,
    internal_number: String,
    wireless_number: String,
    function: String,
    direct_line: String,
    gsm_number: String,
    fax_number: String,
}

#[derive(Deserialize)]
pub struct DeleteForm {
    internal_number: String,
}
