use std::env::var;
use std::net::SocketAddr;
use std::sync::Mutex;

use anyhow::Error;
use axum::{
    extract::Extension,
    response::Redirect,
    routing::{get, post},
    Router, Server,
};
use cap_std::{ambient_authority, fs::Dir};
use tokio::task::spawn;
use tower::{
    limit::GlobalConcurrencyLimitLayer, load_shed::LoadShedLayer, make::Shared, ServiceBuilder,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contact_directory::{
    config::Config,
    data_path_from_env,
    loader,
    server::{contacts, directory, supervisor, transfer},
    store::Store,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_path = data_path_from_env();

    let bind_addr = var("BIND_ADDR")
        .expect("Environment variable BIND_ADDR not set")
        .parse::<SocketAddr>()
        .expect("Environment variable BIND_ADDR invalid");

    let request_limit = var("REQUEST_LIMIT")
        .expect("Environment variable REQUEST_LIMIT not set")
        .parse::<usize>()
        .expect("Environment variable REQUEST_LIMIT invalid");

    let dir = &*Box::leak(Box::new(Dir::open_ambient_dir(
        data_path,
        ambient_authority(),
    )?));

    let config = &*Box::leak(Box::new(Config::read(dir)?));

    let store = &*Box::leak(Box::new(Mutex::new(Store::new(loader::load_initial(dir)))));

    spawn(loader::refresh(dir, &config.remote, store));

    let router = Router::new()
        .route("/", get(|| async { Redirect::permanent("/directory") }))
        .route("/directory", get(directory::directory))
        .route("/dial", get(directory::dial))
        .route("/supervisor", post(supervisor::unlock))
        .route("/supervisor/logout", post(supervisor::logout))
        .route("/contacts", post(contacts::add))
        .route("/contacts/edit", post(contacts::edit))
        .route("/contacts/delete", post(contacts::delete))
        .route("/import", post(transfer::import))
        .route("/export", get(transfer::export))
        .layer(Extension(store))
        .layer(Extension(dir))
        .layer(Extension(config));

    let make_service = Shared::new(
        ServiceBuilder::new()
            .layer(LoadShedLayer::new())
            .layer(GlobalConcurrencyLimitLayer::new(request_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(true)),
            )
            .service(router),
    );

    tracing::info!("Listening on {}", bind_addr);
    Server::bind(&bind_addr).serve(make_service).await?;

    Ok(())
}
