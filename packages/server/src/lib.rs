#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for nearby street crime in Chicago.
//!
//! Each request carries the map's visible bounding box and two toggles.
//! The server turns them into a single query against the City of Chicago
//! crimes dataset, keeps the rows that happened within the configured
//! window of the current Chicago time of day, and returns them with
//! permissive CORS so the map can be served from any origin.

pub mod config;
pub mod error;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, middleware, web};
use chrono::{DateTime, Utc};
use crime_nearby_source::lookup::LookupOptions;
use crime_nearby_source::socrata::SocrataSource;
use crime_nearby_source::{IncidentSource, SourceError};

use crate::config::{ConfigError, ServerConfig};

/// Shared application state.
pub struct AppState {
    /// Where incidents are fetched from.
    pub source: Arc<dyn IncidentSource>,
    /// Query and post-filter settings.
    pub lookup: LookupOptions,
    /// Clock used to decide what "now" is for each request.
    pub now: fn() -> DateTime<Utc>,
}

impl AppState {
    /// State backed by `source` using the system clock.
    #[must_use]
    pub fn new(source: Arc<dyn IncidentSource>, lookup: LookupOptions) -> Self {
        Self {
            source,
            lookup,
            now: Utc::now,
        }
    }
}

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The data API client could not be built.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Registers the API routes.
///
/// `POST /` is an alias of `POST /api/crimes` for clients that post to the
/// bare function URL.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/crimes", web::post().to(handlers::crimes))
            .route("/crimes/markers", web::post().to(handlers::crime_markers)),
    )
    .route("/", web::post().to(handlers::crimes));
}

/// Builds the application: permissive CORS (the map may be served from any
/// origin), access logging, shared state, and [`routes`].
pub fn app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Cors::permissive())
        .wrap(middleware::Logger::default())
        .app_data(state)
        .configure(routes)
}

/// Starts the crime nearby API server.
///
/// Reads [`ServerConfig`] from the environment, builds the Socrata client,
/// and serves until shut down. The caller provides the async runtime (e.g.
/// via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if the configuration is invalid, the HTTP client
/// cannot be built, or the server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env()?;

    if config.socrata.app_token.is_none() {
        log::warn!("APP_TOKEN is not set; data API requests will be throttled");
    }
    log::info!("Using dataset {}", config.socrata.api_url);
    if let Some(excluded) = config.lookup.query.category_exclusion.descriptions() {
        log::info!("Excluding primary descriptions: {}", excluded.join(", "));
    }

    let source = SocrataSource::new(config.socrata.clone())?;
    let state = web::Data::new(AppState::new(Arc::new(source), config.lookup.clone()));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || app(state.clone()))
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
