use actix_web::{http, web, App, HttpResponse, HttpServer};
use actix_web::error::InternalError;
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod error;
pub mod game;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::config::settings::ServiceSettings;
use crate::db::store::RivalryStore;
use crate::models::common::ApiResponse;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn RivalryStore>,
    settings: ServiceSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let store_data: web::Data<dyn RivalryStore> = web::Data::from(store);
    let settings_data = web::Data::new(settings);

    let server = HttpServer::new( move || {
        let cors = build_cors(&settings_data.allowed_origins);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config())
            .app_data(path_config())
            // Get a pointer copy and attach it to the application state
            .app_data(store_data.clone())
            .app_data(settings_data.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// An empty list or a `*` entry lets any origin through
fn build_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
        .allowed_headers(vec![
            http::header::ACCEPT,
            http::header::CONTENT_TYPE,
        ])
        .max_age(3600);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

/// Malformed bodies (bad `result`, missing `matchDate`, unknown stat keys) answer in the usual envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        tracing::warn!("Rejected request body: {}", detail);
        let response = HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_with_message("Invalid request body", detail));
        InternalError::from_response(err, response).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        let response = HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_with_message("Invalid path parameter", detail));
        InternalError::from_response(err, response).into()
    })
}
