//! actix-web service exposing the converter over HTTP.
//!
//! Handlers are stateless; every worker gets a shared, immutable
//! [`CoordinateConverter`] through `web::Data`.

pub mod handlers;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    error::InternalError,
    guard::{self, GuardContext},
    http::{header, Method},
    middleware::DefaultHeaders,
    web, App, HttpResponse, HttpServer,
};
use serde_json::json;
use tracing::info;

use crate::config::Settings;
use crate::error::{ConverterError, Result};
use crate::processors::CoordinateConverter;

pub const RECORD_COUNT_HEADER: &str = "X-Record-Count";
pub const SUCCESS_COUNT_HEADER: &str = "X-Success-Count";

/// Register routes and extractor configuration.
pub fn configure(
    converter: web::Data<CoordinateConverter>,
    max_upload_bytes: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(converter)
            .app_data(json_config())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .app_data(multipart_config(max_upload_bytes))
            .route("/", web::get().to(handlers::index))
            .route("/health", web::get().to(handlers::health))
            .route(
                "/download-sample-csv",
                web::get().to(handlers::download_sample_csv),
            )
            .service(
                web::resource("/convert/point")
                    .route(web::post().to(handlers::convert_point))
                    .route(web::route().method(Method::OPTIONS).to(handlers::preflight)),
            )
            .service(
                web::resource("/convert/reverse")
                    .route(web::post().to(handlers::convert_reverse))
                    .route(web::route().method(Method::OPTIONS).to(handlers::preflight)),
            )
            .service(
                web::resource("/convert/batch")
                    .route(
                        web::post()
                            .guard(guard::fn_guard(is_multipart))
                            .to(handlers::convert_batch_upload),
                    )
                    .route(web::post().to(handlers::convert_batch))
                    .route(web::route().method(Method::OPTIONS).to(handlers::preflight)),
            );
    }
}

/// Malformed JSON bodies are reported as 422 with a `detail` message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::UnprocessableEntity().json(json!({ "detail": detail })),
        )
        .into()
    })
}

/// Form uploads share the body size limit; a broken form is a 400 with a `detail` message.
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(max_upload_bytes)
        .error_handler(|err, _req| {
            let detail = format!("Invalid upload: {}", err);
            InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(json!({ "detail": detail })),
            )
            .into()
        })
}

fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// CORS headers attached to every response.
pub fn cors_headers(allowed_origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin.to_string()))
        .add((
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            format!(
                "Content-Disposition, {}, {}",
                RECORD_COUNT_HEADER, SUCCESS_COUNT_HEADER
            ),
        ))
}

pub async fn run_server(settings: Settings) -> Result<()> {
    let converter = web::Data::new(CoordinateConverter::new(settings.target_epsg)?);
    let workers = settings.worker_count();
    let max_upload_bytes = settings.max_upload_bytes;
    let allowed_origin = settings.allowed_origin.clone();

    info!(
        "Starting {} on http://{}:{} ({} workers, target EPSG:{})",
        settings.app_name, settings.host, settings.port, workers, settings.target_epsg
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers(&allowed_origin))
            .configure(configure(converter.clone(), max_upload_bytes))
    })
    .workers(workers)
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
    .map_err(ConverterError::Io)
}
