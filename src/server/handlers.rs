use actix_multipart::form::{bytes::Bytes as UploadedBytes, MultipartForm};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::{ConverterError, Result};
use crate::html::INDEX_HTML;
use crate::models::{ConversionRequest, ReverseConversionRequest};
use crate::processors::{BatchProcessor, CoordinateConverter};
use crate::server::{RECORD_COUNT_HEADER, SUCCESS_COUNT_HEADER};
use crate::utils::constants::{DEFAULT_UPLOAD_NAME, EPSG_WGS84, SAMPLE_CSV_FILENAME, SERVICE_NAME};
use crate::utils::filename::converted_filename;
use crate::utils::logging::log_conversion;
use crate::writers::CsvWriter;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    filename: Option<String>,
    target_epsg: Option<u32>,
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

/// Answer CORS preflight requests for the POST endpoints.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
        .finish()
}

pub async fn convert_point(
    req: HttpRequest,
    converter: web::Data<CoordinateConverter>,
    request: web::Json<ConversionRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let response = converter.convert_point(&request)?;

    log_conversion(
        &serde_json::to_value(&request)?,
        &serde_json::to_value(&response)?,
        &format!("{}_to_{}", EPSG_WGS84, response.epsg),
        user_agent(&req),
    );

    Ok(HttpResponse::Ok().json(response))
}

pub async fn convert_reverse(
    req: HttpRequest,
    converter: web::Data<CoordinateConverter>,
    request: web::Json<ReverseConversionRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let response = match converter.convert_reverse(&request) {
        Ok(response) => response,
        Err(e) if e.is_client_error() => {
            warn!("Reverse conversion rejected: {}", e);
            return Ok(HttpResponse::BadRequest()
                .json(json!({ "detail": format!("Reverse conversion error: {}", e) })));
        }
        Err(e) => return Err(e),
    };

    log_conversion(
        &serde_json::to_value(&request)?,
        &serde_json::to_value(&response)?,
        &format!("{}_to_{}", response.epsg, EPSG_WGS84),
        user_agent(&req),
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Form upload with the CSV in a `file` field.
#[derive(Debug, MultipartForm)]
pub struct BatchUpload {
    file: UploadedBytes,
}

/// Convert a raw CSV body; the result comes back as a downloadable CSV.
pub async fn convert_batch(
    converter: web::Data<CoordinateConverter>,
    query: web::Query<BatchQuery>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let BatchQuery {
        filename,
        target_epsg,
    } = query.into_inner();
    run_batch(converter, filename, target_epsg, body).await
}

/// Convert a multipart/form-data upload; the download name follows the uploaded file name.
pub async fn convert_batch_upload(
    converter: web::Data<CoordinateConverter>,
    query: web::Query<BatchQuery>,
    MultipartForm(upload): MultipartForm<BatchUpload>,
) -> Result<HttpResponse> {
    let BatchQuery {
        filename,
        target_epsg,
    } = query.into_inner();
    let file = upload.file;
    run_batch(converter, file.file_name.or(filename), target_epsg, file.data).await
}

async fn run_batch(
    converter: web::Data<CoordinateConverter>,
    filename: Option<String>,
    target_epsg: Option<u32>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let filename = filename.unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());
    let download_name = converted_filename(&filename);
    info!("Received batch upload '{}' ({} bytes)", filename, body.len());

    let output = web::block(move || {
        BatchProcessor::new(&converter)
            .with_target_epsg(target_epsg)
            .process_bytes(&body, &filename, None)
    })
    .await
    .map_err(|e| ConverterError::Blocking(e.to_string()))??;

    Ok(HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download_name),
        ))
        .insert_header((RECORD_COUNT_HEADER, output.summary.record_count.to_string()))
        .insert_header((SUCCESS_COUNT_HEADER, output.summary.success_count.to_string()))
        .body(output.csv))
}

pub async fn download_sample_csv() -> Result<HttpResponse> {
    let bytes = CsvWriter::new().sample_csv()?;
    Ok(HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SAMPLE_CSV_FILENAME),
        ))
        .body(bytes))
}

fn user_agent(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}
