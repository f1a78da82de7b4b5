//! Request dispatch and the handlers behind each route.
//!
//! Dispatch precedence, checked in this order for every request:
//! 1. method other than GET: 405
//! 2. `/`: HTML listing
//! 3. `/list`: JSON listing
//! 4. any path starting with `/zip`: archive download, remainder passed raw
//! 5. anything else: 404

use actix_web::{
    HttpRequest, HttpResponse,
    http::{Method, header},
    web,
};

use crate::{
    ZipserveConfig,
    archive::{self, ArchiveTarget},
    errors::RuntimeError,
    listing::read_root_directory,
    renderer, security,
};

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index_page))
            .route(web::route().to(method_not_supported)),
    )
    .service(
        web::resource("/list")
            .route(web::get().to(list_entries))
            .route(web::route().to(method_not_supported)),
    )
    .service(
        web::resource("/zip{tail:.*}")
            .route(web::get().to(download_archive))
            .route(web::route().to(method_not_supported)),
    )
    .default_service(web::route().to(fallback));
}

/// `GET /`: the root listing wrapped in a fixed HTML template.
async fn index_page(config: web::Data<ZipserveConfig>) -> Result<HttpResponse, RuntimeError> {
    let entries = read_root_directory(&config.path).await?;

    Ok(HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(renderer::render_index(&entries)))
}

/// `GET /list`: the root listing as a JSON array of names.
async fn list_entries(config: web::Data<ZipserveConfig>) -> Result<HttpResponse, RuntimeError> {
    let entries = read_root_directory(&config.path).await?;

    Ok(HttpResponse::Ok().json(entries))
}

/// `GET /zip<suffix>`: streams a ZIP of the named entry.
///
/// The status and headers are committed before the archive is built, so a
/// failure during streaming can only truncate the body, never change the
/// response code.
async fn download_archive(
    req: HttpRequest,
    config: web::Data<ZipserveConfig>,
) -> Result<HttpResponse, RuntimeError> {
    let raw = req.match_info().query("tail");
    let name = security::sanitize_entry_name(raw)?;
    let target = ArchiveTarget::resolve(&config.path, &name).await?;

    log::info!("streaming zip archive of {}", target.path.display());

    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={name}.zip"),
        ))
        .streaming(archive::stream_archive(target)))
}

async fn method_not_supported() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type(mime::TEXT_PLAIN)
        .body("Method not supported\n")
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(mime::TEXT_PLAIN)
        .body("404 Not Found\n")
}

/// Unmatched routes: the method check still takes precedence over the 404.
async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() != Method::GET {
        method_not_supported().await
    } else {
        not_found().await
    }
}
