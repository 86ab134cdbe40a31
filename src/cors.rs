use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

/// The donate page is served from a static host, so every response — success
/// or failure — must carry the same permissive CORS headers.
pub const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
pub const ALLOW_METHODS: (&str, &str) = ("Access-Control-Allow-Methods", "POST, OPTIONS");
pub const ALLOW_HEADERS: (&str, &str) = ("Access-Control-Allow-Headers", "Content-Type");

pub fn json_response(status: StatusCode, body: &impl Serialize) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ALLOW_ORIGIN)
        .insert_header(ALLOW_METHODS)
        .insert_header(ALLOW_HEADERS)
        .json(body)
}

/// Preflight answer: empty body, headers only.
pub fn empty_response() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ALLOW_ORIGIN)
        .insert_header(ALLOW_METHODS)
        .insert_header(ALLOW_HEADERS)
        .finish()
}
