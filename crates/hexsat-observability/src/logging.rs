use std::env;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Response header carrying the id logged for the request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const SERVICE_CRATES: &[&str] = &[
    "hexsatisfaction",
    "hexsat_core",
    "hexsat_auth",
    "hexsat_db",
    "hexsat_observability",
];

fn default_filter(log_level: &str) -> String {
    let mut directives: Vec<String> = SERVICE_CRATES
        .iter()
        .map(|krate| format!("{krate}={log_level}"))
        .collect();
    directives.push("tower_http=warn".to_string());
    directives.push("hyper=warn".to_string());
    directives.push("sqlx=warn".to_string());
    directives.join(",")
}

pub fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&log_level)));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if json {
        layers.push(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    }

    if let Ok(log_dir) = env::var("LOG_DIR") {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, "hexsatisfaction.log");
        layers.push(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).with(filter).init();
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let mut response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms = %latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms = %latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms = %latency_ms,
            "Request completed"
        ),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
