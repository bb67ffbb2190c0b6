//! Hexsat Observability
//!
//! - [`logging::init_tracing`]: installs the global `tracing` subscriber
//! - [`logging::logging_middleware`]: per-request log lines with a request id
//!
//! # Environment
//!
//! - `RUST_LOG`: full filter directive, overrides everything else
//! - `LOG_LEVEL`: level for the service crates (default `info`)
//! - `LOG_FORMAT=json`: JSON console output instead of compact text
//! - `LOG_DIR`: also write daily-rotated log files into this directory

pub mod logging;

pub use logging::{REQUEST_ID_HEADER, init_tracing, logging_middleware};
