//! Tracing setup with optional OTLP/JSON span export to a file.
//!
//! ```text
//! tracing macros ─┬─► fmt layer ──────────────────────────────► stderr
//!                 └─► tracing-opentelemetry ─► SDK provider ─► OtlpFileExporter ─► rotating file
//! ```
//!
//! # Configuration
//!
//! 1. `RUST_LOG` (highest priority)
//! 2. `trace_level` in the config file
//! 3. Default: `"info"`
//!
//! Span export is off unless `trace_file` is set. The file rotates at 10 MB and
//! keeps three backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: `SpanExporter` writing one batch per line
//! - `otlp_json`: OTLP/JSON encoding
//! - `rotating_file`: Size-rotated line writer

mod exporter;
pub mod init;
mod otlp_json;
mod rotating_file;

pub use init::init_tracing;
