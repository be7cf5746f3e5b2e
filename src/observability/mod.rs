//! OpenTelemetry tracing exported to a local JSON file.
//!
//! The plugin has no collector to talk to from inside the sandbox, so spans
//! are serialized as OTLP JSON lines into the data directory:
//!
//! ```text
//! tracing macros → OpenTelemetryLayer → FileSpanExporter → mealdeck-otlp.json
//! ```
//!
//! The file rotates at 10MB and keeps 3 backups. The filter directive comes
//! from the `trace_level` plugin option and defaults to `"info"`.
//!
//! ```rust
//! use mealdeck::observability::init_tracing;
//! use mealdeck::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope name.
pub const SERVICE_NAME: &str = "Mealdeck";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "mealdeck-otlp.json";
