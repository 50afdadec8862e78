//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer and inspector produce:
//!     → tracing events (block decisions, startup, shutdown)
//!     → tower_http TraceLayer spans (one per request)
//!
//! Consumers:
//!     → stdout, pretty or JSON (logging.rs)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every block decision event
//! - Blocks log at WARN, allows at DEBUG

pub mod logging;

pub use logging::init_logging;
