//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Load config → Validate → Init logging → Bind → Serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Shutdown::trigger(), a dropped Shutdown, or SIGTERM/SIGINT
//!     → stop accepting → finish in-flight requests → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
