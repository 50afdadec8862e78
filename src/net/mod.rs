//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept, wrap stream)
//!     → connection.rs (record bytes hyper reads, parse raw heads)
//!     → Hand off to HTTP layer (hyper via axum::serve)
//! ```
//!
//! # Design Decisions
//! - hyper still does all HTTP parsing and framing
//! - The raw head is only used to recover header names as sent

pub mod connection;
pub mod listener;

pub use connection::{HeadRecorder, RecordingStream};
pub use listener::RecordingListener;
