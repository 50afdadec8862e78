//! Request inspection subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (query, headers, body)
//!     → inspector.rs (scan fields in order: query → headers → body)
//!     → patterns.rs (substring test against the blocked pattern table)
//!     → Return: Decision::Allowed or Decision::Blocked(field)
//! ```
//!
//! # Design Decisions
//! - Pattern table is a compile-time static, never mutated
//! - Exact, case-sensitive substring matching; no decoding or normalization
//! - First contaminated field wins; later fields are not scanned
//! - Pure functions only: safe to call from any number of tasks at once

pub mod inspector;
pub mod patterns;

pub use inspector::{evaluate, Decision, Field, InspectedRequest};
pub use patterns::{contains_blocked_pattern, BLOCKED_PATTERNS};
