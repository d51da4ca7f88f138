//! Cross-cutting request/response handling applied by the router around
//! every handler.
//!
//! - [`cors`] — `access-control-*` headers and `OPTIONS` preflight answers
//! - [`trace`] — per-request log line with method, path, status and latency

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::RequestTrace;
