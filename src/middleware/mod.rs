//! HTTP middleware: request IDs and per-route rate limiting.

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{client_ip, RateLimiter};
pub use request_id::request_id_layer;
