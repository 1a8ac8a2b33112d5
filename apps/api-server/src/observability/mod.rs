//! Observability module - request id propagation.

mod request_id;

pub use request_id::RequestIdMiddleware;
