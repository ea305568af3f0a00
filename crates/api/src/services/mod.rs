//! Connection-level services.

pub mod multiplexer;
pub mod stream_session;
