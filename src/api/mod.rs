//! HTTP API layer
//!
//! Routing and handlers for the service's REST surface.

pub mod handlers;
pub mod server;

pub use server::{create_router, AppContext};
