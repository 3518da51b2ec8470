//! UI layer: the axum server, its handlers and the realtime gateway.

pub mod gateway;
mod handler;
mod server;
mod signal;
pub mod state;

pub use gateway::{Gateway, GatewayError};
pub use server::Server;
