//! Top Ten game server library.
//!
//! Multiplayer rooms where players race to name the items of a ranked
//! "top 10" list, synchronized over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
