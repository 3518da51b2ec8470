//! Utilities shared by the Top Ten packages: logging setup and clocks.

pub mod logger;
pub mod time;
