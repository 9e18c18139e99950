//! Shared helpers for the workspace binaries and libraries.

pub mod utils;
