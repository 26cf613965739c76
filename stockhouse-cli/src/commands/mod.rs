//! Command implementations for the stockhouse CLI

pub mod serve;

pub use serve::run_serve;
