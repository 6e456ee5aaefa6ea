//! CLI command implementations.

pub mod common;
pub mod config;
pub mod demo;
pub mod export;
pub mod render;
pub mod stats;
