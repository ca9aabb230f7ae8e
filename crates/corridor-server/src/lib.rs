//! Shared library surface for the corridor server and its tests.

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
pub mod static_cache;
