//! Core types and trait definitions for the newsdesk backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends and the HTTP layer depend on it.

pub mod attachment;
pub mod date;
pub mod error;
pub mod news;
pub mod store;

pub use error::{Error, Result};
