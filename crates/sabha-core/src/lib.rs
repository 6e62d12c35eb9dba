//! Core types and trait definitions for the Sabha catalog.
//!
//! This crate is free of HTTP and database dependencies. The storage backend,
//! the JSON API and the page layer all depend on it.

pub mod error;
pub mod event;
pub mod reference;
pub mod session;
pub mod store;
pub mod timestamp;

pub use error::{Error, Result};
