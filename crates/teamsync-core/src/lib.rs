//! Core types and trait definitions for the TeamSync presence board.
//!
//! This crate is deliberately free of HTTP dependencies. The store backend,
//! the REST surface and the text-generation client all depend on it.

pub mod advisory;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod log;
pub mod member;
pub mod store;

pub use error::{Error, Result};
