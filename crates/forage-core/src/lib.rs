//! Core types and trait definitions for the forage knowledge base.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and geocoder crates implement its traits; the CLI drives its
//! repository operations.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod geocode;
pub mod list;
pub mod merge;
pub mod note;
pub mod plant;
pub mod repo;
pub mod spot;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
