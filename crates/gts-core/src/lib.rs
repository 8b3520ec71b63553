//! Core types and trait definitions for the thesis catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

mod draft;

pub mod error;
pub mod institute;
pub mod person;
pub mod search;
pub mod store;
pub mod thesis;
pub mod university;

pub use error::{Error, Result};
