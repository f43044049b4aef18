//! Smorfia number-meaning resolution service.
//!
//! Pairs each number of a fresh upstream draw with its traditional meaning
//! from the Neapolitan smorfia table.
//!
//! - [`store`]: the meaning table behind the [`store::MeaningStore`] trait
//! - [`source`]: the upstream draw client behind [`source::NumberSource`]
//! - [`resolver`]: the pure join of a draw against the table
//! - [`api`]: the axum router exposing both over HTTP

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod source;
pub mod store;

pub use error::{Result, SmorfiaError};
