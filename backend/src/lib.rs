//! Biobank directory explorer engine.
//!
//! Compiles facet selections into catalog queries, resolves indirect
//! facets, reconciles raw catalog responses into the biobank/collection
//! result view, and packages exports for the negotiator system.

pub mod api;
pub mod catalog_utils;
pub mod config;
pub mod error;
pub mod negotiator;
pub mod query;
pub mod results;
pub mod store;
