//! Common library exports shared between the explorer engine and its consumers.

pub mod filters;
pub mod catalog;
pub mod view;
pub mod negotiator_query;
