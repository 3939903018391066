//! Common utilities and helpers

pub mod discovery;
