//! Requests and responses using catalog templates.
//!
//! Both request kinds here look up a template by option key, copy it, and
//! overlay the caller's text before sending.

pub mod nora;
pub mod simple;
