//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod diagnostics;
pub mod settings;
pub mod trees;
