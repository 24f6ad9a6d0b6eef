//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where partial updates apply
//! - A safe `Serialize` response struct where the row carries secrets

pub mod diagnostic;
pub mod reference_test;
pub mod session;
pub mod setting;
pub mod tree;
pub mod user;
