//! Clinidex domain core.
//!
//! Pure domain logic with no I/O: the decision-tree model and its write-time
//! validation, the traversal state machine, the access-tiering predicate,
//! diagnostic report rendering, and the shared error taxonomy. Persistence
//! and HTTP live in `clinidex-db` and `clinidex-api`.

pub mod access;
pub mod error;
pub mod report;
pub mod roles;
pub mod settings;
pub mod traversal;
pub mod tree;
pub mod types;
