//! Tree access tiering.
//!
//! A pure predicate over (role, tree id, configured freemium tree id). It
//! gates which trees a user may open; it has no effect on traversal itself.
//! Trees a user cannot open are still listed, marked locked.

use crate::roles::{ROLE_ADMIN, ROLE_FREEMIUM, ROLE_PREMIUM};
use crate::types::DbId;

/// Whether a given tree may be opened by a given user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAccess {
    Open,
    Locked,
}

impl TreeAccess {
    pub fn is_locked(self) -> bool {
        self == TreeAccess::Locked
    }
}

/// Decide whether `role` may open `tree_id`.
///
/// Admin and premium roles open any tree. The freemium role opens only the
/// tree named by the `freemium_tree_id` setting (`None` when the setting is
/// missing or unparseable, locking everything). Unrecognized roles are
/// non-privileged and open nothing.
pub fn tree_access(role: &str, tree_id: DbId, freemium_tree_id: Option<DbId>) -> TreeAccess {
    match role {
        ROLE_ADMIN | ROLE_PREMIUM => TreeAccess::Open,
        ROLE_FREEMIUM if freemium_tree_id == Some(tree_id) => TreeAccess::Open,
        _ => TreeAccess::Locked,
    }
}
