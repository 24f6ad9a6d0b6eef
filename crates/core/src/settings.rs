//! Recognized global setting keys.
//!
//! Settings are process-wide string key/value pairs with last-write-wins
//! semantics. Keys outside this list are stored and served unchanged; these
//! constants exist so handlers and seeds never typo the well-known ones.

use crate::types::DbId;

/// Which tree id is unlocked for freemium users.
pub const SETTING_FREEMIUM_TREE_ID: &str = "freemium_tree_id";

/// Display price for the premium plan.
pub const SETTING_PREMIUM_PRICE: &str = "premium_price";

/// "Tip of the day" string shown on the dashboard.
pub const SETTING_DAILY_TIP: &str = "daily_tip";

/// Parse a `freemium_tree_id` setting value into a tree id.
///
/// Setting values are always strings; a missing or non-numeric value means no
/// tree is unlocked for the freemium tier.
pub fn parse_tree_id(value: &str) -> Option<DbId> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_values() {
        assert_eq!(parse_tree_id("1"), Some(1));
        assert_eq!(parse_tree_id(" 42 "), Some(42));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(parse_tree_id(""), None);
        assert_eq!(parse_tree_id("abc"), None);
        assert_eq!(parse_tree_id("1.5"), None);
    }
}
