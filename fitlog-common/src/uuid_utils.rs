//! Identifier utilities

use uuid::Uuid;

/// Generate a new UUIDv4 record identifier in its stored (hyphenated) form
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
