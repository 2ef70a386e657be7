//! Identifier generation

use uuid::Uuid;

/// Mint a fresh random (v4) identifier. Needs no coordination between calls.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}
