//! Domain logic for snippet sharing
//!
//! - `ids` - Identifier generation
//! - `fields` - Client-supplied attributes per entity, with required-field rules
//! - `resources` - Create/read/update/delete semantics over the entity store
//! - `moderation` - Content safety gate for user-authored text
//! - `error` - Domain error kinds surfaced to callers

pub mod error;
pub mod fields;
pub mod ids;
pub mod moderation;
pub mod resources;

pub use error::DomainError;
pub use moderation::{ContentClassifier, ContentGate, ModerationError};
pub use resources::{Resource, ResourceOptions, Resources};
