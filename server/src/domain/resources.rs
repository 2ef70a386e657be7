//! Resource layer: create/read/update/delete per entity
//!
//! Every uuid-keyed entity implements [`Resource`], which says how client
//! fields plus server stamps become a row and which field (if any) carries
//! user-authored text. [`Resources`] then runs the same flow for all of them:
//!
//! - create: validate, screen text, mint id, stamp CreatedAt/UpdatedAt, put
//! - read: get by key, `NotFound` if absent
//! - update: validate, look up, screen text, keep CreatedAt, bump UpdatedAt, put
//! - delete: delete by key, always succeeds
//!
//! The snippet/tag junction has its own three operations since its key is
//! the pair of ids and it has no attributes to update.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use super::error::DomainError;
use super::fields::{
    BugBountyFields, CommentFields, InteractionFields, ReportFields, SnippetBountyFields,
    SnippetFields, SnippetTagFields, TagFields, UserFields,
};
use super::ids;
use super::moderation::ContentGate;
use crate::core::config::{StoreConfig, UpdateMode};
use crate::data::types::{
    BugBountyRow, CommentRow, InteractionRow, ReportRow, SnippetBountyRow, SnippetRow,
    SnippetTagRow, TagRow, UserRow,
};
use crate::data::{EntityStore, Record, SnippetTagKey};
use crate::utils::time::{now_millis, truncate_to_millis};

/// Server-assigned timestamps for a write
#[derive(Debug, Clone, Copy)]
pub struct Stamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A uuid-keyed entity with client-supplied fields
pub trait Resource: Record<Key = Uuid> {
    /// Display name, also used in error codes ("Snippet" -> SNIPPET_NOT_FOUND)
    const LABEL: &'static str;

    type Fields: Validate + Send + Sync;

    fn assemble(id: Uuid, fields: Self::Fields, stamps: Stamps) -> Self;

    /// Free text that must pass the content gate before it is written
    fn screened_text(_fields: &Self::Fields) -> Option<&str> {
        None
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl Resource for UserRow {
    const LABEL: &'static str = "User";
    type Fields = UserFields;

    fn assemble(id: Uuid, f: UserFields, _stamps: Stamps) -> Self {
        Self {
            user_id: id,
            username: f.username,
            email: f.email,
            password_hash: f.password_hash,
        }
    }
}

impl Resource for SnippetRow {
    const LABEL: &'static str = "Snippet";
    type Fields = SnippetFields;

    fn assemble(id: Uuid, f: SnippetFields, stamps: Stamps) -> Self {
        Self {
            snippet_id: id,
            user_id: f.user_id,
            title: f.title,
            content: f.content,
            language: f.language,
            created_at: stamps.created_at,
            updated_at: stamps.updated_at,
        }
    }

    fn screened_text(f: &SnippetFields) -> Option<&str> {
        Some(&f.content)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl Resource for TagRow {
    const LABEL: &'static str = "Tag";
    type Fields = TagFields;

    fn assemble(id: Uuid, f: TagFields, _stamps: Stamps) -> Self {
        Self {
            tag_id: id,
            tag_name: f.tag_name,
        }
    }
}

impl Resource for InteractionRow {
    const LABEL: &'static str = "Interaction";
    type Fields = InteractionFields;

    fn assemble(id: Uuid, f: InteractionFields, stamps: Stamps) -> Self {
        Self {
            interaction_id: id,
            snippet_id: f.snippet_id,
            user_id: f.user_id,
            interaction_type: f.interaction_type,
            created_at: stamps.created_at,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Resource for SnippetBountyRow {
    const LABEL: &'static str = "SnippetBounty";
    type Fields = SnippetBountyFields;

    fn assemble(id: Uuid, f: SnippetBountyFields, stamps: Stamps) -> Self {
        Self {
            bounty_id: id,
            snippet_id: f.snippet_id,
            user_id: f.user_id,
            description: f.description,
            reward: f.reward,
            status: f.status,
            created_at: stamps.created_at,
            due_date: truncate_to_millis(f.due_date),
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Resource for BugBountyRow {
    const LABEL: &'static str = "BugBounty";
    type Fields = BugBountyFields;

    fn assemble(id: Uuid, f: BugBountyFields, stamps: Stamps) -> Self {
        Self {
            bounty_id: id,
            user_id: f.user_id,
            description: f.description,
            reward: f.reward,
            status: f.status,
            created_at: stamps.created_at,
            due_date: truncate_to_millis(f.due_date),
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Resource for ReportRow {
    const LABEL: &'static str = "Report";
    type Fields = ReportFields;

    fn assemble(id: Uuid, f: ReportFields, stamps: Stamps) -> Self {
        Self {
            report_id: id,
            snippet_id: f.snippet_id,
            reported_by_user_id: f.reported_by_user_id,
            reason: f.reason,
            created_at: stamps.created_at,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Resource for CommentRow {
    const LABEL: &'static str = "Comment";
    type Fields = CommentFields;

    fn assemble(id: Uuid, f: CommentFields, stamps: Stamps) -> Self {
        Self {
            comment_id: id,
            snippet_id: f.snippet_id,
            user_id: f.user_id,
            content: f.content,
            created_at: stamps.created_at,
        }
    }

    fn screened_text(f: &CommentFields) -> Option<&str> {
        Some(&f.content)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

/// Behavior switches for the resource layer
#[derive(Debug, Clone, Copy)]
pub struct ResourceOptions {
    pub update_mode: UpdateMode,
    /// Run updated free text through the gate as well
    pub screen_updates: bool,
}

impl ResourceOptions {
    pub fn new(store: &StoreConfig, screen_updates: bool) -> Self {
        Self {
            update_mode: store.update_mode,
            screen_updates,
        }
    }
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::Upsert,
            screen_updates: true,
        }
    }
}

/// Resource layer service, shared by all handlers
pub struct Resources {
    store: Arc<EntityStore>,
    gate: Arc<ContentGate>,
    options: ResourceOptions,
}

impl Resources {
    pub fn new(store: Arc<EntityStore>, gate: Arc<ContentGate>, options: ResourceOptions) -> Self {
        Self {
            store,
            gate,
            options,
        }
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    pub fn gate(&self) -> &Arc<ContentGate> {
        &self.gate
    }

    pub async fn create<R: Resource>(&self, fields: R::Fields) -> Result<Uuid, DomainError> {
        fields.validate()?;
        if let Some(text) = R::screened_text(&fields) {
            self.gate.screen(text).await?;
        }

        let id = ids::new_id();
        let now = now_millis();
        let row = R::assemble(
            id,
            fields,
            Stamps {
                created_at: now,
                updated_at: now,
            },
        );
        self.store.put(&row).await?;

        tracing::debug!(entity = R::LABEL, id = %id, "Created");
        Ok(id)
    }

    pub async fn read<R: Resource>(&self, id: Uuid) -> Result<R, DomainError> {
        self.store
            .get::<R>(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(R::LABEL))
    }

    /// Full overwrite of the non-key attributes at `id`.
    ///
    /// With `UpdateMode::Upsert` an absent key is created (CreatedAt = now);
    /// with `RequireExisting` it is `NotFound` and nothing is written.
    pub async fn update<R: Resource>(&self, id: Uuid, fields: R::Fields) -> Result<(), DomainError> {
        fields.validate()?;

        let existing = self.store.get::<R>(&id).await?;
        if existing.is_none() && self.options.update_mode == UpdateMode::RequireExisting {
            return Err(DomainError::not_found(R::LABEL));
        }

        if self.options.screen_updates
            && let Some(text) = R::screened_text(&fields)
        {
            self.gate.screen(text).await?;
        }

        let now = now_millis();
        let stamps = match existing {
            Some(ref row) => Stamps {
                created_at: row.created_at().unwrap_or(now),
                updated_at: next_update_stamp(row.updated_at(), now),
            },
            None => Stamps {
                created_at: now,
                updated_at: now,
            },
        };

        let row = R::assemble(id, fields, stamps);
        self.store.put(&row).await?;

        tracing::debug!(
            entity = R::LABEL,
            id = %id,
            existed = existing.is_some(),
            "Updated"
        );
        Ok(())
    }

    /// Physical delete; absent keys still succeed
    pub async fn delete<R: Resource>(&self, id: Uuid) -> Result<(), DomainError> {
        self.store.delete::<R>(&id).await?;
        tracing::debug!(entity = R::LABEL, id = %id, "Deleted");
        Ok(())
    }

    // ========================================================================
    // Snippet <-> Tag junction
    // ========================================================================

    /// Write the junction row. Writing an existing pair again is an overwrite.
    pub async fn create_snippet_tag(
        &self,
        fields: SnippetTagFields,
    ) -> Result<SnippetTagKey, DomainError> {
        fields.validate()?;
        let row = SnippetTagRow {
            snippet_id: fields.snippet_id,
            tag_id: fields.tag_id,
        };
        self.store.put(&row).await?;

        tracing::debug!(
            snippet_id = %row.snippet_id,
            tag_id = %row.tag_id,
            "Linked snippet tag"
        );
        Ok(row.key())
    }

    pub async fn read_snippet_tag(&self, key: SnippetTagKey) -> Result<SnippetTagRow, DomainError> {
        self.store
            .get::<SnippetTagRow>(&key)
            .await?
            .ok_or_else(|| DomainError::not_found("SnippetTag"))
    }

    pub async fn delete_snippet_tag(&self, key: SnippetTagKey) -> Result<(), DomainError> {
        self.store.delete::<SnippetTagRow>(&key).await?;
        tracing::debug!(
            snippet_id = %key.snippet_id,
            tag_id = %key.tag_id,
            "Unlinked snippet tag"
        );
        Ok(())
    }
}

/// UpdatedAt for an overwrite: now, but strictly after the prior value so
/// two writes inside one millisecond still move it forward.
fn next_update_stamp(prior: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match prior {
        Some(prior) if now <= prior => prior + Duration::milliseconds(1),
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FailPolicy;
    use crate::domain::moderation::AllowAllClassifier;
    use crate::domain::moderation::testing::{KeywordClassifier, UnreachableClassifier};
    use std::sync::atomic::Ordering;

    fn resources_with(gate: ContentGate, options: ResourceOptions) -> Resources {
        Resources::new(Arc::new(EntityStore::memory()), Arc::new(gate), options)
    }

    fn resources() -> Resources {
        resources_with(
            ContentGate::new(Arc::new(AllowAllClassifier), FailPolicy::Closed),
            ResourceOptions::default(),
        )
    }

    fn snippet_fields(title: &str, content: &str) -> SnippetFields {
        SnippetFields {
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            language: "py".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_read_user() {
        let r = resources();
        let id = r
            .create::<UserRow>(UserFields {
                username: "a".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "h".to_string(),
            })
            .await
            .unwrap();

        let user = r.read::<UserRow>(id).await.unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.username, "a");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password_hash, "h");
    }

    #[tokio::test]
    async fn test_create_snippet_stamps_equal_times() {
        let r = resources();
        let id = r
            .create::<SnippetRow>(snippet_fields("t", "print(1)"))
            .await
            .unwrap();
        let snippet = r.read::<SnippetRow>(id).await.unwrap();
        assert_eq!(snippet.created_at, snippet.updated_at);
        assert_eq!(snippet.title, "t");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_field() {
        let r = resources();
        let err = r
            .create::<TagRow>(TagFields {
                tag_name: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("TagName")));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let r = resources();
        let err = r.read::<CommentRow>(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Comment" }));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at_and_bumps_updated_at() {
        let r = resources();
        let id = r
            .create::<SnippetRow>(snippet_fields("t", "print(1)"))
            .await
            .unwrap();
        let before = r.read::<SnippetRow>(id).await.unwrap();

        r.update::<SnippetRow>(id, snippet_fields("t2", "print(2)"))
            .await
            .unwrap();
        let after = r.read::<SnippetRow>(id).await.unwrap();

        assert_eq!(after.snippet_id, id);
        assert_eq!(after.title, "t2");
        assert_eq!(after.content, "print(2)");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_update_absent_key_upserts() {
        let r = resources();
        let id = Uuid::new_v4();
        r.update::<TagRow>(
            id,
            TagFields {
                tag_name: "rust".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(r.read::<TagRow>(id).await.unwrap().tag_name, "rust");
    }

    #[tokio::test]
    async fn test_update_absent_key_require_existing() {
        let r = resources_with(
            ContentGate::new(Arc::new(AllowAllClassifier), FailPolicy::Closed),
            ResourceOptions {
                update_mode: UpdateMode::RequireExisting,
                screen_updates: true,
            },
        );
        let id = Uuid::new_v4();
        let err = r
            .update::<TagRow>(
                id,
                TagFields {
                    tag_name: "rust".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Tag" }));
        assert!(r.read::<TagRow>(id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_then_read_and_delete_absent() {
        let r = resources();
        let id = r
            .create::<TagRow>(TagFields {
                tag_name: "go".to_string(),
            })
            .await
            .unwrap();
        r.delete::<TagRow>(id).await.unwrap();
        assert!(matches!(
            r.read::<TagRow>(id).await,
            Err(DomainError::NotFound { .. })
        ));
        r.delete::<TagRow>(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_flagged_content_is_not_written() {
        let classifier = Arc::new(KeywordClassifier::new("malware"));
        let r = resources_with(
            ContentGate::new(classifier.clone(), FailPolicy::Closed),
            ResourceOptions::default(),
        );

        let err = r
            .create::<CommentRow>(CommentFields {
                snippet_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                content: "free malware here".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ContentRejected));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);

        match r.store().as_ref() {
            EntityStore::Memory(m) => assert_eq!(m.count::<CommentRow>(), 0),
            EntityStore::Scylla(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_untexted_entities_skip_the_gate() {
        let classifier = Arc::new(KeywordClassifier::new("x"));
        let r = resources_with(
            ContentGate::new(classifier.clone(), FailPolicy::Closed),
            ResourceOptions::default(),
        );
        r.create::<TagRow>(TagFields {
            tag_name: "xxx".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_screening_can_be_disabled() {
        let classifier = Arc::new(KeywordClassifier::new("malware"));
        let r = resources_with(
            ContentGate::new(classifier.clone(), FailPolicy::Closed),
            ResourceOptions {
                update_mode: UpdateMode::Upsert,
                screen_updates: true,
            },
        );
        let id = r
            .create::<SnippetRow>(snippet_fields("t", "ok"))
            .await
            .unwrap();
        assert!(matches!(
            r.update::<SnippetRow>(id, snippet_fields("t", "malware"))
                .await,
            Err(DomainError::ContentRejected)
        ));

        let unscreened = resources_with(
            ContentGate::new(classifier, FailPolicy::Closed),
            ResourceOptions {
                update_mode: UpdateMode::Upsert,
                screen_updates: false,
            },
        );
        unscreened
            .update::<SnippetRow>(id, snippet_fields("t", "malware"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_gate_unavailable_policies() {
        let closed = resources_with(
            ContentGate::new(Arc::new(UnreachableClassifier), FailPolicy::Closed),
            ResourceOptions::default(),
        );
        assert!(matches!(
            closed.create::<SnippetRow>(snippet_fields("t", "x")).await,
            Err(DomainError::GateUnavailable(_))
        ));

        let open = resources_with(
            ContentGate::new(Arc::new(UnreachableClassifier), FailPolicy::Open),
            ResourceOptions::default(),
        );
        let id = open
            .create::<SnippetRow>(snippet_fields("t", "x"))
            .await
            .unwrap();
        assert!(open.read::<SnippetRow>(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_snippet_tag_pair_is_idempotent() {
        let r = resources();
        let fields = SnippetTagFields {
            snippet_id: Uuid::new_v4(),
            tag_id: Uuid::new_v4(),
        };
        let key = r.create_snippet_tag(fields.clone()).await.unwrap();
        let again = r.create_snippet_tag(fields.clone()).await.unwrap();
        assert_eq!(key, again);

        let row = r.read_snippet_tag(key).await.unwrap();
        assert_eq!(row.snippet_id, fields.snippet_id);
        match r.store().as_ref() {
            EntityStore::Memory(m) => assert_eq!(m.count::<SnippetTagRow>(), 1),
            EntityStore::Scylla(_) => unreachable!(),
        }

        r.delete_snippet_tag(key).await.unwrap();
        assert!(matches!(
            r.read_snippet_tag(key).await,
            Err(DomainError::NotFound {
                entity: "SnippetTag"
            })
        ));
    }

    #[tokio::test]
    async fn test_bounty_due_date_truncated() {
        let r = resources();
        let due: DateTime<Utc> = "2026-12-31T10:00:00.123456Z".parse().unwrap();
        let id = r
            .create::<BugBountyRow>(BugBountyFields {
                user_id: Uuid::new_v4(),
                description: "crash".to_string(),
                reward: 50,
                status: "open".to_string(),
                due_date: due,
            })
            .await
            .unwrap();
        let bounty = r.read::<BugBountyRow>(id).await.unwrap();
        assert_eq!(bounty.due_date, truncate_to_millis(due));
        assert_eq!(bounty.reward, 50);
    }

    #[test]
    fn test_next_update_stamp() {
        let now = now_millis();
        assert_eq!(next_update_stamp(None, now), now);
        assert_eq!(
            next_update_stamp(Some(now), now),
            now + Duration::milliseconds(1)
        );
        let earlier = now - Duration::seconds(5);
        assert_eq!(next_update_stamp(Some(earlier), now), now);
    }
}
