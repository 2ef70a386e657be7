//! ScyllaDB / Cassandra backend
//!
//! One session per process, shared by every request. Statements are prepared
//! lazily and cached by `CachingSession`; the default execution profile carries
//! the configured consistency, request timeout and token-aware routing.

pub mod schema;

use std::time::Duration;

use scylla::client::caching_session::CachingSession;
use scylla::client::execution_profile::ExecutionProfile;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use scylla::policies::load_balancing::DefaultPolicy;
use scylla::statement::Consistency;

use super::error::StoreError;
use super::record::{Record, RowKey};
use crate::core::config::{ConsistencyLevel, ScyllaConfig};
use crate::core::constants::SCYLLA_PREPARED_CACHE_SIZE;

pub const BACKEND_NAME: &str = "scylla";

const HEALTH_CHECK_CQL: &str = "SELECT release_version FROM system.local";

pub struct ScyllaStore {
    session: CachingSession,
    keyspace: String,
}

impl ScyllaStore {
    /// Connect to the cluster and create keyspace and tables if missing
    pub async fn init(config: &ScyllaConfig) -> Result<Self, StoreError> {
        tracing::debug!(
            nodes = ?config.nodes,
            keyspace = %config.keyspace,
            consistency = %config.consistency,
            local_dc = ?config.local_datacenter,
            "Connecting to Scylla"
        );

        let mut policy = DefaultPolicy::builder().token_aware(true);
        if let Some(ref dc) = config.local_datacenter {
            policy = policy.prefer_datacenter(dc.clone());
        }

        let profile = ExecutionProfile::builder()
            .consistency(to_driver_consistency(config.consistency))
            .request_timeout(Some(Duration::from_secs(config.request_timeout_secs)))
            .load_balancing_policy(policy.build())
            .build();

        let mut builder = SessionBuilder::new()
            .known_nodes(&config.nodes)
            .default_execution_profile_handle(profile.into_handle());
        if let (Some(user), Some(password)) = (&config.username, &config.password) {
            builder = builder.user(user, password);
        }

        let session = builder
            .build()
            .await
            .map_err(|e| StoreError::unavailable(BACKEND_NAME, e))?;

        Self::ensure_schema(&session, &config.keyspace, config.replication_factor).await?;

        tracing::debug!(keyspace = %config.keyspace, "Scylla schema ready");

        Ok(Self {
            session: CachingSession::from(session, SCYLLA_PREPARED_CACHE_SIZE),
            keyspace: config.keyspace.clone(),
        })
    }

    async fn ensure_schema(
        session: &Session,
        keyspace: &str,
        replication_factor: u32,
    ) -> Result<(), StoreError> {
        for statement in schema::schema_statements(keyspace, replication_factor) {
            tracing::trace!(cql = %statement, "Applying schema statement");
            session
                .query_unpaged(statement, ())
                .await
                .map_err(|e| StoreError::unavailable(BACKEND_NAME, e))?;
        }
        Ok(())
    }

    pub async fn get<R: Record>(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        let result = self
            .session
            .execute_unpaged(schema::select_cql::<R>(&self.keyspace), key.values())
            .await
            .map_err(|e| StoreError::query(R::TABLE, e))?;
        let rows = result
            .into_rows_result()
            .map_err(|e| StoreError::decode(R::TABLE, e))?;
        rows.maybe_first_row::<R>()
            .map_err(|e| StoreError::decode(R::TABLE, e))
    }

    pub async fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.session
            .execute_unpaged(schema::insert_cql::<R>(&self.keyspace), record)
            .await
            .map_err(|e| StoreError::query(R::TABLE, e))?;
        Ok(())
    }

    pub async fn delete<R: Record>(&self, key: &R::Key) -> Result<(), StoreError> {
        self.session
            .execute_unpaged(schema::delete_cql::<R>(&self.keyspace), key.values())
            .await
            .map_err(|e| StoreError::query(R::TABLE, e))?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.session
            .get_session()
            .query_unpaged(HEALTH_CHECK_CQL, ())
            .await
            .map_err(|e| StoreError::unavailable(BACKEND_NAME, e))?;
        Ok(())
    }
}

fn to_driver_consistency(level: ConsistencyLevel) -> Consistency {
    match level {
        ConsistencyLevel::One => Consistency::One,
        ConsistencyLevel::LocalOne => Consistency::LocalOne,
        ConsistencyLevel::Quorum => Consistency::Quorum,
        ConsistencyLevel::LocalQuorum => Consistency::LocalQuorum,
        ConsistencyLevel::EachQuorum => Consistency::EachQuorum,
        ConsistencyLevel::All => Consistency::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_mapping() {
        assert_eq!(
            to_driver_consistency(ConsistencyLevel::LocalQuorum),
            Consistency::LocalQuorum
        );
        assert_eq!(to_driver_consistency(ConsistencyLevel::One), Consistency::One);
        assert_eq!(to_driver_consistency(ConsistencyLevel::All), Consistency::All);
    }
}
