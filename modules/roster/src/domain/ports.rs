use async_trait::async_trait;

use crate::contract::model::UserRecord;
use crate::domain::error::DomainError;

/// Transport-agnostic source of roster snapshots.
/// Every call returns the complete record list; there is no incremental merge.
#[async_trait]
pub trait RosterSource: Send + Sync + 'static {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError>;
}
