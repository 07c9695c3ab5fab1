use async_trait::async_trait;

use crate::contract::{
    error::RosterError,
    model::{RecordDetail, RosterDisplay, RosterViewState},
};

/// Public API trait for the roster module that other modules can use
#[async_trait]
pub trait RosterApi: Send + Sync {
    /// Fetch a fresh snapshot and cut the page described by `state`.
    /// An out-of-range page index is clamped.
    async fn list_page(&self, state: RosterViewState) -> Result<RosterDisplay, RosterError>;

    /// Fetch a fresh snapshot and describe one record.
    async fn get_record(&self, id: u64) -> Result<RecordDetail, RosterError>;
}
