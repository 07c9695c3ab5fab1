use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::RosterApi,
    error::RosterError,
    model::{RecordDetail, RosterDisplay, RosterViewState},
};
use crate::domain::service::Service;

/// Local implementation of the RosterApi trait that delegates to the domain service
pub struct RosterLocalClient {
    service: Arc<Service>,
}

impl RosterLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RosterApi for RosterLocalClient {
    async fn list_page(&self, state: RosterViewState) -> Result<RosterDisplay, RosterError> {
        self.service.list_page(state).await.map_err(Into::into)
    }

    async fn get_record(&self, id: u64) -> Result<RecordDetail, RosterError> {
        self.service.get_record(id).await.map_err(Into::into)
    }
}
